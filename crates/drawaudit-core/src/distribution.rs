//! Per-draw parity split and sum statistics.

use serde::Serialize;

use crate::record::DrawRecord;

/// Statistics over the per-draw sums. All fields except `draws` are `None`
/// when there are no draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SumStats {
    pub draws: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl SumStats {
    /// Whether the statistics are defined (at least one draw).
    pub fn is_defined(&self) -> bool {
        self.draws > 0
    }
}

/// One bucket of the parity histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParityBucket {
    pub evens: usize,
    pub odds: usize,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// `parity[e]` = number of draws with exactly `e` even numbers, `e` in `0..=K`.
    pub parity: Vec<u64>,
    pub sums: SumStats,
}

impl DistributionSummary {
    /// Parity histogram with odd counts and shares, ascending by even count.
    pub fn parity_buckets(&self) -> Vec<ParityBucket> {
        let k = self.parity.len().saturating_sub(1);
        let draws = self.sums.draws;
        self.parity
            .iter()
            .enumerate()
            .map(|(evens, &count)| ParityBucket {
                evens,
                odds: k - evens,
                count,
                percentage: if draws > 0 {
                    count as f64 * 100.0 / draws as f64
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Most common even count; ties go to the smaller count. `None` when empty.
    pub fn modal_evens(&self) -> Option<usize> {
        if self.sums.draws == 0 {
            return None;
        }
        self.parity
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(evens, _)| evens)
    }
}

/// Single pass over the draws: parity histogram plus running sum statistics.
pub fn summarize_distribution(draws: &[DrawRecord], numbers_per_draw: usize) -> DistributionSummary {
    let mut parity = vec![0u64; numbers_per_draw + 1];
    let mut count = 0usize;
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;
    let mut min: Option<u64> = None;
    let mut max: Option<u64> = None;

    for draw in draws {
        let evens = draw.evens();
        if let Some(slot) = parity.get_mut(evens) {
            *slot += 1;
        }

        let sum = draw.sum();
        count += 1;
        // Welford update
        let x = sum as f64;
        let delta = x - mean;
        mean += delta / count as f64;
        m2 += delta * (x - mean);

        min = Some(min.map_or(sum, |m| m.min(sum)));
        max = Some(max.map_or(sum, |m| m.max(sum)));
    }

    let sums = if count == 0 {
        SumStats {
            draws: 0,
            mean: None,
            std_dev: None,
            min: None,
            max: None,
        }
    } else {
        SumStats {
            draws: count,
            mean: Some(mean),
            std_dev: Some((m2 / count as f64).sqrt()),
            min,
            max,
        }
    };

    DistributionSummary { parity, sums }
}
