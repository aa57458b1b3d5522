//! Per-number occurrence counts across valid draws.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::DrawRecord;

/// Occurrence count of a single number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberCount {
    pub number: u32,
    pub count: u64,
    /// Share of all observed numbers, in percent.
    pub percentage: f64,
}

/// Count per number over the whole `[min, max]` range. Every number in range
/// has an entry, zero included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    min: u32,
    counts: Vec<u64>,
    total: u64,
}

impl FrequencyTable {
    /// Empty table covering `[min, max]`.
    fn zeroed(min: u32, max: u32) -> Self {
        Self {
            min,
            counts: vec![0; (max - min) as usize + 1],
            total: 0,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.min + self.counts.len() as u32 - 1
    }

    /// Number of keys, i.e. the range size N.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for `n`, or `None` when `n` is outside the range.
    pub fn count(&self, n: u32) -> Option<u64> {
        let idx = n.checked_sub(self.min)? as usize;
        self.counts.get(idx).copied()
    }

    /// Total occurrences: valid draws × K.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Percentage of all occurrences that are `n`. Zero when nothing was
    /// observed or `n` is out of range.
    pub fn percentage(&self, n: u32) -> f64 {
        match self.count(n) {
            Some(c) if self.total > 0 => c as f64 * 100.0 / self.total as f64,
            _ => 0.0,
        }
    }

    /// `(number, count)` pairs in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &c)| (self.min + i as u32, c))
    }

    /// Raw counts indexed from `min`.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Entries with percentages, ascending by number.
    pub fn entries(&self) -> Vec<NumberCount> {
        self.iter().map(|(number, count)| self.entry(number, count)).collect()
    }

    /// The `n` most frequent numbers; ties go to the smaller number.
    pub fn top(&self, n: usize) -> Vec<NumberCount> {
        let mut ranked: Vec<(u32, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(number, count)| self.entry(number, count))
            .collect()
    }

    /// The `n` least frequent numbers; ties go to the smaller number.
    pub fn bottom(&self, n: usize) -> Vec<NumberCount> {
        let mut ranked: Vec<(u32, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(number, count)| self.entry(number, count))
            .collect()
    }

    /// Numbers never drawn.
    pub fn unseen(&self) -> Vec<u32> {
        self.iter().filter(|&(_, c)| c == 0).map(|(n, _)| n).collect()
    }

    fn entry(&self, number: u32, count: u64) -> NumberCount {
        NumberCount {
            number,
            count,
            percentage: self.percentage(number),
        }
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FrequencyTable", 4)?;
        s.serialize_field("min", &self.min)?;
        s.serialize_field("max", &self.max())?;
        s.serialize_field("total", &self.total)?;
        s.serialize_field("counts", &self.entries())?;
        s.end()
    }
}

/// Count each number of each draw over the configured range.
pub fn count_frequencies(draws: &[DrawRecord], config: &AnalysisConfig) -> FrequencyTable {
    let mut table = FrequencyTable::zeroed(config.min, config.max);
    for draw in draws {
        for &n in draw.numbers() {
            let Some(idx) = n.checked_sub(config.min) else {
                continue;
            };
            if let Some(slot) = table.counts.get_mut(idx as usize) {
                *slot += 1;
                table.total += 1;
            }
        }
    }
    table
}
