//! Full audit of one draw dataset.
//!
//! [`analyze`] validates every row, then runs the frequency, pair and
//! distribution aggregators over the valid draws and evaluates the
//! chi-square statistic from the frequency table. The returned
//! [`AnalysisReport`] is a plain value: nothing is cached between runs, so
//! identical input always yields an identical report.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::chi_square::{ChiSquareResult, chi_square_uniform};
use crate::config::AnalysisConfig;
use crate::distribution::{DistributionSummary, summarize_distribution};
use crate::error::ConfigError;
use crate::frequency::{FrequencyTable, count_frequencies};
use crate::pairs::{PairTable, count_pairs};
use crate::record::{DrawRecord, RawRow, RejectKind, RejectedRow, validate_row};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Dataset-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    /// Input rows seen, valid or not.
    pub rows: usize,
    pub valid_rows: usize,
    pub rejected_rows: usize,
    /// Labels of the numeric columns.
    pub number_columns: Vec<String>,
    pub numbers_per_draw: usize,
    pub min: u32,
    pub max: u32,
    /// Total numbers observed across valid draws.
    pub total_numbers: u64,
}

/// Reference to the last valid draw in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastRecord {
    pub row_index: usize,
    pub label: Option<String>,
    pub date: Option<String>,
    pub numbers: Vec<u32>,
}

/// Outcome of row validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub valid: usize,
    pub rejected: usize,
    /// Rejections per reason; every reason is present, zero included.
    pub by_reason: BTreeMap<RejectKind, usize>,
    /// Rejected rows in input order.
    pub rejections: Vec<RejectedRow>,
}

impl ValidationSummary {
    /// Fraction of rows that validated, or `None` for empty input.
    pub fn valid_ratio(&self) -> Option<f64> {
        let total = self.valid + self.rejected;
        (total > 0).then(|| self.valid as f64 / total as f64)
    }
}

/// Everything computed for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub last: Option<LastRecord>,
    pub validation: ValidationSummary,
    pub frequency: FrequencyTable,
    pub pairs: PairTable,
    pub distribution: DistributionSummary,
    pub chi_square: ChiSquareResult,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Run the full audit over `rows`.
///
/// Malformed rows never fail the call; they are listed in
/// [`AnalysisReport::validation`]. Only an invalid `config` is an error.
pub fn analyze(rows: &[RawRow], config: &AnalysisConfig) -> Result<AnalysisReport, ConfigError> {
    config.validate()?;

    let mut draws: Vec<DrawRecord> = Vec::with_capacity(rows.len());
    let mut rejections: Vec<RejectedRow> = Vec::new();
    let mut last: Option<LastRecord> = None;

    for (row_index, row) in rows.iter().enumerate() {
        match validate_row(row, config) {
            Ok(draw) => {
                last = Some(LastRecord {
                    row_index,
                    label: row.label.clone(),
                    date: row.date.clone(),
                    numbers: draw.numbers().to_vec(),
                });
                draws.push(draw);
            }
            Err(reason) => {
                debug!("row {row_index} rejected: {reason}");
                rejections.push(RejectedRow {
                    row_index,
                    row: row.clone(),
                    reason,
                });
            }
        }
    }

    let validation = summarize_validation(draws.len(), rejections);
    info!(
        "validated {} row(s): {} valid, {} rejected",
        rows.len(),
        validation.valid,
        validation.rejected
    );
    if draws.is_empty() {
        warn!("no valid draws; sum statistics and chi-square are undefined");
    }

    let frequency = count_frequencies(&draws, config);
    let pairs = count_pairs(&draws);
    let distribution = summarize_distribution(&draws, config.numbers_per_draw);
    let chi_square = chi_square_uniform(&frequency);

    let meta = ReportMeta {
        rows: rows.len(),
        valid_rows: validation.valid,
        rejected_rows: validation.rejected,
        number_columns: config.labels(),
        numbers_per_draw: config.numbers_per_draw,
        min: config.min,
        max: config.max,
        total_numbers: frequency.total(),
    };

    Ok(AnalysisReport {
        meta,
        last,
        validation,
        frequency,
        pairs,
        distribution,
        chi_square,
    })
}

fn summarize_validation(valid: usize, rejections: Vec<RejectedRow>) -> ValidationSummary {
    let mut by_reason: BTreeMap<RejectKind, usize> =
        RejectKind::ALL.iter().map(|&k| (k, 0)).collect();
    for r in &rejections {
        *by_reason.entry(r.reason.kind()).or_insert(0) += 1;
    }
    ValidationSummary {
        valid,
        rejected: rejections.len(),
        by_reason,
        rejections,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
