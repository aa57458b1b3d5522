pub mod analyze;
pub mod report;

use std::path::Path;

use anyhow::{Context, Result};
use drawaudit_core::{AnalysisConfig, ChiSquareResult, load_config_from_path};
use log::warn;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::input::Dataset;

/// Shown with every rendered result.
pub const DISCLAIMER: &str = "Descriptive statistics of past draws only. Past frequencies do not \
     predict future draws; each draw is independent.";

/// Range and K overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RangeArgs<'a> {
    pub config_path: Option<&'a str>,
    pub numbers: Option<usize>,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Build the analysis config.
///
/// Precedence, lowest first: defaults, `--config` file, number columns found
/// in the file header (for K only), explicit flags.
pub fn resolve_config(args: &RangeArgs<'_>, dataset: &Dataset) -> Result<AnalysisConfig> {
    let mut cfg = match args.config_path {
        Some(path) => load_config_from_path(Path::new(path))
            .with_context(|| format!("failed to load config {path}"))?,
        None => AnalysisConfig::default(),
    };

    let detected = dataset.number_columns.len();
    if args.config_path.is_none() && args.numbers.is_none() && detected > 0 {
        cfg.numbers_per_draw = detected;
    }
    if let Some(k) = args.numbers {
        cfg.numbers_per_draw = k;
    }
    if let Some(min) = args.min {
        cfg.min = min;
    }
    if let Some(max) = args.max {
        cfg.max = max;
    }

    if cfg.column_labels.is_none() && detected > 0 {
        if detected == cfg.numbers_per_draw {
            cfg.column_labels = Some(dataset.number_columns.clone());
        } else {
            warn!(
                "header names {detected} number column(s) but {} numbers per draw were requested; using generated labels",
                cfg.numbers_per_draw
            );
        }
    }

    Ok(cfg)
}

/// Upper-tail p-value of the chi-square statistic. `None` when the test is
/// undefined.
pub fn chi_square_p_value(result: &ChiSquareResult) -> Option<f64> {
    if !result.defined || result.degrees_of_freedom == 0 {
        return None;
    }
    let dist = ChiSquared::new(result.degrees_of_freedom as f64).ok()?;
    Some(dist.sf(result.statistic))
}

/// Letter grade for how well frequencies fit the uniform expectation.
///
/// - A: p >= 0.1
/// - B: p >= 0.01
/// - C: p >= 0.001
/// - D: p >= 0.0001
/// - F: otherwise
/// - `-`: undefined
pub fn grade_from_p(p: Option<f64>) -> char {
    match p {
        Some(p) if p >= 0.1 => 'A',
        Some(p) if p >= 0.01 => 'B',
        Some(p) if p >= 0.001 => 'C',
        Some(p) if p >= 0.0001 => 'D',
        Some(_) => 'F',
        None => '-',
    }
}

/// One-line reading of the fit, never a forecast.
pub fn interpret_fit(p: Option<f64>) -> &'static str {
    match p {
        None => "Not enough data: no valid draws were observed.",
        Some(p) if p >= 0.05 => {
            "Observed frequencies are consistent with a uniform distribution."
        }
        Some(p) if p >= 0.001 => {
            "Frequencies deviate somewhat from uniform; common for finite samples."
        }
        Some(_) => "Frequencies deviate strongly from uniform; check the data for input errors.",
    }
}

/// Format an optional statistic, or `undefined`.
pub fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    v.map(|x| format!("{x:.precision$}"))
        .unwrap_or_else(|| "undefined".to_string())
}
