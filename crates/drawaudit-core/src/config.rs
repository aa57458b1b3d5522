//! Analysis configuration: numbers per draw and the inclusive value range.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default numbers drawn per record.
pub const DEFAULT_NUMBERS_PER_DRAW: usize = 6;
/// Default inclusive lower bound.
pub const DEFAULT_MIN: u32 = 1;
/// Default inclusive upper bound.
pub const DEFAULT_MAX: u32 = 60;
/// Largest accepted range size. The frequency table is dense over the range.
pub const MAX_RANGE_SIZE: usize = 1_000_000;

/// Parameters of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Numbers drawn per record (K).
    pub numbers_per_draw: usize,
    /// Inclusive lower bound.
    pub min: u32,
    /// Inclusive upper bound.
    pub max: u32,
    /// Labels of the numeric columns, reported in metadata. Must hold exactly
    /// `numbers_per_draw` entries when set.
    pub column_labels: Option<Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            numbers_per_draw: DEFAULT_NUMBERS_PER_DRAW,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            column_labels: None,
        }
    }
}

impl AnalysisConfig {
    /// Config with the given K and range and no explicit labels.
    pub fn new(numbers_per_draw: usize, min: u32, max: u32) -> Self {
        Self {
            numbers_per_draw,
            min,
            max,
            column_labels: None,
        }
    }

    /// Attach explicit numeric column labels.
    pub fn with_column_labels(mut self, labels: Vec<String>) -> Self {
        self.column_labels = Some(labels);
        self
    }

    /// Check the configuration before any row is looked at.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.numbers_per_draw == 0 {
            return Err(ConfigError::ZeroNumbersPerDraw);
        }
        if self.min >= self.max {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        let range = self.range_size();
        if range > MAX_RANGE_SIZE {
            return Err(ConfigError::RangeTooLarge {
                range,
                limit: MAX_RANGE_SIZE,
            });
        }
        if self.numbers_per_draw > range {
            return Err(ConfigError::RangeTooSmall {
                k: self.numbers_per_draw,
                range,
            });
        }
        if let Some(labels) = &self.column_labels {
            if labels.len() != self.numbers_per_draw {
                return Err(ConfigError::LabelCount {
                    expected: self.numbers_per_draw,
                    got: labels.len(),
                });
            }
        }
        Ok(())
    }

    /// Number of distinct values in `[min, max]` (N).
    pub fn range_size(&self) -> usize {
        (self.max as usize).saturating_sub(self.min as usize) + 1
    }

    /// Whether `n` lies in `[min, max]`.
    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Labels for the numeric columns: explicit ones, or `N1..NK`.
    pub fn labels(&self) -> Vec<String> {
        match &self.column_labels {
            Some(labels) => labels.clone(),
            None => (1..=self.numbers_per_draw).map(|i| format!("N{i}")).collect(),
        }
    }
}

/// Load an [`AnalysisConfig`] from a JSON file. Missing fields take defaults.
pub fn load_config_from_path(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config = serde_json::from_str::<AnalysisConfig>(&raw)?;
    config.validate()?;
    Ok(config)
}
