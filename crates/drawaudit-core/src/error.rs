//! Fatal errors for an analysis run.
//!
//! Malformed rows are never errors: they become [`RejectedRow`](crate::record::RejectedRow)
//! entries in the report. Only an unusable configuration aborts a run.

use thiserror::Error;

/// Configuration error that aborts an `analyze` call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("numbers per draw must be at least 1")]
    ZeroNumbersPerDraw,

    #[error("invalid value range: min ({min}) must be less than max ({max})")]
    EmptyRange { min: u32, max: u32 },

    #[error("cannot draw {k} distinct numbers from a range of {range}")]
    RangeTooSmall { k: usize, range: usize },

    #[error("value range of {range} numbers exceeds the limit of {limit}")]
    RangeTooLarge { range: usize, limit: usize },

    #[error("expected {expected} column labels, got {got}")]
    LabelCount { expected: usize, got: usize },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
