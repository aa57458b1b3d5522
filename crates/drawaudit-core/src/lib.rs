//! # drawaudit-core
//!
//! **Descriptive statistics over historical lottery draws. Not predictions.**
//!
//! `drawaudit-core` audits a dataset of draw records: it validates each row,
//! counts how often every number and every pair of numbers was drawn,
//! summarizes the parity split and sum of each draw, and measures how far the
//! observed frequencies sit from a uniform distribution with a chi-square
//! statistic.
//!
//! ## Quick Start
//!
//! ```
//! use drawaudit_core::{AnalysisConfig, RawRow, analyze};
//!
//! let rows = vec![
//!     RawRow::from_tokens(["1", "2", "3", "4", "5", "6"]),
//!     RawRow::from_tokens(["1", "2", "7", "8", "9", "10"]),
//! ];
//! let report = analyze(&rows, &AnalysisConfig::default()).unwrap();
//!
//! assert_eq!(report.pairs.count(1, 2), 2);
//! assert_eq!(report.chi_square.degrees_of_freedom, 59);
//! ```
//!
//! ## Architecture
//!
//! Raw rows → Validator → {Frequency, Pairs, Distribution} → Chi-square → Report
//!
//! Reading files and rendering reports are not part of this crate: callers
//! hand in already-tokenized [`RawRow`]s and receive a serializable
//! [`AnalysisReport`].

pub mod analysis;
pub mod chi_square;
pub mod config;
pub mod distribution;
pub mod error;
pub mod frequency;
pub mod pairs;
pub mod record;

pub use analysis::{AnalysisReport, LastRecord, ReportMeta, ValidationSummary, analyze};
pub use chi_square::{ChiSquareResult, chi_square_uniform};
pub use config::{
    AnalysisConfig, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_NUMBERS_PER_DRAW, MAX_RANGE_SIZE,
    load_config_from_path,
};
pub use distribution::{DistributionSummary, ParityBucket, SumStats, summarize_distribution};
pub use error::ConfigError;
pub use frequency::{FrequencyTable, NumberCount, count_frequencies};
pub use pairs::{Pair, PairCount, PairTable, count_pairs, pairs_per_draw};
pub use record::{
    DrawRecord, RawRow, RejectKind, RejectReason, RejectedRow, parse_integer_token, validate_row,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
