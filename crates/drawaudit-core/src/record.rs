//! Raw rows, validated draws, and the record validator.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::config::AnalysisConfig;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One tokenized input line, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRow {
    pub tokens: Vec<String>,
    /// Draw identifier (contest number), when the source has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Draw date as given in the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RawRow {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            label: None,
            date: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl From<Vec<&str>> for RawRow {
    fn from(tokens: Vec<&str>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<Vec<String>> for RawRow {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

/// A validated draw: exactly K distinct in-range numbers, kept ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    numbers: Vec<u32>,
}

impl DrawRecord {
    /// Numbers of the draw in ascending order.
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, n: u32) -> bool {
        self.numbers.binary_search(&n).is_ok()
    }

    /// Arithmetic sum of the drawn numbers.
    pub fn sum(&self) -> u64 {
        self.numbers.iter().map(|&n| n as u64).sum()
    }

    /// Count of even numbers in the draw.
    pub fn evens(&self) -> usize {
        self.numbers.iter().filter(|&&n| n % 2 == 0).count()
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// A required token is not an integer.
    NonNumeric { position: usize, token: String },
    /// Fewer than K usable numeric tokens.
    CountMismatch { expected: usize, found: usize },
    /// A parsed number lies outside `[min, max]`.
    OutOfRange { position: usize, value: i64 },
    /// The K parsed numbers are not all distinct.
    Duplicate { value: u32 },
}

/// Fieldless view of [`RejectReason`] for tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectKind {
    NonNumeric,
    CountMismatch,
    OutOfRange,
    Duplicate,
}

impl RejectKind {
    pub const ALL: [RejectKind; 4] = [
        RejectKind::NonNumeric,
        RejectKind::CountMismatch,
        RejectKind::OutOfRange,
        RejectKind::Duplicate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NonNumeric => "NonNumeric",
            Self::CountMismatch => "CountMismatch",
            Self::OutOfRange => "OutOfRange",
            Self::Duplicate => "Duplicate",
        }
    }
}

impl fmt::Display for RejectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RejectReason {
    pub fn kind(&self) -> RejectKind {
        match self {
            Self::NonNumeric { .. } => RejectKind::NonNumeric,
            Self::CountMismatch { .. } => RejectKind::CountMismatch,
            Self::OutOfRange { .. } => RejectKind::OutOfRange,
            Self::Duplicate { .. } => RejectKind::Duplicate,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNumeric { position, token } => {
                write!(f, "token {} ({token:?}) is not an integer", position + 1)
            }
            Self::CountMismatch { expected, found } => {
                write!(f, "expected {expected} numbers, found {found}")
            }
            Self::OutOfRange { position, value } => {
                write!(f, "number {value} at position {} is out of range", position + 1)
            }
            Self::Duplicate { value } => write!(f, "number {value} appears more than once"),
        }
    }
}

/// A row that failed validation, with its zero-based input index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row_index: usize,
    pub row: RawRow,
    #[serde(flatten)]
    pub reason: RejectReason,
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validate one row against `config`.
///
/// Only the first K tokens are considered. Checks run in order: every
/// considered token must be an integer, there must be K of them, each must
/// lie in range, and they must be distinct.
pub fn validate_row(row: &RawRow, config: &AnalysisConfig) -> Result<DrawRecord, RejectReason> {
    let k = config.numbers_per_draw;
    let considered = &row.tokens[..row.tokens.len().min(k)];

    let mut parsed = Vec::with_capacity(k);
    for (position, token) in considered.iter().enumerate() {
        match parse_integer_token(token) {
            Some(value) => parsed.push(value),
            None => {
                return Err(RejectReason::NonNumeric {
                    position,
                    token: token.clone(),
                });
            }
        }
    }

    if parsed.len() < k {
        return Err(RejectReason::CountMismatch {
            expected: k,
            found: parsed.len(),
        });
    }

    let mut numbers = Vec::with_capacity(k);
    for (position, &value) in parsed.iter().enumerate() {
        match u32::try_from(value) {
            Ok(n) if config.contains(n) => numbers.push(n),
            _ => return Err(RejectReason::OutOfRange { position, value }),
        }
    }

    let mut seen = BTreeSet::new();
    for &n in &numbers {
        if !seen.insert(n) {
            return Err(RejectReason::Duplicate { value: n });
        }
    }

    numbers.sort_unstable();
    Ok(DrawRecord { numbers })
}

/// Parse an integer token: optional sign, ASCII digits, and optionally a
/// `.` followed only by zeros (spreadsheet exports write `"7.0"`). Exponents
/// and any other fraction are not integers.
pub fn parse_integer_token(token: &str) -> Option<i64> {
    let s = token.trim();
    let int_part = match s.split_once('.') {
        Some((int, frac)) if !frac.is_empty() && frac.bytes().all(|b| b == b'0') => int,
        Some(_) => return None,
        None => s,
    };
    let digits = int_part.strip_prefix(['+', '-']).unwrap_or(int_part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    int_part.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(s: &str) -> RawRow {
        RawRow::from_tokens(s.split(','))
    }

    #[test]
    fn test_valid_row() {
        let cfg = AnalysisConfig::default();
        let rec = validate_row(&row("52,4,30,5,41,33"), &cfg).unwrap();
        assert_eq!(rec.numbers(), &[4, 5, 30, 33, 41, 52]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let cfg = AnalysisConfig::default();
        let err = validate_row(&row("1,2,3,4,5,5"), &cfg).unwrap_err();
        assert_eq!(err, RejectReason::Duplicate { value: 5 });
        assert_eq!(err.kind(), RejectKind::Duplicate);
    }

    #[test]
    fn test_below_min_rejected() {
        let cfg = AnalysisConfig::default();
        let err = validate_row(&row("0,2,3,4,5,6"), &cfg).unwrap_err();
        assert_eq!(
            err,
            RejectReason::OutOfRange {
                position: 0,
                value: 0
            }
        );
    }

    #[test]
    fn test_above_max_and_negative_rejected() {
        let cfg = AnalysisConfig::default();
        let err = validate_row(&row("1,2,3,4,5,61"), &cfg).unwrap_err();
        assert_eq!(err.kind(), RejectKind::OutOfRange);
        let err = validate_row(&row("1,2,-3,4,5,6"), &cfg).unwrap_err();
        assert_eq!(
            err,
            RejectReason::OutOfRange {
                position: 2,
                value: -3
            }
        );
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let cfg = AnalysisConfig::default();
        let rec = validate_row(&row("4,5,30,33,41,52,extra,junk"), &cfg).unwrap();
        assert_eq!(rec.numbers(), &[4, 5, 30, 33, 41, 52]);
    }

    #[test]
    fn test_non_numeric_rejected() {
        let cfg = AnalysisConfig::default();
        let err = validate_row(&row("1,2,x,4,5,6"), &cfg).unwrap_err();
        assert_eq!(
            err,
            RejectReason::NonNumeric {
                position: 2,
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_short_row_rejected() {
        let cfg = AnalysisConfig::default();
        let err = validate_row(&row("1,2,3"), &cfg).unwrap_err();
        assert_eq!(
            err,
            RejectReason::CountMismatch {
                expected: 6,
                found: 3
            }
        );
        let err = validate_row(&RawRow::default(), &cfg).unwrap_err();
        assert_eq!(err.kind(), RejectKind::CountMismatch);
    }

    #[test]
    fn test_whitespace_and_decimal_tokens() {
        let cfg = AnalysisConfig::default();
        let rec = validate_row(&row(" 01, 2.0 ,3,4,5,6"), &cfg).unwrap();
        assert_eq!(rec.numbers(), &[1, 2, 3, 4, 5, 6]);
        let err = validate_row(&row("1.5,2,3,4,5,6"), &cfg).unwrap_err();
        assert_eq!(err.kind(), RejectKind::NonNumeric);
    }

    #[test]
    fn test_exponent_token_rejected() {
        let cfg = AnalysisConfig::default();
        for line in ["1e1,2,3,4,5,6", "6e0,1,2,3,4,5", "1,2,3,4,5,1E1"] {
            let err = validate_row(&row(line), &cfg).unwrap_err();
            assert_eq!(err.kind(), RejectKind::NonNumeric, "{line}");
        }
    }

    #[test]
    fn test_near_integer_decimal_rejected() {
        let cfg = AnalysisConfig::default();
        let err = validate_row(&row("4.0000000000000001,2,3,5,7,9"), &cfg).unwrap_err();
        assert_eq!(
            err,
            RejectReason::NonNumeric {
                position: 0,
                token: "4.0000000000000001".to_string()
            }
        );
    }

    #[test]
    fn test_parse_integer_token() {
        assert_eq!(parse_integer_token(" 07 "), Some(7));
        assert_eq!(parse_integer_token("+3"), Some(3));
        assert_eq!(parse_integer_token("-2"), Some(-2));
        assert_eq!(parse_integer_token("12.000"), Some(12));
        assert_eq!(parse_integer_token("12."), None);
        assert_eq!(parse_integer_token(".0"), None);
        assert_eq!(parse_integer_token("1_000"), None);
        assert_eq!(parse_integer_token("inf"), None);
        assert_eq!(parse_integer_token("99999999999999999999"), None);
        assert_eq!(parse_integer_token(""), None);
    }

    #[test]
    fn test_sum_and_evens() {
        let cfg = AnalysisConfig::default();
        let rec = validate_row(&row("1,2,3,4,5,6"), &cfg).unwrap();
        assert_eq!(rec.sum(), 21);
        assert_eq!(rec.evens(), 3);
        assert!(rec.contains(4));
        assert!(!rec.contains(7));
    }

    #[test]
    fn test_reason_display() {
        let r = RejectReason::Duplicate { value: 5 };
        assert_eq!(r.to_string(), "number 5 appears more than once");
        assert_eq!(RejectKind::OutOfRange.to_string(), "OutOfRange");
    }
}
