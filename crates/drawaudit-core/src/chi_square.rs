//! Chi-square goodness-of-fit of observed frequencies against a uniform
//! expectation.
//!
//! Only the statistic and degrees of freedom are produced here. Turning them
//! into a p-value or verdict is left to whoever renders the report.

use serde::Serialize;

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareResult {
    /// Sum of `(observed - expected)^2 / expected`. Zero when undefined.
    pub statistic: f64,
    /// Range size minus one, independent of the data.
    pub degrees_of_freedom: usize,
    /// Total observed occurrences T.
    pub total_numbers_observed: u64,
    /// Expected count per number, `T / N`. `None` when undefined.
    pub expected_per_number: Option<f64>,
    /// False when nothing was observed and the test cannot be evaluated.
    pub defined: bool,
}

/// Evaluate the statistic over every number in the table's range.
pub fn chi_square_uniform(table: &FrequencyTable) -> ChiSquareResult {
    let range = table.len();
    let total = table.total();
    let degrees_of_freedom = range.saturating_sub(1);

    if total == 0 || range == 0 {
        return ChiSquareResult {
            statistic: 0.0,
            degrees_of_freedom,
            total_numbers_observed: total,
            expected_per_number: None,
            defined: false,
        };
    }

    let expected = total as f64 / range as f64;
    let statistic: f64 = table
        .counts()
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();

    ChiSquareResult {
        statistic,
        degrees_of_freedom,
        total_numbers_observed: total,
        expected_per_number: Some(expected),
        defined: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::frequency::count_frequencies;
    use crate::test_util::draw;

    #[test]
    fn test_perfectly_uniform_is_zero() {
        let cfg = AnalysisConfig::new(2, 1, 4);
        let draws = vec![draw(&[1, 2]), draw(&[3, 4])];
        let result = chi_square_uniform(&count_frequencies(&draws, &cfg));
        assert!(result.defined);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.degrees_of_freedom, 3);
        assert_eq!(result.expected_per_number, Some(1.0));
    }

    #[test]
    fn test_known_statistic() {
        // counts over 1..=4: [2, 2, 0, 0], T=4, E=1
        let cfg = AnalysisConfig::new(2, 1, 4);
        let draws = vec![draw(&[1, 2]), draw(&[1, 2])];
        let result = chi_square_uniform(&count_frequencies(&draws, &cfg));
        // (1 + 1 + 1 + 1) / 1
        assert!((result.statistic - 4.0).abs() < 1e-12);
        assert_eq!(result.total_numbers_observed, 4);
    }

    #[test]
    fn test_degrees_of_freedom_from_range() {
        let cfg = AnalysisConfig::default();
        let result = chi_square_uniform(&count_frequencies(&[draw(&[1, 2, 3, 4, 5, 6])], &cfg));
        assert_eq!(result.degrees_of_freedom, 59);
    }

    #[test]
    fn test_no_observations_undefined() {
        let cfg = AnalysisConfig::default();
        let result = chi_square_uniform(&count_frequencies(&[], &cfg));
        assert!(!result.defined);
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.degrees_of_freedom, 59);
        assert_eq!(result.expected_per_number, None);
    }
}
