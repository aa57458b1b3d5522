//! Integration tests for drawaudit-core.
//!
//! These tests drive the public `analyze` entry point end to end:
//! raw rows → validation → aggregation → chi-square → report.

use drawaudit_core::{
    AnalysisConfig, ConfigError, RawRow, RejectKind, RejectReason, analyze, pairs_per_draw,
    validate_row,
};

fn csv_rows(lines: &[&str]) -> Vec<RawRow> {
    lines
        .iter()
        .map(|l| RawRow::from_tokens(l.split(',')))
        .collect()
}

/// Small deterministic dataset of 6-of-60 draws (LCG, rejection of repeats).
fn synthetic_draws(n: usize, seed: u64) -> Vec<RawRow> {
    let mut state = seed;
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let mut nums: Vec<u32> = Vec::with_capacity(6);
        while nums.len() < 6 {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let v = ((state >> 33) % 60) as u32 + 1;
            if !nums.contains(&v) {
                nums.push(v);
            }
        }
        rows.push(RawRow::from_tokens(nums.iter().map(|n| n.to_string())));
    }
    rows
}

#[test]
fn duplicate_row_rejected() {
    let cfg = AnalysisConfig::default();
    let row = RawRow::from_tokens("1,2,3,4,5,5".split(','));
    let err = validate_row(&row, &cfg).unwrap_err();
    assert_eq!(err.kind(), RejectKind::Duplicate);
}

#[test]
fn zero_is_out_of_range() {
    let cfg = AnalysisConfig::default();
    let row = RawRow::from_tokens("0,2,3,4,5,6".split(','));
    let err = validate_row(&row, &cfg).unwrap_err();
    assert_eq!(err.kind(), RejectKind::OutOfRange);
}

#[test]
fn extra_trailing_tokens_accepted() {
    let cfg = AnalysisConfig::default();
    let row = RawRow::from_tokens("4,5,30,33,41,52,extra,junk".split(','));
    let rec = validate_row(&row, &cfg).unwrap();
    assert_eq!(rec.numbers(), &[4, 5, 30, 33, 41, 52]);
}

#[test]
fn two_draw_example() {
    let report = analyze(
        &csv_rows(&["1,2,3,4,5,6", "1,2,7,8,9,10"]),
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert_eq!(report.pairs.count(1, 2), 2);
    assert_eq!(report.distribution.parity[3], 1);
    assert_eq!(report.distribution.sums.min, Some(21));
    assert_eq!(report.frequency.count(1), Some(2));
    assert_eq!(report.frequency.count(3), Some(1));
}

#[test]
fn totals_match_draw_count() {
    let rows = synthetic_draws(500, 0xdead_beef);
    let cfg = AnalysisConfig::default();
    let report = analyze(&rows, &cfg).unwrap();
    let draws = report.validation.valid as u64;
    assert_eq!(draws, 500);
    assert_eq!(report.frequency.counts().iter().sum::<u64>(), draws * 6);
    assert_eq!(report.pairs.total(), draws * pairs_per_draw(6));
    assert_eq!(report.distribution.parity.iter().sum::<u64>(), draws);
}

#[test]
fn unseen_numbers_have_zero_count() {
    let report = analyze(&csv_rows(&["1,2,3,4,5,6"]), &AnalysisConfig::default()).unwrap();
    for n in 7..=60 {
        assert_eq!(report.frequency.count(n), Some(0), "number {n}");
    }
    assert_eq!(report.frequency.len(), 60);
}

#[test]
fn degrees_of_freedom_independent_of_data() {
    let cfg = AnalysisConfig::new(5, 1, 80);
    for rows in [
        Vec::new(),
        csv_rows(&["1,2,3,4,5"]),
        csv_rows(&["1,2,3,4,5", "76,77,78,79,80", "garbage"]),
    ] {
        let report = analyze(&rows, &cfg).unwrap();
        assert_eq!(report.chi_square.degrees_of_freedom, 79);
    }
}

#[test]
fn zero_valid_draws_reports_undefined() {
    let report = analyze(
        &csv_rows(&["a,b,c,d,e,f", "1,2,3", "0,0,0,0,0,0"]),
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert_eq!(report.validation.valid, 0);
    assert_eq!(report.validation.rejected, 3);
    assert_eq!(report.distribution.sums.mean, None);
    assert_eq!(report.distribution.sums.min, None);
    assert_eq!(report.distribution.sums.max, None);
    assert!(!report.chi_square.defined);
    assert_eq!(report.chi_square.statistic, 0.0);
    assert!(report.last.is_none());
}

#[test]
fn rerun_is_identical() {
    let mut rows = synthetic_draws(200, 42);
    rows.push(RawRow::from_tokens("1,1,2,3,4,5".split(',')));
    let cfg = AnalysisConfig::default();
    let a = analyze(&rows, &cfg).unwrap();
    let b = analyze(&rows, &cfg).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert_eq!(a.chi_square.statistic.to_bits(), b.chi_square.statistic.to_bits());
}

#[test]
fn mixed_dataset_audit_trail() {
    let rows = csv_rows(&[
        "10,20,30,40,50,60",
        "10,20,30,40,50",
        "10,20,thirty,40,50,60",
        "10,20,30,40,50,61",
        "10,20,30,40,50,50",
        "5,15,25,35,45,55",
    ]);
    let report = analyze(&rows, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.validation.valid, 2);
    let reasons: Vec<RejectKind> = report
        .validation
        .rejections
        .iter()
        .map(|r| r.reason.kind())
        .collect();
    assert_eq!(
        reasons,
        vec![
            RejectKind::CountMismatch,
            RejectKind::NonNumeric,
            RejectKind::OutOfRange,
            RejectKind::Duplicate,
        ]
    );
    assert_eq!(
        report.validation.rejections[1].reason,
        RejectReason::NonNumeric {
            position: 2,
            token: "thirty".to_string()
        }
    );
    assert_eq!(report.last.unwrap().row_index, 5);
}

#[test]
fn invalid_config_is_fatal() {
    let rows = csv_rows(&["1,2,3,4,5,6"]);
    assert!(matches!(
        analyze(&rows, &AnalysisConfig::new(0, 1, 60)),
        Err(ConfigError::ZeroNumbersPerDraw)
    ));
    assert!(matches!(
        analyze(&rows, &AnalysisConfig::new(6, 60, 1)),
        Err(ConfigError::EmptyRange { min: 60, max: 1 })
    ));
}

#[test]
fn custom_range_quina_style() {
    let cfg = AnalysisConfig::new(5, 1, 80);
    let report = analyze(&csv_rows(&["80,1,40,41,2", "80,1,3,4,5"]), &cfg).unwrap();
    assert_eq!(report.frequency.count(80), Some(2));
    assert_eq!(report.pairs.count(80, 1), 2);
    assert_eq!(report.pairs.total(), 2 * pairs_per_draw(5));
    assert_eq!(report.meta.number_columns.len(), 5);
}
