//! Basic audit example.
//!
//! Builds a handful of rows in memory, runs the analysis, and prints the
//! headline numbers.
//!
//! Run: `cargo run --example basic`

use drawaudit_core::{AnalysisConfig, RawRow, analyze};

fn main() {
    let rows: Vec<RawRow> = [
        "4,5,30,33,41,52",
        "10,11,29,30,36,47",
        "1,5,11,17,20,43",
        "4,5,33,41,52,60,extra",
        "1,2,3,4,5,5",
    ]
    .iter()
    .map(|l| RawRow::from_tokens(l.split(',')))
    .collect();

    let report = match analyze(&rows, &AnalysisConfig::default()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return;
        }
    };

    println!(
        "Rows: {} ({} valid, {} rejected)",
        report.meta.rows, report.validation.valid, report.validation.rejected
    );
    for r in &report.validation.rejections {
        println!("  row {}: {}", r.row_index + 1, r.reason);
    }

    print!("Most drawn:");
    for e in report.frequency.top(5) {
        print!(" {}({})", e.number, e.count);
    }
    println!();

    print!("Top pairs:");
    for p in report.pairs.top(3) {
        print!(" {}-{}({})", p.a, p.b, p.count);
    }
    println!();

    if let Some(mean) = report.distribution.sums.mean {
        println!("Mean sum per draw: {mean:.1}");
    }
    println!(
        "Chi-square: {:.3} with {} degrees of freedom",
        report.chi_square.statistic, report.chi_square.degrees_of_freedom
    );
}
