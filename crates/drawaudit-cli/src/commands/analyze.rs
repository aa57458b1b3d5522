use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use drawaudit_core::{AnalysisReport, RejectKind, analyze};
use serde_json::json;

use super::{DISCLAIMER, RangeArgs, chi_square_p_value, fmt_opt, grade_from_p, interpret_fit};
use crate::input::{Dataset, load_dataset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AnalyzeView {
    Summary,
    Detailed,
}

pub struct AnalyzeCommandConfig<'a> {
    pub input: &'a str,
    pub range: RangeArgs<'a>,
    pub output_path: Option<&'a str>,
    pub view: &'a str,
    pub top: usize,
    pub all_pairs: bool,
}

pub fn run(cfg: AnalyzeCommandConfig<'_>) -> Result<()> {
    let view = AnalyzeView::parse(cfg.view);
    let dataset = load_dataset(Path::new(cfg.input))?;
    let config = super::resolve_config(&cfg.range, &dataset)?;
    let report = analyze(&dataset.rows, &config).context("invalid analysis configuration")?;

    println!(
        "Analyzing {} ({} rows, {} of {}-{}, view: {})...",
        dataset.source_file,
        report.meta.rows,
        config.numbers_per_draw,
        config.min,
        config.max,
        view.as_str()
    );
    if dataset.skipped_lines > 0 {
        println!("  ({} line(s) with a blank first column skipped)", dataset.skipped_lines);
    }

    match view {
        AnalyzeView::Summary => print_summary(&report, cfg.top),
        AnalyzeView::Detailed => print_detailed(&report, cfg.top),
    }
    println!("\n{DISCLAIMER}");

    if let Some(path) = cfg.output_path {
        let doc = export_document(&dataset, &report, cfg.top, cfg.all_pairs);
        let text = serde_json::to_string_pretty(&doc)?;
        std::fs::write(path, text).with_context(|| format!("failed to write {path}"))?;
        println!("\nResults written to {path}");
    }
    Ok(())
}

/// Interchange document for display or reporting tools.
pub fn export_document(
    dataset: &Dataset,
    report: &AnalysisReport,
    top: usize,
    all_pairs: bool,
) -> serde_json::Value {
    let p_value = chi_square_p_value(&report.chi_square);
    let pairs = if all_pairs {
        report.pairs.iter().collect::<Vec<_>>()
    } else {
        report.pairs.top(top)
    };

    json!({
        "meta": {
            "game_name": dataset.name,
            "source_file": dataset.source_file,
            "generated_at_utc": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "drawaudit_version": drawaudit_core::VERSION,
            "header": dataset.header,
            "rows": report.meta.rows,
            "valid_rows": report.meta.valid_rows,
            "rejected_rows": report.meta.rejected_rows,
            "number_columns": report.meta.number_columns,
            "numbers_per_draw": report.meta.numbers_per_draw,
            "min": report.meta.min,
            "max": report.meta.max,
            "total_numbers": report.meta.total_numbers,
        },
        "last": report.last,
        "validation": report.validation,
        "frequency": report.frequency,
        "pairs": {
            "distinct": report.pairs.len(),
            "total": report.pairs.total(),
            "entries": pairs,
        },
        "distribution": {
            "parity": report.distribution.parity_buckets(),
            "sums": report.distribution.sums,
        },
        "chi_square": {
            "statistic": report.chi_square.statistic,
            "degrees_of_freedom": report.chi_square.degrees_of_freedom,
            "total_numbers_observed": report.chi_square.total_numbers_observed,
            "expected_per_number": report.chi_square.expected_per_number,
            "defined": report.chi_square.defined,
            "p_value": p_value,
            "grade": grade_from_p(p_value).to_string(),
        },
        "disclaimer": DISCLAIMER,
    })
}

fn print_summary(r: &AnalysisReport, top: usize) {
    println!();
    println!("  ┌─ Validation");
    print_validation_line(r);
    println!("  └─");

    println!("  ┌─ Frequency ({} numbers observed)", r.frequency.total());
    println!("  │ Most drawn:  {}", join_counts(&r.frequency.top(top)));
    println!("  │ Least drawn: {}", join_counts(&r.frequency.bottom(top)));
    let unseen = r.frequency.unseen();
    if !unseen.is_empty() && r.frequency.total() > 0 {
        println!("  │ Never drawn: {}", join_numbers(&unseen));
    }
    println!("  └─");

    println!("  ┌─ Pairs ({} distinct)", r.pairs.len());
    println!("  │ Most frequent: {}", join_pairs(r, top));
    println!("  └─");

    print_distribution(r, false);
    print_chi_square(r);
}

fn print_detailed(r: &AnalysisReport, top: usize) {
    println!();
    println!("  ┌─ Validation");
    print_validation_line(r);
    for kind in RejectKind::ALL {
        let n = r.validation.by_reason.get(&kind).copied().unwrap_or(0);
        println!("  │ {:<14} {n}", kind.as_str());
    }
    for rej in &r.validation.rejections {
        println!(
            "  │ row {:>5}: {} [{}]",
            rej.row_index + 1,
            rej.reason,
            rej.row.tokens.join(" ")
        );
    }
    println!("  └─");

    println!("  ┌─ Frequency ({} numbers observed)", r.frequency.total());
    println!("  │ {:>6} {:>8} {:>8}", "Number", "Count", "Share");
    for e in r.frequency.entries() {
        println!("  │ {:>6} {:>8} {:>7.2}%", e.number, e.count, e.percentage);
    }
    println!("  └─");

    println!("  ┌─ Pairs ({} distinct, top {top})", r.pairs.len());
    for p in r.pairs.top(top) {
        println!("  │ {:>3} - {:<3} {:>6}", p.a, p.b, p.count);
    }
    println!("  └─");

    print_distribution(r, true);
    print_chi_square(r);
}

fn print_validation_line(r: &AnalysisReport) {
    let ratio = r.validation.valid_ratio().map(|x| x * 100.0);
    println!(
        "  │ {} valid, {} rejected ({}% valid)",
        r.validation.valid,
        r.validation.rejected,
        fmt_opt(ratio, 1)
    );
}

fn print_distribution(r: &AnalysisReport, histogram: bool) {
    let d = &r.distribution;
    println!("  ┌─ Distribution ({} draws)", d.sums.draws);
    println!(
        "  │ Sum: mean={} std={} min={} max={}",
        fmt_opt(d.sums.mean, 2),
        fmt_opt(d.sums.std_dev, 2),
        fmt_opt(d.sums.min.map(|v| v as f64), 0),
        fmt_opt(d.sums.max.map(|v| v as f64), 0)
    );
    match d.modal_evens() {
        Some(e) => println!(
            "  │ Most common parity split: {e} even / {} odd",
            d.parity.len() - 1 - e
        ),
        None => println!("  │ Parity: undefined"),
    }
    if histogram {
        for b in d.parity_buckets() {
            println!(
                "  │ {} even / {} odd: {:>6} ({:.1}%)",
                b.evens, b.odds, b.count, b.percentage
            );
        }
    }
    println!("  └─");
}

fn print_chi_square(r: &AnalysisReport) {
    let c = &r.chi_square;
    let p = chi_square_p_value(c);
    println!("  ┌─ Chi-square vs uniform");
    if c.defined {
        println!(
            "  │ X²={:.4} df={} p={} grade={}",
            c.statistic,
            c.degrees_of_freedom,
            fmt_opt(p, 4),
            grade_from_p(p)
        );
    } else {
        println!("  │ X²=undefined df={}", c.degrees_of_freedom);
    }
    println!("  │ What this means: {}", interpret_fit(p));
    println!("  └─");
}

fn join_counts(entries: &[drawaudit_core::NumberCount]) -> String {
    entries
        .iter()
        .map(|e| format!("{}({})", e.number, e.count))
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_pairs(r: &AnalysisReport, top: usize) -> String {
    let pairs = r.pairs.top(top);
    if pairs.is_empty() {
        return "none".to_string();
    }
    pairs
        .iter()
        .map(|p| format!("{}-{}({})", p.a, p.b, p.count))
        .collect::<Vec<_>>()
        .join(" ")
}

impl AnalyzeView {
    fn parse(s: &str) -> Self {
        match s {
            "detailed" => Self::Detailed,
            _ => Self::Summary,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Detailed => "detailed",
        }
    }
}
