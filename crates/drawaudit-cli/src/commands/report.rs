use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use drawaudit_core::{AnalysisReport, RejectKind, analyze};

use super::{DISCLAIMER, RangeArgs, chi_square_p_value, fmt_opt, grade_from_p, interpret_fit};
use crate::input::{Dataset, load_dataset};

pub struct ReportCommandConfig<'a> {
    pub inputs: &'a [String],
    pub range: RangeArgs<'a>,
    pub output_path: Option<&'a str>,
    pub top: usize,
}

pub fn run(cfg: ReportCommandConfig<'_>) -> Result<()> {
    let mut all_results = Vec::new();

    for input in cfg.inputs {
        let dataset = load_dataset(Path::new(input))?;
        let config = super::resolve_config(&cfg.range, &dataset)?;
        let report = analyze(&dataset.rows, &config)
            .with_context(|| format!("invalid analysis configuration for {input}"))?;
        let p = chi_square_p_value(&report.chi_square);
        println!(
            "  {:<28} {:>6} rows  {:>6} valid  X²={:>10}  grade {}",
            dataset.source_file,
            report.meta.rows,
            report.validation.valid,
            fmt_opt(report.chi_square.defined.then_some(report.chi_square.statistic), 3),
            grade_from_p(p)
        );
        all_results.push((dataset, report));
    }

    let text = generate_report(&all_results, cfg.top);
    match cfg.output_path {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("failed to write report to {path}"))?;
            println!("\n📄 Report saved to: {path}");
        }
        None => println!("\n{text}"),
    }
    Ok(())
}

/// Markdown audit report for one or more datasets.
pub fn generate_report(results: &[(Dataset, AnalysisReport)], top: usize) -> String {
    let mut out = String::new();
    out.push_str("# drawaudit — Draw Statistics Audit\n\n");
    let _ = writeln!(
        out,
        "Generated: {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out, "> {DISCLAIMER}\n");

    for (dataset, r) in results {
        write_dataset_section(&mut out, dataset, r, top);
        out.push_str("\n---\n\n");
    }
    out
}

fn write_dataset_section(out: &mut String, dataset: &Dataset, r: &AnalysisReport, top: usize) {
    let _ = writeln!(out, "## {}\n", dataset.name);
    let _ = writeln!(
        out,
        "- Source: `{}`\n- Rows: {} ({} valid, {} rejected)\n- Numbers per draw: {} in {}–{}\n- Columns: {}",
        dataset.source_file,
        r.meta.rows,
        r.validation.valid,
        r.validation.rejected,
        r.meta.numbers_per_draw,
        r.meta.min,
        r.meta.max,
        r.meta.number_columns.join(", ")
    );
    if let Some(last) = &r.last {
        let numbers: Vec<String> = last.numbers.iter().map(|n| n.to_string()).collect();
        let _ = writeln!(
            out,
            "- Last draw: {} {} (row {}): {}",
            last.label.as_deref().unwrap_or("—"),
            last.date.as_deref().unwrap_or(""),
            last.row_index + 1,
            numbers.join(" ")
        );
    }
    out.push('\n');

    if r.validation.rejected > 0 {
        out.push_str("### Rejected rows\n\n| Reason | Rows |\n|--------|------|\n");
        for kind in RejectKind::ALL {
            let n = r.validation.by_reason.get(&kind).copied().unwrap_or(0);
            if n > 0 {
                let _ = writeln!(out, "| {kind} | {n} |");
            }
        }
        out.push('\n');
    }

    out.push_str("### Most drawn numbers\n\n| Number | Count | Share |\n|--------|-------|-------|\n");
    for e in r.frequency.top(top) {
        let _ = writeln!(out, "| {} | {} | {:.2}% |", e.number, e.count, e.percentage);
    }
    out.push_str("\n### Least drawn numbers\n\n| Number | Count | Share |\n|--------|-------|-------|\n");
    for e in r.frequency.bottom(top) {
        let _ = writeln!(out, "| {} | {} | {:.2}% |", e.number, e.count, e.percentage);
    }

    out.push_str("\n### Most frequent pairs\n\n| Pair | Count |\n|------|-------|\n");
    for p in r.pairs.top(top) {
        let _ = writeln!(out, "| {}–{} | {} |", p.a, p.b, p.count);
    }

    let d = &r.distribution;
    out.push_str("\n### Parity\n\n| Even | Odd | Draws | Share |\n|------|-----|-------|-------|\n");
    for b in d.parity_buckets() {
        let _ = writeln!(out, "| {} | {} | {} | {:.1}% |", b.evens, b.odds, b.count, b.percentage);
    }
    let _ = writeln!(
        out,
        "\n### Sums\n\n- Mean: {}\n- Std dev: {}\n- Min: {}\n- Max: {}\n",
        fmt_opt(d.sums.mean, 2),
        fmt_opt(d.sums.std_dev, 2),
        fmt_opt(d.sums.min.map(|v| v as f64), 0),
        fmt_opt(d.sums.max.map(|v| v as f64), 0)
    );

    let c = &r.chi_square;
    let p = chi_square_p_value(c);
    out.push_str("### Chi-square goodness of fit (uniform)\n\n");
    let _ = writeln!(
        out,
        "| Statistic | df | Expected per number | p-value | Grade |\n|-----------|----|---------------------|---------|-------|\n| {} | {} | {} | {} | {} |\n",
        fmt_opt(c.defined.then_some(c.statistic), 4),
        c.degrees_of_freedom,
        fmt_opt(c.expected_per_number, 3),
        fmt_opt(p, 6),
        grade_from_p(p)
    );
    let _ = writeln!(out, "{}", interpret_fit(p));
}
