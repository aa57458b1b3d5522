//! Delimited draw files → tokenized rows.
//!
//! One draw per line. Each line is split on the first of `,` `;` or tab it
//! contains, otherwise on whitespace. The first line is a header only when one
//! of its fields names a number, contest or date column (`Bola 1`, `Ball1`,
//! `Concurso`, `Data`, ...); any other first line is data and goes through
//! validation like the rest. Under a header, rows are projected onto the
//! number columns and the contest/date columns are attached to each row.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use drawaudit_core::RawRow;
use log::debug;
use regex::Regex;

static NUMBER_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(bola|ball|trevo|coluna|n)\s*\d+$").expect("static regex")
});
static ID_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(concurso|contest|draw|id)$").expect("static regex"));
static DATE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(data|date)").expect("static regex"));

/// A tokenized dataset ready for analysis.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File stem, used as the dataset name.
    pub name: String,
    pub source_file: String,
    pub header: Option<Vec<String>>,
    /// Labels of detected number columns, in header order.
    pub number_columns: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Data lines dropped before analysis (blank first column under a header).
    pub skipped_lines: usize,
}

/// Read and tokenize a draw file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    let source_file = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_dataset(&name, &source_file, &text))
}

/// Tokenize already-read text.
pub fn parse_dataset(name: &str, source_file: &str, text: &str) -> Dataset {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let mut header: Option<Vec<String>> = None;
    let mut first_data: Option<&str> = None;
    if let Some(first) = lines.next() {
        let fields = split_fields(first);
        if is_header(&fields) {
            header = Some(fields);
        } else {
            first_data = Some(first);
        }
    }

    let layout = header.as_deref().map(ColumnLayout::from_header);
    let number_columns = match (&header, &layout) {
        (Some(h), Some(l)) => l.numbers.iter().map(|&i| h[i].clone()).collect(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut skipped_lines = 0usize;
    for line in first_data.into_iter().chain(lines) {
        match &layout {
            Some(layout) => match layout.project(&split_fields(line)) {
                Some(row) => rows.push(row),
                None => skipped_lines += 1,
            },
            None => rows.push(RawRow::from_tokens(tokenize_line(line))),
        }
    }
    debug!(
        "{source_file}: {} row(s), {skipped_lines} skipped, header={}",
        rows.len(),
        header.is_some()
    );

    Dataset {
        name: name.to_string(),
        source_file: source_file.to_string(),
        header,
        number_columns,
        rows,
        skipped_lines,
    }
}

/// Split one line on its delimiter; tokens trimmed, empties dropped.
pub fn tokenize_line(line: &str) -> Vec<String> {
    split_fields(line).into_iter().filter(|t| !t.is_empty()).collect()
}

/// Split one line on its delimiter keeping empty fields, so column positions
/// survive.
fn split_fields(line: &str) -> Vec<String> {
    let parts: Vec<&str> = match [',', ';', '\t'].into_iter().find(|&d| line.contains(d)) {
        Some(delim) => line.split(delim).collect(),
        None => line.split_whitespace().collect(),
    };
    parts.into_iter().map(|t| t.trim().to_string()).collect()
}

fn is_header(fields: &[String]) -> bool {
    fields.iter().any(|f| {
        NUMBER_COLUMN.is_match(f) || ID_COLUMN.is_match(f) || DATE_COLUMN.is_match(f)
    })
}

/// Column indices of interest in a headed file.
#[derive(Debug, Clone)]
struct ColumnLayout {
    numbers: Vec<usize>,
    id: Option<usize>,
    date: Option<usize>,
}

impl ColumnLayout {
    fn from_header(header: &[String]) -> Self {
        let numbers = header
            .iter()
            .enumerate()
            .filter(|(_, h)| NUMBER_COLUMN.is_match(h.trim()))
            .map(|(i, _)| i)
            .collect();
        let id = header.iter().position(|h| ID_COLUMN.is_match(h.trim()));
        let date = header.iter().position(|h| DATE_COLUMN.is_match(h.trim()));
        Self { numbers, id, date }
    }

    /// Project a data line onto the number columns. Blank number cells are
    /// dropped. `None` when the first column is blank.
    fn project(&self, fields: &[String]) -> Option<RawRow> {
        if fields.first().is_none_or(|f| f.is_empty()) {
            return None;
        }
        let present = |i: &usize| fields.get(*i).filter(|f| !f.is_empty()).cloned();
        let mut row = if self.numbers.is_empty() {
            RawRow::from_tokens(fields.iter().filter(|f| !f.is_empty()).cloned())
        } else {
            RawRow::from_tokens(self.numbers.iter().filter_map(present))
        };
        if let Some(label) = self.id.as_ref().and_then(present) {
            row = row.with_label(label);
        }
        if let Some(date) = self.date.as_ref().and_then(present) {
            row = row.with_date(date);
        }
        Some(row)
    }
}
