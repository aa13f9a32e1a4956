//! Candidate names from a diagnostic report
//!
//! The report is a markdown document containing pipe-delimited table rows shaped as
//! `| <ordinal> | <name> | ... |`. Rows are classified by content, never by position:
//! header rows carry header tokens, separator rows consist only of `-`, `:` and spaces.

use std::collections::BTreeSet;

use crate::config::NormConfig;
use crate::reference::references;

/// Classification of one table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'a> {
    HeaderRow,
    SeparatorRow,
    DataRow { ordinal: &'a str, name: &'a str },
}

/// Tokens used to recognize header rows, compared case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTokens {
    name: Vec<String>,
    ordinal: Vec<String>,
}

impl HeaderTokens {
    pub fn new(
        name: impl IntoIterator<Item = impl AsRef<str>>,
        ordinal: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        HeaderTokens {
            name: name.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
            ordinal: ordinal
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &NormConfig) -> Self {
        Self::new(&config.header_tokens, &config.ordinal_header_tokens)
    }
}

impl Default for HeaderTokens {
    fn default() -> Self {
        Self::from_config(&NormConfig::default())
    }
}

/// Classify one line of the report.
///
/// Returns `None` for lines that are not table rows, rows with fewer than three cells
/// and rows whose name cell is empty.
pub fn classify_row<'a>(line: &'a str, tokens: &HeaderTokens) -> Option<RowKind<'a>> {
    let line = line.trim();
    if !line.starts_with('|') {
        return None;
    }

    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.len() < 3 {
        return None;
    }

    let filled: Vec<&str> = cells.iter().copied().filter(|c| !c.is_empty()).collect();
    if !filled.is_empty() && filled.iter().all(|c| is_separator_cell(c)) {
        return Some(RowKind::SeparatorRow);
    }

    let (ordinal, name) = (cells[1], cells[2]);
    if name.is_empty() {
        return None;
    }
    if is_separator_cell(name) {
        return Some(RowKind::SeparatorRow);
    }
    if is_header(ordinal, name, tokens) {
        return Some(RowKind::HeaderRow);
    }

    Some(RowKind::DataRow { ordinal, name })
}

/// Strip markup from a name cell.
///
/// A cell holding a reference yields that reference's display name. Otherwise
/// backticks and brackets are removed along with trailing periods and whitespace.
pub fn clean_name(cell: &str) -> String {
    if let Some(reference) = references(cell).first() {
        return reference.name.to_string();
    }

    let stripped: String = cell
        .chars()
        .filter(|c| !matches!(c, '`' | '[' | ']'))
        .collect();
    stripped
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_start()
        .to_string()
}

/// Every distinct candidate name found in the data rows of `report`
pub fn extract_candidates(report: &str, tokens: &HeaderTokens) -> BTreeSet<String> {
    report
        .lines()
        .filter_map(|line| match classify_row(line, tokens)? {
            RowKind::DataRow { name, .. } => Some(clean_name(name)),
            RowKind::HeaderRow | RowKind::SeparatorRow => None,
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn is_separator_cell(cell: &str) -> bool {
    cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
}

fn is_ordinal(cell: &str) -> bool {
    let digits = cell.trim_end_matches('.');
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_header(ordinal: &str, name: &str, tokens: &HeaderTokens) -> bool {
    if is_ordinal(ordinal) {
        return false;
    }
    let ordinal = ordinal.to_lowercase();
    if tokens.ordinal.iter().any(|t| *t == ordinal) {
        return true;
    }
    let name = name.to_lowercase();
    tokens.name.iter().any(|t| name.starts_with(t.as_str()))
}
