//! Splitting a document into its leading metadata block and body
//!
//! The block opens with a `---` line at the very start of the text and closes at the
//! next line consisting of exactly `---`. Everything after the closing line is body,
//! byte-for-byte.

use serde_yaml::{Mapping, Value};

/// Marker line that opens and closes the metadata block
pub const DELIMITER: &str = "---";

/// A document's text split at the metadata block boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// Full block including both delimiter lines, if the text has one
    pub header: Option<&'a str>,
    /// Block content between the delimiters
    pub yaml: Option<&'a str>,
    /// Remaining text
    pub body: &'a str,
}

/// Outcome of parsing the block content
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// No block at all
    Absent,
    /// Block parsed into a mapping (possibly empty)
    Mapping(Mapping),
    /// Block present but not a YAML mapping; treated as empty metadata
    Malformed(String),
}

/// Split `text` into header and body.
///
/// An opening delimiter without a closing one is not a block: the whole text is body.
pub fn split(text: &str) -> Split<'_> {
    let no_block = Split {
        header: None,
        yaml: None,
        body: text,
    };

    let open_len = match first_line_len(text) {
        Some(len) if is_delimiter(&text[..len]) => len,
        _ => return no_block,
    };

    let mut offset = open_len;
    while offset < text.len() {
        let rest = &text[offset..];
        let line_len = first_line_len(rest).unwrap_or(rest.len());
        if is_delimiter(&rest[..line_len]) {
            let end = offset + line_len;
            return Split {
                header: Some(&text[..end]),
                yaml: Some(&text[open_len..offset]),
                body: &text[end..],
            };
        }
        offset += line_len;
    }

    no_block
}

/// Parse the block content of a split document
pub fn parse(split: &Split<'_>) -> Parsed {
    let Some(yaml) = split.yaml else {
        return Parsed::Absent;
    };
    if yaml.trim().is_empty() {
        return Parsed::Mapping(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => Parsed::Mapping(mapping),
        Ok(Value::Null) => Parsed::Mapping(Mapping::new()),
        Ok(_) => Parsed::Malformed("metadata block is not a key/value mapping".to_string()),
        Err(e) => Parsed::Malformed(e.to_string()),
    }
}

/// Render a metadata block with delimiters
pub fn render(mapping: &Mapping) -> crate::error::Result<String> {
    let yaml = serde_yaml::to_string(mapping)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

/// Length of the first line including its terminator, or `None` if there is no terminator
fn first_line_len(text: &str) -> Option<usize> {
    text.find('\n').map(|i| i + 1)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}
