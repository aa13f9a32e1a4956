//! Reference tokens: `[[Name]]`, `[[Name#Anchor]]`, `[[Name|Label]]`
//!
//! The display name is everything before the first `#` or `|`, trimmed. The rest of the
//! token (the suffix) is carried along verbatim and never takes part in matching.

use regex::Regex;
use std::sync::OnceLock;

static REFERENCE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn reference_re() -> Option<&'static Regex> {
    REFERENCE_RE
        .get_or_init(|| match Regex::new(r"\[\[([^\[\]\n]+)\]\]") {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile reference regex");
                None
            }
        })
        .as_ref()
}

/// One reference token inside a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Byte offset of the opening `[[`
    pub start: usize,
    /// Byte offset just past the closing `]]`
    pub end: usize,
    /// Display name, trimmed
    pub name: &'a str,
    /// Anchor and/or label suffix starting at `#` or `|`, possibly empty
    pub suffix: &'a str,
}

impl Reference<'_> {
    /// The same reference pointing at `target`, suffix preserved
    pub fn retarget(&self, target: &str) -> String {
        format!("[[{}{}]]", target, self.suffix)
    }
}

/// All references in `body`, in order of appearance
pub fn references(body: &str) -> Vec<Reference<'_>> {
    let Some(re) = reference_re() else {
        return Vec::new();
    };
    re.captures_iter(body)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let inner = cap.get(1)?.as_str();
            let cut = inner.find(['#', '|']).unwrap_or(inner.len());
            let name = inner[..cut].trim();
            if name.is_empty() {
                return None;
            }
            Some(Reference {
                start: whole.start(),
                end: whole.end(),
                name,
                suffix: &inner[cut..],
            })
        })
        .collect()
}
