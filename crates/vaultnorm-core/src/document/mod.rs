//! Documents: one text file of the corpus, split into metadata block and body

pub mod frontmatter;
pub mod metadata;

use crate::error::Result;
use frontmatter::Parsed;
pub use metadata::Metadata;

/// A document loaded from the corpus.
///
/// Keeps the original metadata block verbatim so a document whose metadata was not
/// modified renders back with its header untouched.
#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    basename: String,
    stem: String,
    title: Option<String>,
    metadata: Metadata,
    body: String,
    header: Option<String>,
    malformed: Option<String>,
    body_changed: bool,
}

impl Document {
    /// Parse a document from its corpus-relative path and text.
    ///
    /// Never fails: a malformed metadata block yields empty metadata.
    pub fn parse(path: impl Into<String>, text: &str) -> Self {
        let path = path.into();
        let split = frontmatter::split(text);

        let (metadata, malformed) = match frontmatter::parse(&split) {
            Parsed::Absent => (Metadata::new(), None),
            Parsed::Mapping(map) => (Metadata::from_mapping(map), None),
            Parsed::Malformed(reason) => {
                tracing::warn!(path = %path, reason = %reason, "malformed metadata block, treating as empty");
                (Metadata::new(), Some(reason))
            }
        };

        let basename = basename_of(&path).to_string();
        let stem = stem_of(&basename).to_string();

        Document {
            title: primary_title(split.body),
            header: split.header.map(str::to_string),
            body: split.body.to_string(),
            path,
            basename,
            stem,
            metadata,
            malformed,
            body_changed: false,
        }
    }

    /// Corpus-relative path, `/`-separated
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name including extension; the canonical rewrite target
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// File name without extension
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// First top-level heading of the body
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the body; marks the document for persisting
    pub fn set_body(&mut self, body: String) {
        if body != self.body {
            self.body = body;
            self.body_changed = true;
        }
    }

    /// Parse error of the original metadata block, if it was malformed
    pub fn malformed(&self) -> Option<&str> {
        self.malformed.as_deref()
    }

    /// Whether the document differs from what was loaded
    pub fn is_dirty(&self) -> bool {
        self.body_changed || self.metadata.is_changed()
    }

    /// Render the document back to text.
    ///
    /// The metadata block is re-serialized only when the metadata changed; the body is
    /// always emitted as-is.
    pub fn render(&self) -> Result<String> {
        let header = match (&self.header, self.metadata.is_changed()) {
            (_, true) => frontmatter::render(self.metadata.as_mapping())?,
            (Some(raw), false) => raw.clone(),
            (None, false) => String::new(),
        };
        Ok(format!("{}{}", header, self.body))
    }
}

fn basename_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn stem_of(basename: &str) -> &str {
    match basename.rfind('.') {
        Some(0) | None => basename,
        Some(i) => &basename[..i],
    }
}

/// First `# Heading` line of `body`, skipping fenced code blocks
fn primary_title(body: &str) -> Option<String> {
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(rest) = line.strip_prefix('#') {
            if rest.starts_with([' ', '\t']) {
                let title = rest.trim();
                if !title.is_empty() {
                    return Some(title.to_string());
                }
            }
        }
    }
    None
}
