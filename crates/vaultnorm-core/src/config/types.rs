//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "vaultnorm.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormConfig {
    /// Corpus root, relative to the directory holding the config file
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Recognized content extension (without the leading dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Diagnostic report, relative to the corpus root (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,

    /// Metadata fields every document must carry after a repair pass
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,

    /// Tokens that mark a report row as a header when found at the start of the name cell
    #[serde(default = "default_header_tokens")]
    pub header_tokens: Vec<String>,

    /// Tokens that mark a report row as a header when they fill the ordinal cell
    #[serde(default = "default_ordinal_header_tokens")]
    pub ordinal_header_tokens: Vec<String>,

    /// How many unresolved names the run summary lists
    #[serde(default = "default_unresolved_sample")]
    pub unresolved_sample: usize,

    /// Default values synthesized for missing required fields
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// The two default tables: one for resolution targets, one for every other document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_target_table")]
    pub target: BTreeMap<String, String>,

    #[serde(default = "default_discovered_table")]
    pub discovered: BTreeMap<String, String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target: default_target_table(),
            discovered: default_discovered_table(),
        }
    }
}

impl Default for NormConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            extension: default_extension(),
            report: None,
            required_fields: default_required_fields(),
            header_tokens: default_header_tokens(),
            ordinal_header_tokens: default_ordinal_header_tokens(),
            unresolved_sample: default_unresolved_sample(),
            defaults: DefaultsConfig::default(),
        }
    }
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_required_fields() -> Vec<String> {
    ["type", "status", "created", "layer", "scope"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_header_tokens() -> Vec<String> {
    ["документ", "document", "name", "название", "файл", "file"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_ordinal_header_tokens() -> Vec<String> {
    ["№", "#", "no", "n"].iter().map(|s| s.to_string()).collect()
}

fn default_unresolved_sample() -> usize {
    10
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// `created` is absent on purpose: it is always the run date.
pub(crate) fn default_target_table() -> BTreeMap<String, String> {
    table(&[
        ("type", "doc"),
        ("status", "active"),
        ("layer", "methodology"),
        ("scope", "local-edge"),
    ])
}

pub(crate) fn default_discovered_table() -> BTreeMap<String, String> {
    table(&[
        ("type", "doc"),
        ("status", "draft"),
        ("layer", "operations"),
        ("scope", "local-edge"),
    ])
}
