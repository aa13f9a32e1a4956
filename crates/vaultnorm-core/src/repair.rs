//! Metadata repair: required-field backfill and alias bookkeeping

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::{types, DefaultsConfig};
use crate::document::Metadata;

/// Field whose default is the run date unless a table overrides it
pub const CREATED_FIELD: &str = "created";

/// Value used for a required field no table mentions
pub const FALLBACK_VALUE: &str = "unknown";

/// Which default table applies to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultContext {
    /// The document is the target of at least one resolved name
    Target,
    /// Any other document
    Discovered,
}

/// Fixed default values for missing required fields.
///
/// Configured entries override the built-in tables key by key.
/// A blank configured value counts as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTable {
    target: BTreeMap<String, String>,
    discovered: BTreeMap<String, String>,
    today: NaiveDate,
}

impl DefaultTable {
    pub fn new(config: &DefaultsConfig, today: NaiveDate) -> Self {
        let mut target = types::default_target_table();
        target.extend(config.target.clone());
        let mut discovered = types::default_discovered_table();
        discovered.extend(config.discovered.clone());

        DefaultTable {
            target,
            discovered,
            today,
        }
    }

    pub fn value_for(&self, field: &str, context: DefaultContext) -> String {
        let table = match context {
            DefaultContext::Target => &self.target,
            DefaultContext::Discovered => &self.discovered,
        };
        if let Some(value) = table.get(field).filter(|v| !v.trim().is_empty()) {
            return value.clone();
        }
        if field == CREATED_FIELD {
            return self.today.format("%Y-%m-%d").to_string();
        }
        FALLBACK_VALUE.to_string()
    }
}

/// Required fields plus the table used to fill them
#[derive(Debug, Clone)]
pub struct RepairContext<'a> {
    pub required: &'a [String],
    pub defaults: &'a DefaultTable,
}

impl RepairContext<'_> {
    /// Fill every missing or empty required field; returns the names of the fields filled
    pub fn ensure_required(&self, metadata: &mut Metadata, context: DefaultContext) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| {
                let value = self.defaults.value_for(field, context);
                metadata.fill_default(field, &value)
            })
            .cloned()
            .collect()
    }

    /// Fields of `metadata` that are missing or empty
    pub fn missing(&self, metadata: &Metadata) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| !metadata.has_value(field))
            .cloned()
            .collect()
    }
}

/// Record `name` as an alias of a document with stem `stem`.
///
/// Nothing happens when the name equals the stem or is already an alias.
pub fn add_alias(metadata: &mut Metadata, name: &str, stem: &str) -> bool {
    if name == stem {
        return false;
    }
    metadata.push_alias(name)
}
