//! Ordered metadata mapping with typed accessors
//!
//! Keys keep their original order; unknown keys pass through untouched. Every mutating
//! accessor reports whether it changed anything, and the mapping remembers whether any
//! change happened since it was loaded.

use serde_yaml::{Mapping, Value};

/// Key holding the alias list
pub const ALIASES_KEY: &str = "aliases";
/// Legacy single-alias key, read but never written
pub const LEGACY_ALIAS_KEY: &str = "alias";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    map: Mapping,
    changed: bool,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mapping(map: Mapping) -> Self {
        Metadata {
            map,
            changed: false,
        }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether any accessor modified the mapping since it was loaded
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// String value of `key`, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.map.get(key).and_then(Value::as_str)
    }

    /// `key` is present and carries a non-empty value
    pub fn has_value(&self, key: &str) -> bool {
        self.map.get(key).is_some_and(is_filled)
    }

    /// Set `key` to `value` unless it already has a non-empty value.
    ///
    /// An existing key with an empty value is overwritten in place, keeping its position.
    pub fn fill_default(&mut self, key: &str, value: &str) -> bool {
        if self.has_value(key) {
            return false;
        }
        self.map
            .insert(Value::String(key.to_string()), Value::String(value.to_string()));
        self.changed = true;
        true
    }

    /// All aliases from `aliases` and the legacy `alias` key, in order, without duplicates
    pub fn aliases(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in [ALIASES_KEY, LEGACY_ALIAS_KEY] {
            for alias in string_items(self.map.get(key)) {
                if !out.contains(&alias) {
                    out.push(alias);
                }
            }
        }
        out
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases().iter().any(|a| a == name)
    }

    /// Append `name` to the `aliases` list.
    ///
    /// When `aliases` is empty but the legacy key holds values, those seed the new list.
    /// Returns false if the name is already a known alias.
    pub fn push_alias(&mut self, name: &str) -> bool {
        if self.has_alias(name) {
            return false;
        }

        let mut list = value_items(self.map.get(ALIASES_KEY));
        if list.is_empty() {
            list = value_items(self.map.get(LEGACY_ALIAS_KEY));
        }
        list.push(Value::String(name.to_string()));

        self.map
            .insert(Value::String(ALIASES_KEY.to_string()), Value::Sequence(list));
        self.changed = true;
        true
    }
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(m) => !m.is_empty(),
        _ => true,
    }
}

/// Items of a scalar-or-list value, as YAML values
fn value_items(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Sequence(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}

/// String items of a scalar-or-list value; non-string scalars are rendered as text
fn string_items(value: Option<&Value>) -> Vec<String> {
    value_items(value)
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}
