//! Resolution of candidate names to target documents
//!
//! Four signals are evaluated for every name and their matches unioned:
//!
//! 1. exact basename (`name` + extension)
//! 2. exact primary title
//! 3. case-insensitive substring of any basename
//! 4. case-insensitive substring of any primary title
//!
//! One distinct match wins outright. Several matches are broken by the shortest path
//! (in characters), then the lexicographically smallest path. This rule is a plain
//! heuristic carried over for compatibility; it does not prefer exact matches over
//! substring matches and makes no claim of semantic correctness.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::index::{DocId, DocumentIndex, IndexEntry};

/// Outcome of resolving one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    Unique(DocId),
    /// Several documents matched; `winner` was picked by the tie-break
    Ambiguous { winner: DocId, matches: Vec<DocId> },
}

impl Resolution {
    pub fn target(&self) -> Option<DocId> {
        match self {
            Resolution::Unresolved => None,
            Resolution::Unique(id) | Resolution::Ambiguous { winner: id, .. } => Some(*id),
        }
    }
}

/// Per-run association of candidate names to winning documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionMapping {
    pub resolved: BTreeMap<String, DocId>,
    pub unresolved: BTreeSet<String>,
    /// Names that needed the tie-break, with the number of documents they matched
    pub ambiguous: BTreeMap<String, usize>,
}

impl ResolutionMapping {
    pub fn target(&self, name: &str) -> Option<DocId> {
        self.resolved.get(name).copied()
    }
}

/// Resolves names against an immutable index
pub struct Resolver<'a> {
    index: &'a DocumentIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a DocumentIndex) -> Self {
        Resolver { index }
    }

    /// Every distinct document matched by any signal, in first-seen order
    pub fn matches(&self, name: &str) -> Vec<DocId> {
        let mut found: Vec<DocId> = Vec::new();
        if name.trim().is_empty() {
            return found;
        }

        let mut push = |id: DocId| {
            if !found.contains(&id) {
                found.push(id);
            }
        };

        let exact_basename = format!("{}.{}", name, self.index.extension());
        if let Some(entry) = self.index.by_basename(&exact_basename) {
            push(entry.id);
        }
        if let Some(entry) = self.index.by_title(name) {
            push(entry.id);
        }

        let needle = name.to_lowercase();
        for entry in self.index.entries() {
            if self.index.by_basename(&entry.basename).map(|e| e.id) == Some(entry.id)
                && entry.basename.to_lowercase().contains(&needle)
            {
                push(entry.id);
            }
        }
        for (title, entry) in self.index.titles() {
            if title.to_lowercase().contains(&needle) {
                push(entry.id);
            }
        }

        found
    }

    pub fn resolve_name(&self, name: &str) -> Resolution {
        let matches = self.matches(name);
        match matches.len() {
            0 => Resolution::Unresolved,
            1 => Resolution::Unique(matches[0]),
            _ => {
                let winner = matches
                    .iter()
                    .filter_map(|&id| self.index.entry(id))
                    .min_by(|a, b| tie_break(a, b))
                    .map(|e| e.id)
                    .unwrap_or(matches[0]);
                Resolution::Ambiguous { winner, matches }
            }
        }
    }

    /// Resolve every name of the candidate set
    #[tracing::instrument(skip(self, names), fields(candidates = names.len()))]
    pub fn resolve(&self, names: &BTreeSet<String>) -> ResolutionMapping {
        let mut mapping = ResolutionMapping::default();

        for name in names {
            match self.resolve_name(name) {
                Resolution::Unresolved => {
                    tracing::debug!(name = %name, "unresolved");
                    mapping.unresolved.insert(name.clone());
                }
                Resolution::Unique(id) => {
                    mapping.resolved.insert(name.clone(), id);
                }
                Resolution::Ambiguous { winner, matches } => {
                    tracing::info!(
                        name = %name,
                        matches = matches.len(),
                        winner = self.index.entry(winner).map(|e| e.path.as_str()).unwrap_or_default(),
                        "ambiguous name resolved by shortest path"
                    );
                    mapping.ambiguous.insert(name.clone(), matches.len());
                    mapping.resolved.insert(name.clone(), winner);
                }
            }
        }

        mapping
    }
}

fn tie_break(a: &IndexEntry, b: &IndexEntry) -> Ordering {
    a.path
        .chars()
        .count()
        .cmp(&b.path.chars().count())
        .then_with(|| a.path.cmp(&b.path))
}

/// Serializable view of a mapping, with paths instead of snapshot positions
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub resolved: Vec<ResolvedName>,
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedName {
    pub name: String,
    pub target: String,
    pub basename: String,
    /// Number of matching documents when the tie-break was needed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiguous: Option<usize>,
}

impl ResolutionReport {
    pub fn new(mapping: &ResolutionMapping, index: &DocumentIndex) -> Self {
        let resolved = mapping
            .resolved
            .iter()
            .filter_map(|(name, &id)| {
                let entry = index.entry(id)?;
                Some(ResolvedName {
                    name: name.clone(),
                    target: entry.path.clone(),
                    basename: entry.basename.clone(),
                    ambiguous: mapping.ambiguous.get(name).copied(),
                })
            })
            .collect();

        ResolutionReport {
            resolved,
            unresolved: mapping.unresolved.iter().cloned().collect(),
        }
    }
}
