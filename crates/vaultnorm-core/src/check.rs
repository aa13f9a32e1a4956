//! Read-only corpus checks: broken references and incomplete metadata

use std::collections::BTreeSet;

use serde::Serialize;

use crate::corpus::{DocumentFailure, Snapshot};
use crate::document::Document;
use crate::index::DocumentIndex;
use crate::reference::references;
use crate::repair::RepairContext;

/// A reference whose name lands on no document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenReference {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    pub path: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedMetadata {
    pub path: String,
    pub reason: String,
}

/// Result of a check run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub documents_scanned: usize,
    pub broken_references: Vec<BrokenReference>,
    pub missing_fields: Vec<MissingFields>,
    pub malformed_metadata: Vec<MalformedMetadata>,
    pub skipped: Vec<DocumentFailure>,
}

impl CheckReport {
    pub fn issue_count(&self) -> usize {
        self.broken_references.len() + self.missing_fields.len() + self.malformed_metadata.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }
}

/// References in `doc` that the index cannot place, one entry per distinct name
pub fn broken_references(doc: &Document, index: &DocumentIndex) -> Vec<BrokenReference> {
    let mut seen = BTreeSet::new();
    references(doc.body())
        .into_iter()
        .filter(|r| !index.knows(r.name) && seen.insert(r.name))
        .map(|r| BrokenReference {
            path: doc.path().to_string(),
            name: r.name.to_string(),
        })
        .collect()
}

/// Distinct names of all broken references in the snapshot
pub fn broken_names(documents: &[Document], index: &DocumentIndex) -> BTreeSet<String> {
    documents
        .iter()
        .flat_map(|doc| broken_references(doc, index))
        .map(|b| b.name)
        .collect()
}

/// Check every document of the snapshot
#[tracing::instrument(skip_all, fields(documents = snapshot.documents.len()))]
pub fn run_checks(
    snapshot: &Snapshot,
    index: &DocumentIndex,
    repair: &RepairContext<'_>,
) -> CheckReport {
    let mut report = CheckReport {
        documents_scanned: snapshot.documents.len(),
        skipped: snapshot.skipped.clone(),
        ..Default::default()
    };

    for doc in &snapshot.documents {
        report
            .broken_references
            .extend(broken_references(doc, index));

        let fields = repair.missing(doc.metadata());
        if !fields.is_empty() {
            report.missing_fields.push(MissingFields {
                path: doc.path().to_string(),
                fields,
            });
        }

        if let Some(reason) = doc.malformed() {
            report.malformed_metadata.push(MalformedMetadata {
                path: doc.path().to_string(),
                reason: reason.to_string(),
            });
        }
    }

    report
}
