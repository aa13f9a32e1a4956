use serde::Serialize;

use crate::corpus::DocumentFailure;

/// Outcome of one normalization run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files_indexed: usize,
    /// Documents that could not be read or decoded
    pub skipped: Vec<DocumentFailure>,
    pub candidates: usize,
    pub resolved: usize,
    /// Resolved names that needed the shortest-path tie-break
    pub ambiguous: usize,
    pub unresolved: usize,
    /// First unresolved names in lexicographic order, bounded by configuration
    pub unresolved_sample: Vec<String>,
    /// Documents written (or that would be written, on a dry run)
    pub files_touched: usize,
    pub fields_repaired: usize,
    pub aliases_added: usize,
    pub substitutions: usize,
    /// Documents whose write failed
    pub failures: Vec<DocumentFailure>,
    pub dry_run: bool,
}

impl RunSummary {
    /// True when at least one write failed
    pub fn is_partial_failure(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn log(&self) {
        tracing::info!(
            files_indexed = self.files_indexed,
            skipped = self.skipped.len(),
            candidates = self.candidates,
            resolved = self.resolved,
            ambiguous = self.ambiguous,
            unresolved = self.unresolved,
            files_touched = self.files_touched,
            fields_repaired = self.fields_repaired,
            aliases_added = self.aliases_added,
            substitutions = self.substitutions,
            failures = self.failures.len(),
            dry_run = self.dry_run,
            "normalization finished"
        );
        if !self.unresolved_sample.is_empty() {
            tracing::info!(sample = ?self.unresolved_sample, "unresolved names");
        }
    }
}
