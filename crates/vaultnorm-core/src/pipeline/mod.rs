//! The normalization run
//!
//! One run loads a snapshot of the whole corpus, builds the index, gathers candidate
//! names, resolves them once, then applies every mutation to the snapshot in memory:
//!
//! 1. target-alias pass (aliases and required fields on resolution targets)
//! 2. rewrite pass (every document except the diagnostic report)
//! 3. corpus-wide repair pass
//!
//! Each changed document is written exactly once at the end. No write happens before
//! the full corpus has been read.

mod summary;

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;

use crate::check::{self, CheckReport};
use crate::config::NormConfig;
use crate::corpus::{Corpus, DocumentFailure, DryRun, Snapshot, Stage};
use crate::error::Result;
use crate::index::{DocId, DocumentIndex, IndexBuilder};
use crate::repair::{add_alias, DefaultContext, DefaultTable, RepairContext};
use crate::report::{extract_candidates, HeaderTokens};
use crate::resolve::{ResolutionMapping, ResolutionReport, Resolver};
use crate::rewrite::rewrite_references;

pub use summary::RunSummary;

/// Where the diagnostic report comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// A document of the corpus, by corpus-relative path
    InCorpus(String),
    /// A file outside the corpus
    External(PathBuf),
}

/// Per-invocation options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub report: Option<ReportSource>,
    /// Also take every broken reference in the corpus as a candidate
    pub from_links: bool,
    /// Extra candidate names
    pub names: Vec<String>,
    pub dry_run: bool,
}

/// Everything computed before the first mutation
#[derive(Debug)]
pub struct Plan {
    pub snapshot: Snapshot,
    pub index: DocumentIndex,
    pub candidates: BTreeSet<String>,
    pub mapping: ResolutionMapping,
    /// Snapshot position of the report document when it lives in the corpus
    pub report_document: Option<DocId>,
}

impl Plan {
    pub fn report(&self) -> ResolutionReport {
        ResolutionReport::new(&self.mapping, &self.index)
    }
}

#[derive(Debug, Default)]
struct PassCounts {
    aliases_added: usize,
    fields_repaired: usize,
    substitutions: usize,
}

pub struct Pipeline<'a> {
    corpus: &'a dyn Corpus,
    config: &'a NormConfig,
    today: NaiveDate,
}

impl<'a> Pipeline<'a> {
    pub fn new(corpus: &'a dyn Corpus, config: &'a NormConfig) -> Self {
        Pipeline {
            corpus,
            config,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Use a fixed run date for `created` defaults
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Load, index, gather candidates and resolve; nothing is written
    pub fn plan(&self, options: &RunOptions) -> Result<Plan> {
        let snapshot = Snapshot::load(self.corpus)?;
        let index = IndexBuilder::new(&snapshot.documents, &self.config.extension).build();
        let (candidates, report_document) = self.gather_candidates(&snapshot, &index, options)?;
        let mapping = Resolver::new(&index).resolve(&candidates);

        Ok(Plan {
            snapshot,
            index,
            candidates,
            mapping,
            report_document,
        })
    }

    /// Run the full normalization and persist the result
    #[tracing::instrument(skip_all, fields(corpus = %self.corpus.location(), dry_run = options.dry_run))]
    pub fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        let start = Instant::now();
        let mut plan = self.plan(options)?;

        let defaults = DefaultTable::new(&self.config.defaults, self.today);
        let repair = RepairContext {
            required: &self.config.required_fields,
            defaults: &defaults,
        };

        let mut counts = PassCounts::default();
        alias_pass(&mut plan, &repair, &mut counts);
        rewrite_pass(&mut plan, &mut counts);
        repair_pass(&mut plan.snapshot, &repair, &mut counts);

        let dry = DryRun::new(self.corpus);
        let sink: &dyn Corpus = if options.dry_run { &dry } else { self.corpus };
        let (files_touched, failures) = persist(&plan.snapshot, sink);

        let summary = RunSummary {
            files_indexed: plan.snapshot.documents.len(),
            skipped: plan.snapshot.skipped.clone(),
            candidates: plan.candidates.len(),
            resolved: plan.mapping.resolved.len(),
            ambiguous: plan.mapping.ambiguous.len(),
            unresolved: plan.mapping.unresolved.len(),
            unresolved_sample: plan
                .mapping
                .unresolved
                .iter()
                .take(self.config.unresolved_sample)
                .cloned()
                .collect(),
            files_touched,
            fields_repaired: counts.fields_repaired,
            aliases_added: counts.aliases_added,
            substitutions: counts.substitutions,
            failures,
            dry_run: options.dry_run,
        };

        summary.log();
        crate::trace_time!(start, "normalize_run");
        Ok(summary)
    }

    /// Read-only scan for broken references and incomplete metadata
    pub fn check(&self) -> Result<CheckReport> {
        let snapshot = Snapshot::load(self.corpus)?;
        let index = IndexBuilder::new(&snapshot.documents, &self.config.extension).build();
        let defaults = DefaultTable::new(&self.config.defaults, self.today);
        let repair = RepairContext {
            required: &self.config.required_fields,
            defaults: &defaults,
        };
        Ok(check::run_checks(&snapshot, &index, &repair))
    }

    #[tracing::instrument(skip_all)]
    fn gather_candidates(
        &self,
        snapshot: &Snapshot,
        index: &DocumentIndex,
        options: &RunOptions,
    ) -> Result<(BTreeSet<String>, Option<DocId>)> {
        let tokens = HeaderTokens::from_config(self.config);
        let mut candidates = BTreeSet::new();
        let mut report_document = None;

        match &options.report {
            Some(ReportSource::InCorpus(path)) => {
                match snapshot.documents.iter().position(|d| d.path() == path) {
                    Some(id) => {
                        report_document = Some(id);
                        candidates.extend(extract_candidates(
                            snapshot.documents[id].body(),
                            &tokens,
                        ));
                    }
                    None => {
                        tracing::warn!(report = %path, "diagnostic report not found, no candidates taken from it");
                    }
                }
            }
            Some(ReportSource::External(path)) => match fs::read_to_string(path) {
                Ok(text) => candidates.extend(extract_candidates(&text, &tokens)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(report = %path.display(), "diagnostic report not found, no candidates taken from it");
                }
                Err(e) => {
                    tracing::warn!(report = %path.display(), error = %e, "diagnostic report unreadable, no candidates taken from it");
                }
            },
            None => {}
        }
        let from_report = candidates.len();

        candidates.extend(
            options
                .names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        );

        if options.from_links {
            candidates.extend(check::broken_names(&snapshot.documents, index));
        }

        tracing::debug!(
            from_report,
            total = candidates.len(),
            "candidate names gathered"
        );
        Ok((candidates, report_document))
    }
}

/// Add each resolved name to its target's aliases and complete the target's metadata
#[tracing::instrument(skip_all, fields(resolved = plan.mapping.resolved.len()))]
fn alias_pass(plan: &mut Plan, repair: &RepairContext<'_>, counts: &mut PassCounts) {
    let mut targets = BTreeSet::new();

    for (name, &id) in &plan.mapping.resolved {
        let Some(doc) = plan.snapshot.documents.get_mut(id) else {
            continue;
        };
        let stem = doc.stem().to_string();
        if add_alias(doc.metadata_mut(), name, &stem) {
            tracing::debug!(path = doc.path(), alias = %name, "alias added");
            counts.aliases_added += 1;
        }
        targets.insert(id);
    }

    for id in targets {
        if let Some(doc) = plan.snapshot.documents.get_mut(id) {
            counts.fields_repaired += repair
                .ensure_required(doc.metadata_mut(), DefaultContext::Target)
                .len();
        }
    }
}

/// Point every resolved reference at its target's basename
#[tracing::instrument(skip_all)]
fn rewrite_pass(plan: &mut Plan, counts: &mut PassCounts) {
    let targets: HashMap<String, String> = plan
        .mapping
        .resolved
        .iter()
        .filter_map(|(name, &id)| {
            let entry = plan.index.entry(id)?;
            Some((name.clone(), entry.basename.clone()))
        })
        .collect();
    if targets.is_empty() {
        return;
    }

    for (id, doc) in plan.snapshot.documents.iter_mut().enumerate() {
        if plan.report_document == Some(id) {
            continue;
        }
        if let Some((body, n)) = rewrite_references(doc.body(), &targets) {
            tracing::debug!(path = doc.path(), substitutions = n, "references rewritten");
            doc.set_body(body);
            counts.substitutions += n;
        }
    }
}

/// Ensure every document carries every required field
#[tracing::instrument(skip_all, fields(documents = snapshot.documents.len()))]
fn repair_pass(snapshot: &mut Snapshot, repair: &RepairContext<'_>, counts: &mut PassCounts) {
    for doc in &mut snapshot.documents {
        let filled = repair.ensure_required(doc.metadata_mut(), DefaultContext::Discovered);
        if !filled.is_empty() {
            tracing::debug!(path = doc.path(), fields = ?filled, "required fields filled");
            counts.fields_repaired += filled.len();
        }
    }
}

/// Write every changed document once; failures are recorded and the rest continue
#[tracing::instrument(skip_all)]
fn persist(snapshot: &Snapshot, sink: &dyn Corpus) -> (usize, Vec<DocumentFailure>) {
    let mut written = 0;
    let mut failures = Vec::new();

    for doc in snapshot.documents.iter().filter(|d| d.is_dirty()) {
        let result = doc
            .render()
            .and_then(|text| sink.write(doc.path(), &text));
        match result {
            Ok(()) => written += 1,
            Err(e) => {
                tracing::warn!(path = doc.path(), error = %e, "failed to write document");
                failures.push(DocumentFailure {
                    path: doc.path().to_string(),
                    stage: Stage::Write,
                    reason: e.to_string(),
                });
            }
        }
    }

    (written, failures)
}
