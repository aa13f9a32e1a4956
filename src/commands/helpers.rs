//! Shared helpers for command implementations

use std::path::Path;

use crate::cli::CandidateArgs;
use crate::commands::dispatch::CommandContext;
use vaultnorm_core::config::NormConfig;
use vaultnorm_core::corpus::FsCorpus;
use vaultnorm_core::pipeline::{ReportSource, RunOptions};

/// Build run options from candidate flags, falling back to the configured report
pub fn run_options(
    ctx: &CommandContext,
    config: &NormConfig,
    corpus: &FsCorpus,
    args: &CandidateArgs,
) -> RunOptions {
    let report = match &args.report {
        Some(path) => Some(report_source(corpus, &ctx.absolute(path), &config.extension)),
        None => config
            .report
            .as_deref()
            .map(|rel| ReportSource::InCorpus(corpus_path(rel))),
    };

    RunOptions {
        report,
        from_links: args.from_links,
        names: args.name.clone(),
        dry_run: false,
    }
}

/// A report under the corpus root with the content extension is a corpus document
fn report_source(corpus: &FsCorpus, path: &Path, extension: &str) -> ReportSource {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    match corpus.relative(path) {
        Some(rel) if rel.ends_with(&suffix) => ReportSource::InCorpus(rel),
        _ => ReportSource::External(path.to_path_buf()),
    }
}

/// Normalize a configured corpus-relative path to `/`-separated form
fn corpus_path(rel: &str) -> String {
    let rel = rel.replace('\\', "/");
    rel.trim_start_matches("./").to_string()
}

/// Root path as shown in records headers
pub fn root_for_records(corpus: &FsCorpus) -> String {
    corpus.root().display().to_string()
}
