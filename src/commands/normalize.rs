//! Normalize command - resolve candidates, rewrite references, repair metadata

use crate::cli::{Cli, NormalizeArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::helpers::{root_for_records, run_options};
use vaultnorm_core::corpus::FsCorpus;
use vaultnorm_core::error::{NormError, Result};
use vaultnorm_core::format::escape_quotes;
use vaultnorm_core::pipeline::{Pipeline, RunSummary};

/// Execute the normalize command
#[tracing::instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(ctx: &CommandContext, args: &NormalizeArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let corpus = ctx.open_corpus(&config)?;

    let mut options = run_options(ctx, &config, &corpus, &args.candidates);
    options.dry_run = args.dry_run;

    let mut pipeline = Pipeline::new(&corpus, &config);
    if let Some(today) = args.today {
        pipeline = pipeline.with_today(today);
    }
    let summary = pipeline.run(&options)?;

    output_summary(ctx.cli, &corpus, &summary)?;

    if summary.is_partial_failure() {
        return Err(NormError::PartialFailure {
            failed: summary.failures.len(),
        });
    }
    Ok(())
}

fn output_summary(cli: &Cli, corpus: &FsCorpus, summary: &RunSummary) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Human => {
            for failure in &summary.failures {
                eprintln!("  failed to write {}: {}", failure.path, failure.reason);
            }
            if cli.quiet {
                return Ok(());
            }

            println!(
                "Indexed {} document(s), {} skipped",
                summary.files_indexed,
                summary.skipped.len()
            );
            println!(
                "Candidates: {} ({} resolved, {} ambiguous, {} unresolved)",
                summary.candidates, summary.resolved, summary.ambiguous, summary.unresolved
            );
            if !summary.unresolved_sample.is_empty() {
                println!("Unresolved: {}", summary.unresolved_sample.join(", "));
            }
            println!("Substitutions: {}", summary.substitutions);
            println!("Aliases added: {}", summary.aliases_added);
            println!("Fields repaired: {}", summary.fields_repaired);
            println!("Files touched: {}", summary.files_touched);
            if summary.dry_run {
                println!("Dry run: nothing was written");
            }
        }
        OutputFormat::Records => {
            println!(
                "H vaultnorm=1 records=1 root={} mode=normalize indexed={} skipped={} candidates={} resolved={} ambiguous={} unresolved={} substitutions={} aliases={} repaired={} touched={} failed={} dry_run={}",
                root_for_records(corpus),
                summary.files_indexed,
                summary.skipped.len(),
                summary.candidates,
                summary.resolved,
                summary.ambiguous,
                summary.unresolved,
                summary.substitutions,
                summary.aliases_added,
                summary.fields_repaired,
                summary.files_touched,
                summary.failures.len(),
                summary.dry_run
            );
            for name in &summary.unresolved_sample {
                println!("U \"{}\"", escape_quotes(name));
            }
            for failure in summary.skipped.iter().chain(&summary.failures) {
                println!(
                    "F {} {} \"{}\"",
                    failure.stage,
                    failure.path,
                    escape_quotes(&failure.reason)
                );
            }
        }
    }

    Ok(())
}
