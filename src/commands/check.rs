//! Check command - read-only scan for broken references and incomplete metadata

use crate::cli::{Cli, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::helpers::root_for_records;
use vaultnorm_core::check::CheckReport;
use vaultnorm_core::corpus::FsCorpus;
use vaultnorm_core::error::{NormError, Result};
use vaultnorm_core::format::escape_quotes;
use vaultnorm_core::pipeline::Pipeline;

/// Execute the check command; problems found yield a data error
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;
    let corpus = ctx.open_corpus(&config)?;

    let report = Pipeline::new(&corpus, &config).check()?;
    output_report(ctx.cli, &corpus, &report)?;

    if report.is_clean() {
        Ok(())
    } else {
        Err(NormError::ChecksFailed(format!(
            "{} issue(s) found",
            report.issue_count()
        )))
    }
}

fn output_report(cli: &Cli, corpus: &FsCorpus, report: &CheckReport) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Human => {
            if report.is_clean() {
                if !cli.quiet {
                    println!(
                        "Corpus is clean ({} documents scanned)",
                        report.documents_scanned
                    );
                }
                return Ok(());
            }

            println!(
                "Found {} issue(s) in {} documents:",
                report.issue_count(),
                report.documents_scanned
            );
            println!();
            for broken in &report.broken_references {
                println!("  [broken-reference] {}: [[{}]]", broken.path, broken.name);
            }
            for missing in &report.missing_fields {
                println!(
                    "  [missing-fields] {}: {}",
                    missing.path,
                    missing.fields.join(", ")
                );
            }
            for malformed in &report.malformed_metadata {
                println!("  [malformed-metadata] {}: {}", malformed.path, malformed.reason);
            }
            for skipped in &report.skipped {
                println!("  [unreadable] {}: {}", skipped.path, skipped.reason);
            }
        }
        OutputFormat::Records => {
            println!(
                "H vaultnorm=1 records=1 root={} mode=check documents={} issues={}",
                root_for_records(corpus),
                report.documents_scanned,
                report.issue_count()
            );
            for broken in &report.broken_references {
                println!(
                    "D broken-reference {} \"{}\"",
                    broken.path,
                    escape_quotes(&broken.name)
                );
            }
            for missing in &report.missing_fields {
                println!(
                    "D missing-fields {} \"{}\"",
                    missing.path,
                    missing.fields.join(",")
                );
            }
            for malformed in &report.malformed_metadata {
                println!(
                    "D malformed-metadata {} \"{}\"",
                    malformed.path,
                    escape_quotes(&malformed.reason)
                );
            }
        }
    }

    Ok(())
}
