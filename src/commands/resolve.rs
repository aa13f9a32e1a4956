//! Resolve command - show the resolution mapping without touching the corpus

use serde::Serialize;

use crate::cli::{CandidateArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::commands::helpers::{root_for_records, run_options};
use vaultnorm_core::error::Result;
use vaultnorm_core::format::escape_quotes;
use vaultnorm_core::pipeline::Pipeline;
use vaultnorm_core::resolve::ResolutionReport;

#[derive(Serialize)]
struct ResolveOutput<'a> {
    candidates: usize,
    #[serde(flatten)]
    report: &'a ResolutionReport,
}

/// Execute the resolve command
pub fn execute(ctx: &CommandContext, args: &CandidateArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let corpus = ctx.open_corpus(&config)?;
    let options = run_options(ctx, &config, &corpus, args);

    let plan = Pipeline::new(&corpus, &config).plan(&options)?;
    let report = plan.report();
    let candidates = plan.candidates.len();

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = ResolveOutput {
                candidates,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for item in &report.resolved {
                match item.ambiguous {
                    Some(n) => println!("{} -> {} ({} matches, shortest path)", item.name, item.target, n),
                    None => println!("{} -> {}", item.name, item.target),
                }
            }
            for name in &report.unresolved {
                println!("{} -> (unresolved)", name);
            }
            if !ctx.cli.quiet {
                println!(
                    "Resolved {} of {} candidate(s)",
                    report.resolved.len(),
                    candidates
                );
            }
        }
        OutputFormat::Records => {
            println!(
                "H vaultnorm=1 records=1 root={} mode=resolve candidates={} resolved={} unresolved={}",
                root_for_records(&corpus),
                candidates,
                report.resolved.len(),
                report.unresolved.len()
            );
            for item in &report.resolved {
                println!(
                    "R \"{}\" {} matches={}",
                    escape_quotes(&item.name),
                    item.target,
                    item.ambiguous.unwrap_or(1)
                );
            }
            for name in &report.unresolved {
                println!("U \"{}\"", escape_quotes(name));
            }
        }
    }

    Ok(())
}
