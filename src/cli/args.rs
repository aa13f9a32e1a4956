use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use super::parse::parse_date;

/// Where candidate names come from
#[derive(Args, Debug, Clone, Default)]
pub struct CandidateArgs {
    /// Diagnostic report with a `| # | name | ... |` table (overrides `report` in config)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Take every broken reference in the corpus as a candidate
    #[arg(long)]
    pub from_links: bool,

    /// Candidate name (can be specified multiple times)
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub name: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub candidates: CandidateArgs,

    /// Compute and report every change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Date used for missing `created` fields (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}
