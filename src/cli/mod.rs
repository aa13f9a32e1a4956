//! CLI argument parsing for vaultnorm
//!
//! Supports global flags: --root, --config, --format, --quiet, --verbose

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CandidateArgs, NormalizeArgs};
use parse::parse_output_format;
pub use vaultnorm_core::format::OutputFormat;

/// Vaultnorm - wikilink and front-matter normalizer for markdown knowledge bases
#[derive(Parser, Debug)]
#[command(name = "vaultnorm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Corpus root (overrides `content_dir` from config)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (default: ./vaultnorm.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human, json or records
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `info`, `vaultnorm_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve candidate names, rewrite references and repair metadata
    Normalize(NormalizeArgs),

    /// Show how candidate names would resolve, without writing
    Resolve(CandidateArgs),

    /// Report broken references and incomplete metadata
    Check,
}
