//! Command dispatch logic for vaultnorm

use std::time::Instant;

use crate::cli::{Cli, Commands};
use vaultnorm_core::error::{NormError, Result};
use tracing::debug;

mod command;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| NormError::io_operation("read", "current directory", e))?;

    debug!(elapsed = ?start.elapsed(), "resolve_cwd");

    let ctx = CommandContext::new(cli, &cwd, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Normalize(args) => crate::commands::normalize::execute(ctx, args),
            Commands::Resolve(args) => crate::commands::resolve::execute(ctx, args),
            Commands::Check => crate::commands::check::execute(ctx),
        }
    }
}
