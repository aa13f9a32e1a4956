//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use vaultnorm_core::config::NormConfig;
use vaultnorm_core::corpus::FsCorpus;
use vaultnorm_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    /// Working directory the command was started from
    pub cwd: &'a Path,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, cwd: &'a Path, start: Instant) -> Self {
        Self { cli, cwd, start }
    }

    /// `--config` if given, else `vaultnorm.toml` in the working directory, else defaults
    pub fn load_config(&self) -> Result<NormConfig> {
        let explicit = self.cli.config.as_ref().map(|p| self.absolute(p));
        NormConfig::discover(explicit.as_deref(), self.cwd)
    }

    /// Corpus root: `--root`, else `content_dir` next to the config file
    pub fn content_root(&self, config: &NormConfig) -> PathBuf {
        if let Some(root) = &self.cli.root {
            return self.absolute(root);
        }
        let base = self
            .cli
            .config
            .as_ref()
            .map(|p| self.absolute(p))
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.cwd.to_path_buf());
        config.content_root(&base)
    }

    pub fn open_corpus(&self, config: &NormConfig) -> Result<FsCorpus> {
        let root = self.content_root(config);
        tracing::debug!(root = %root.display(), elapsed = ?self.start.elapsed(), "open_corpus");
        FsCorpus::open(&root, &config.extension)
    }

    /// Resolve a user-supplied path against the working directory
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("vaultnorm {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Wikilink and front-matter normalizer for markdown knowledge bases.");
        println!();
        println!("Run `vaultnorm --help` for usage information.");
        Ok(())
    }
}
