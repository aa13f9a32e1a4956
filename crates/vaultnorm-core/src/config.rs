//! Configuration for vaultnorm
//!
//! Configuration lives in an optional `vaultnorm.toml`; every field has a default,
//! so a missing or empty file yields the documented behavior.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NormError, Result};

pub use types::{DefaultsConfig, NormConfig, CONFIG_FILE};

impl NormConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| NormError::io_operation("read config", path.display(), e))?;
        let config: NormConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `vaultnorm.toml` in `dir` if present, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(NormError::not_found("config file", path.display()));
            }
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NormError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Corpus root resolved against `base` (the directory holding the config)
    pub fn content_root(&self, base: &Path) -> PathBuf {
        base.join(&self.content_dir)
    }

    fn validate(&self) -> Result<()> {
        let ext = self.extension.trim_start_matches('.');
        if ext.is_empty() || ext.contains('/') {
            return Err(NormError::invalid_value("extension", &self.extension));
        }
        if self.required_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(NormError::invalid_value("required_fields", "empty field name"));
        }
        Ok(())
    }
}
