//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/notifia/config.toml).

use std::path::{Path, PathBuf};

use notifia_core::config::ClientConfig;
use notifia_core::error::{NotifiaError, Result};

use crate::paths::NotifiaPaths;
use crate::storage::AtomicFile;

/// Loads and writes `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicFile,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    /// Uses the platform config file location.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(NotifiaPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration.
    ///
    /// A missing or empty file yields the defaults; a malformed file is a
    /// configuration error.
    pub fn load(&self) -> Result<ClientConfig> {
        match self.file.read()? {
            Some(content) if !content.trim().is_empty() => toml::from_str(&content).map_err(|e| {
                NotifiaError::config(format!("{}: {}", self.path().display(), e))
            }),
            _ => Ok(ClientConfig::default()),
        }
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        self.file.write(&content)
    }

    /// Writes the default configuration unless a file already exists.
    ///
    /// Returns `true` if a file was written.
    pub fn init(&self, overwrite: bool) -> Result<bool> {
        if !overwrite && self.file.read()?.is_some() {
            return Ok(false);
        }
        self.save(&ClientConfig::default())?;
        tracing::info!("[Config] Wrote default config to {}", self.path().display());
        Ok(true)
    }
}
