//! Unified path management for notifia files.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::PathBuf;

use notifia_core::NotifiaError;
use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

impl From<PathError> for NotifiaError {
    fn from(err: PathError) -> Self {
        NotifiaError::config(err.to_string())
    }
}

/// Unified path management for notifia.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/notifia/           # Config directory
/// ├── config.toml              # Client configuration
/// └── logs/                    # Log files (when enabled)
///     └── notifia.log.YYYY-MM-DD
///
/// ~/.local/share/notifia/      # Data directory
/// └── storage/                 # Key-value records
///     ├── user.json
///     ├── article_history.json
///     └── isDarkTheme.json
/// ```
pub struct NotifiaPaths;

impl NotifiaPaths {
    const APP_DIR: &'static str = "notifia";

    /// Returns the notifia configuration directory (e.g. `~/.config/notifia/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the notifia data directory (e.g. `~/.local/share/notifia/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding the persisted key-value records.
    pub fn storage_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let Ok(config_file) = NotifiaPaths::config_file() else {
            return; // no home directory in this environment
        };
        assert!(config_file.ends_with("notifia/config.toml"));
        assert!(config_file.starts_with(NotifiaPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_storage_dir() {
        let Ok(storage_dir) = NotifiaPaths::storage_dir() else {
            return;
        };
        assert!(storage_dir.ends_with("storage"));
        assert!(storage_dir.starts_with(NotifiaPaths::data_dir().unwrap()));
    }

    #[test]
    fn test_logs_dir() {
        let Ok(logs_dir) = NotifiaPaths::logs_dir() else {
            return;
        };
        assert!(logs_dir.ends_with("logs"));
        assert!(logs_dir.starts_with(NotifiaPaths::config_dir().unwrap()));
    }
}
