//! File-backed key-value store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use notifia_core::error::{NotifiaError, Result};
use notifia_core::storage::KeyValueStore;

use super::atomic_file::AtomicFile;
use crate::paths::NotifiaPaths;

/// Stores each key as `<dir>/<key>.json`.
///
/// Blocking file I/O runs on the tokio blocking pool, so callers never block
/// the async executor.
///
/// # Example
///
/// ```ignore
/// use notifia_infrastructure::storage::FileKeyValueStore;
///
/// let store = FileKeyValueStore::default_location()?;
/// store.set("user", r#"{"id":1}"#).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store under the platform data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(NotifiaPaths::storage_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        validate_key(key)?;
        Ok(AtomicFile::new(self.dir.join(format!("{}.json", key))))
    }
}

/// Keys become file names: ASCII alphanumerics, `_`, `-` and `.`, not
/// starting with `.`.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(NotifiaError::storage(format!("Invalid storage key: {:?}", key)))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| NotifiaError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        run_blocking(move || file.read()).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let len = value.len();
        let value = value.to_string();
        run_blocking(move || file.write(&value)).await?;
        tracing::debug!("[Storage] Wrote '{}' ({} bytes)", key, len);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        run_blocking(move || file.remove()).await?;
        tracing::debug!("[Storage] Removed '{}'", key);
        Ok(())
    }
}
