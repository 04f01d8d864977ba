//! Directory-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. File I/O runs on the blocking pool so
//! store operations never stall the async runtime.

use crate::storage::AtomicTextFile;
use async_trait::async_trait;
use postpilot_core::storage::KeyValueStore;
use postpilot_core::{PostPilotError, Result};
use std::path::PathBuf;

/// [`KeyValueStore`] persisting one JSON document per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, key: &str) -> Result<AtomicTextFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PostPilotError::validation(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(AtomicTextFile::new(self.dir.join(format!("{}.json", key))))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PostPilotError::internal(format!("Storage task failed: {}", e)))?
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        run_blocking(move || file.read()).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let value = value.to_string();
        tracing::debug!("[JsonFileStore] Writing {} ({} bytes)", key, value.len());
        run_blocking(move || file.write(&value)).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        tracing::debug!("[JsonFileStore] Removing {}", key);
        run_blocking(move || file.remove()).await
    }
}
