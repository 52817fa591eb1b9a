//! File-backed key/value store, the terminal counterpart of browser local storage.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use flames_core::error::{FlamesError, Result};
use flames_core::session::KeyValueStore;

use super::atomic_file::{AtomicFile, FileFormat};
use crate::paths::FlamesPaths;

type StorageMap = BTreeMap<String, String>;

/// Stores all keys in a single JSON object file.
///
/// Reads hit the file every time so that a value written by another process
/// is picked up; writes are locked read-modify-write cycles.
#[derive(Clone)]
pub struct FileKeyValueStore {
    file: Arc<AtomicFile<StorageMap>>,
}

impl FileKeyValueStore {
    /// Opens the store at the default location (`local_storage.json`).
    pub fn new(paths: &FlamesPaths) -> Result<Self> {
        Ok(Self::with_path(paths.local_storage_file()?))
    }

    /// Opens the store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path, FileFormat::Json)),
        }
    }

    async fn blocking<F, R>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&AtomicFile<StorageMap>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| FlamesError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            let map = file
                .load()
                .map_err(|e| FlamesError::storage(format!("Failed to read {}: {}", file.path().display(), e)))?;
            Ok(map.and_then(|mut map| map.remove(&key)))
        })
        .await
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.blocking(move |file| {
            file.update(StorageMap::new(), |map| {
                map.insert(key, value);
                Ok(())
            })
            .map_err(|e| FlamesError::storage(format!("Failed to write {}: {}", file.path().display(), e)))
        })
        .await
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            if !file.path().exists() {
                return Ok(());
            }
            file.update(StorageMap::new(), |map| {
                map.remove(&key);
                Ok(())
            })
            .map_err(|e| FlamesError::storage(format!("Failed to write {}: {}", file.path().display(), e)))
        })
        .await
    }
}
