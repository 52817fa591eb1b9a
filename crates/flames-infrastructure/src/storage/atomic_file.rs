//! Atomic file operations for small TOML/JSON documents.
//!
//! Writes go through a temporary file, fsync and rename; read-modify-write
//! updates additionally hold an exclusive lock file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use flames_core::FlamesError;

/// Serialization format of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

/// Errors that can occur during atomic file operations.
#[derive(Debug, thiserror::Error)]
pub enum AtomicFileError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Lock error: {0}")]
    LockError(String),
}

impl From<AtomicFileError> for FlamesError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(io) => io.into(),
            AtomicFileError::TomlError(err) => err.into(),
            AtomicFileError::TomlSerError(err) => err.into(),
            AtomicFileError::JsonError(err) => err.into(),
            AtomicFileError::LockError(msg) => FlamesError::storage(msg),
        }
    }
}

/// A handle to a file that is always replaced atomically.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data = match self.format {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };
        Ok(Some(data))
    }

    /// Serializes `data` and replaces the file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let serialized = match self.format {
            FileFormat::Toml => toml::to_string_pretty(data)?,
            FileFormat::Json => serde_json::to_string_pretty(data)?,
        };

        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(serialized.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// `f` receives the current data (or `default_value` if the file is
    /// missing). The result is written back only if `f` returns `Ok`.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R, AtomicFileError>
    where
        F: FnOnce(&mut T) -> Result<R, AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let output = f(&mut data)?;
        self.save(&data)?;

        Ok(output)
    }

    fn get_temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; the lock file itself is best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<TestConfig>::new(temp_dir.path().join("test.toml"), FileFormat::Toml);

        let config = TestConfig {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&config).unwrap();

        assert_eq!(file.load().unwrap().unwrap(), config);
    }

    #[test]
    fn test_save_and_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");
        let file = AtomicFile::<BTreeMap<String, String>>::new(path.clone(), FileFormat::Json);

        let mut map = BTreeMap::new();
        map.insert("flames_session".to_string(), "{}".to_string());
        file.save(&map).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("flames_session"));
        assert_eq!(file.load().unwrap().unwrap(), map);
    }

    #[test]
    fn test_load_nonexistent_or_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");
        let file = AtomicFile::<TestConfig>::new(path.clone(), FileFormat::Json);
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_returns_closure_output() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<TestConfig>::new(temp_dir.path().join("test.toml"), FileFormat::Toml);
        let default_config = TestConfig {
            name: "default".to_string(),
            count: 0,
        };

        let previous = file
            .update(default_config.clone(), |config| {
                let before = config.count;
                config.count += 10;
                Ok(before)
            })
            .unwrap();
        assert_eq!(previous, 0);

        file.update(default_config, |config| {
            config.count += 5;
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<TestConfig>::new(temp_dir.path().join("test.toml"), FileFormat::Toml);
        let config = TestConfig {
            name: "keep".to_string(),
            count: 1,
        };
        file.save(&config).unwrap();

        let result = file.update(config.clone(), |c| {
            c.count = 99;
            Err::<(), _>(AtomicFileError::LockError("abort".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap().count, 1);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let file = AtomicFile::<TestConfig>::new(file_path.clone(), FileFormat::Toml);

        file.save(&TestConfig {
            name: "test".to_string(),
            count: 42,
        })
        .unwrap();

        assert!(!temp_dir.path().join(".test.toml.tmp").exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.toml");
        std::fs::write(&file_path, "count = \"not a number").unwrap();
        let file = AtomicFile::<TestConfig>::new(file_path, FileFormat::Toml);

        let err = file.load().unwrap_err();
        assert!(matches!(err, AtomicFileError::TomlError(_)));
        assert!(err.to_string().starts_with("TOML parse error: "));
    }

    #[test]
    fn test_lock_error_becomes_storage_error() {
        let err = AtomicFileError::LockError("busy".to_string());
        assert_eq!(err.to_string(), "Lock error: busy");
        assert!(FlamesError::from(err).is_storage());
    }
}
