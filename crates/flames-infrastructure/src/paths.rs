//! Unified path management for flames configuration files.
//!
//! ```text
//! ~/.config/flames/            # Config directory
//! ├── config.toml              # Client configuration
//! ├── local_storage.json       # Durable key/value store (session record)
//! └── logs/                    # Interactive-mode logs
//!     └── flames.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for flames_core::FlamesError {
    fn from(err: PathError) -> Self {
        flames_core::FlamesError::config(err.to_string())
    }
}

/// Path resolution for flames.
///
/// By default everything lives under the platform config directory
/// (`dirs::config_dir()/flames`). A custom root can be given for tests or
/// portable installs.
#[derive(Debug, Clone, Default)]
pub struct FlamesPaths {
    root_override: Option<PathBuf>,
}

impl FlamesPaths {
    /// Creates a path resolver.
    ///
    /// # Arguments
    ///
    /// * `root_override` - Use this directory instead of the platform config dir
    pub fn new(root_override: Option<PathBuf>) -> Self {
        Self { root_override }
    }

    /// Returns the flames configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root_override {
            return Ok(root.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("flames"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the durable key/value store.
    pub fn local_storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("local_storage.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
