//! Configuration service implementation.
//!
//! Loads [`FlamesConfig`] from `config.toml` and applies environment
//! overrides. The file is optional; a missing file means defaults.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use flames_core::config::FlamesConfig;
use flames_core::error::{FlamesError, Result};

use crate::paths::FlamesPaths;
use crate::storage::{AtomicFile, FileFormat};

/// Environment variable overriding `api_base_url`.
pub const ENV_API_BASE_URL: &str = "FLAMES_API_BASE_URL";
/// Environment variable overriding `page_origin`.
pub const ENV_PAGE_ORIGIN: &str = "FLAMES_PAGE_ORIGIN";

/// Configuration service that loads and caches the client configuration.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<FlamesConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &FlamesPaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the configuration with process environment overrides applied,
    /// loading from file if not cached.
    pub fn get_config(&self) -> Result<FlamesConfig> {
        self.get_config_with_env(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::get_config`] with an explicit environment lookup.
    pub fn get_config_with_env<F>(&self, env: F) -> Result<FlamesConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_cached()?;

        if let Some(url) = env(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = Some(url);
        }
        if let Some(origin) = env(ENV_PAGE_ORIGIN).filter(|v| !v.trim().is_empty()) {
            config.page_origin = origin;
        }

        Ok(config)
    }

    fn load_cached(&self) -> Result<FlamesConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|e| FlamesError::internal(format!("Config cache poisoned: {}", e)))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let file = AtomicFile::<FlamesConfig>::new(self.path.clone(), FileFormat::Toml);
        let loaded = match file.load()? {
            Some(config) => config,
            None => {
                tracing::debug!(
                    "[Config] No config file at {}, using defaults",
                    self.path.display()
                );
                FlamesConfig::default()
            }
        };

        let mut cached = self
            .config
            .write()
            .map_err(|e| FlamesError::internal(format!("Config cache poisoned: {}", e)))?;
        *cached = Some(loaded.clone());

        Ok(loaded)
    }
}
