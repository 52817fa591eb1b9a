//! Client configuration model.

use serde::{Deserialize, Serialize};

use crate::error::{FlamesError, Result};
use crate::session::DEFAULT_SESSION_TTL_MS;

/// Default page origin used to build share links.
pub const DEFAULT_PAGE_ORIGIN: &str = "http://localhost:5173";

/// Default duration of the celebration flourish.
pub const DEFAULT_CELEBRATION_MS: u64 = 3000;

/// Root of `config.toml`.
///
/// Every field is optional in the file; missing fields take the defaults
/// below.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FlamesConfig {
    /// Base address of the remote FLAMES service, e.g. `https://api.example.com`
    pub api_base_url: Option<String>,
    /// Origin of the page share links point to
    pub page_origin: String,
    /// Lifetime of a newly created session, in seconds
    pub session_ttl_secs: u64,
    /// How long the celebration stays up, in milliseconds
    pub celebration_ms: u64,
    /// Optional per-request timeout; unset means the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for FlamesConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            page_origin: DEFAULT_PAGE_ORIGIN.to_string(),
            session_ttl_secs: (DEFAULT_SESSION_TTL_MS / 1000) as u64,
            celebration_ms: DEFAULT_CELEBRATION_MS,
            request_timeout_secs: None,
        }
    }
}

impl FlamesConfig {
    /// Returns the API base URL without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `FlamesError::Config` when no base URL is configured.
    pub fn require_api_base_url(&self) -> Result<String> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                FlamesError::config(
                    "API base URL is not set (config.toml `api_base_url`, FLAMES_API_BASE_URL or --api-base-url)",
                )
            })
    }

    pub fn session_ttl_ms(&self) -> i64 {
        i64::try_from(self.session_ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FlamesConfig::default();
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.session_ttl_ms(), 3_600_000);
        assert_eq!(config.celebration_ms, 3000);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: FlamesConfig =
            toml::from_str("api_base_url = \"https://api.example.com/\"\n").unwrap();
        assert_eq!(config.celebration_ms, DEFAULT_CELEBRATION_MS);
        assert_eq!(
            config.require_api_base_url().unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_missing_base_url_is_config_error() {
        let config = FlamesConfig {
            api_base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.require_api_base_url().unwrap_err().is_config());
    }
}
