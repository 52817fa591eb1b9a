//! Composition root: wires configuration, storage, the HTTP gateway and the
//! page together.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use flames_application::FlamesPage;
use flames_core::api::FlamesClient;
use flames_core::config::FlamesConfig;
use flames_core::session::SessionManager;
use flames_infrastructure::{ConfigService, FileKeyValueStore, FlamesPaths};
use flames_interaction::{HttpFlamesGateway, TerminalSharePlatform};

pub struct AppContext {
    pub config: FlamesConfig,
    pub sessions: Arc<SessionManager>,
    pub page: FlamesPage,
}

/// Builds the application from `config.toml`, the environment and the
/// command-line override, in increasing precedence.
pub fn build(api_base_url: Option<String>) -> Result<AppContext> {
    let paths = FlamesPaths::new(None);

    let config_service = ConfigService::new(&paths)?;
    let mut config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    if let Some(url) = api_base_url {
        config.api_base_url = Some(url);
    }
    tracing::info!("[Bootstrap] Config loaded from {}", config_service.path().display());

    let base_url = config.require_api_base_url()?;
    let mut gateway = HttpFlamesGateway::new(&base_url)?;
    if let Some(secs) = config.request_timeout_secs {
        gateway = gateway.with_timeout(Duration::from_secs(secs));
    }
    tracing::info!("[Bootstrap] Using FLAMES service at {}", base_url);

    let store = Arc::new(FileKeyValueStore::new(&paths)?);
    let sessions =
        Arc::new(SessionManager::new(store).with_ttl_ms(config.session_ttl_ms()));

    let client = FlamesClient::new(Arc::new(gateway), Arc::clone(&sessions));
    let page = FlamesPage::new(client, Arc::new(TerminalSharePlatform::stdout()), &config);
    tracing::info!("[Bootstrap] FlamesPage ready");

    Ok(AppContext {
        config,
        sessions,
        page,
    })
}
