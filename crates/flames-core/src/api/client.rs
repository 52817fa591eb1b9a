use std::sync::Arc;

use super::dto::CalculateRequest;
use super::gateway::FlamesGateway;
use crate::error::Result;
use crate::result::FlamesResult;
use crate::session::SessionManager;

/// Session-aware client for the remote FLAMES service.
///
/// Failure handling differs per operation:
/// - `calculate_flames` / `get_by_id` yield `None` ("did not complete")
/// - `get_history` yields an empty list
/// - `delete_history_item` propagates the error, so a failed delete is never
///   mistaken for a successful one
///
/// Every call is attempted exactly once.
#[derive(Clone)]
pub struct FlamesClient {
    gateway: Arc<dyn FlamesGateway>,
    sessions: Arc<SessionManager>,
}

impl FlamesClient {
    pub fn new(gateway: Arc<dyn FlamesGateway>, sessions: Arc<SessionManager>) -> Self {
        Self { gateway, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Requests a FLAMES computation tagged with the current session.
    ///
    /// `None` means the operation did not complete; the reason is logged.
    pub async fn calculate_flames(&self, name_one: &str, name_two: &str) -> Option<FlamesResult> {
        match self.try_calculate(name_one, name_two).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!("[FlamesClient] Failed to calculate FLAMES: {}", e);
                None
            }
        }
    }

    async fn try_calculate(&self, name_one: &str, name_two: &str) -> Result<FlamesResult> {
        let session = self.sessions.get_or_create_session().await?;
        let request = CalculateRequest {
            name_one: name_one.to_string(),
            name_two: name_two.to_string(),
            session_id: session.id,
        };
        self.gateway.calculate(&request).await
    }

    /// Lists this session's history, most recent first.
    ///
    /// Never fails: any error degrades to an empty list so the caller stays
    /// usable while the service is down.
    pub async fn get_history(&self) -> Vec<FlamesResult> {
        let session = match self.sessions.get_or_create_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("[FlamesClient] No session for history lookup: {}", e);
                return Vec::new();
            }
        };

        match self.gateway.history(&session.id).await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("[FlamesClient] Failed to fetch history: {}", e);
                Vec::new()
            }
        }
    }

    /// Deletes a history entry.
    ///
    /// # Errors
    ///
    /// Propagates any transport or remote failure.
    pub async fn delete_history_item(&self, id: &str) -> Result<()> {
        self.gateway.delete(id).await.inspect_err(|e| {
            tracing::error!("[FlamesClient] Error deleting history item {}: {}", id, e);
        })
    }

    /// Resolves a shared result by id. `None` when it could not be fetched.
    pub async fn get_by_id(&self, id: &str) -> Option<FlamesResult> {
        match self.gateway.fetch(id).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!("[FlamesClient] Error fetching FLAMES result {}: {}", id, e);
                None
            }
        }
    }
}
