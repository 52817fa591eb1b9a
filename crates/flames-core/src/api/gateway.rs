//! Transport-level interface to the remote FLAMES service.

use async_trait::async_trait;

use super::dto::CalculateRequest;
use crate::error::Result;
use crate::result::FlamesResult;

/// Raw access to the four remote operations.
///
/// Every method reports failures as errors; the degrade-or-propagate policy
/// lives in [`super::FlamesClient`], not here. Implementations must not
/// retry.
#[async_trait]
pub trait FlamesGateway: Send + Sync {
    /// `POST /flames/calculate`
    async fn calculate(&self, request: &CalculateRequest) -> Result<FlamesResult>;

    /// `GET /flames/history?sessionId=...`, most recent first.
    async fn history(&self, session_id: &str) -> Result<Vec<FlamesResult>>;

    /// `DELETE /flames/delete/{id}`
    async fn delete(&self, id: &str) -> Result<()>;

    /// `GET /flames/{id}`
    async fn fetch(&self, id: &str) -> Result<FlamesResult>;
}
