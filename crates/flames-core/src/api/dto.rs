//! Wire types of the remote FLAMES service.

use serde::{Deserialize, Serialize};

use crate::error::{FlamesError, Result};

/// Body of `POST /flames/calculate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub name_one: String,
    pub name_two: String,
    pub session_id: String,
}

/// Response envelope shared by the compute, history and fetch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Extracts the payload, treating `success: false` or a missing payload
    /// as a remote failure.
    ///
    /// `status` is the HTTP status the envelope arrived with and is only used
    /// for the error value.
    pub fn into_data(self, status: u16) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(FlamesError::remote(
                status,
                self.message
                    .unwrap_or_else(|| "Response carried no data".to_string()),
            )),
            (false, _) => Err(FlamesError::remote(
                status,
                self.message
                    .unwrap_or_else(|| "Service reported failure".to_string()),
            )),
        }
    }
}
