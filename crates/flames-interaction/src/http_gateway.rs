//! HttpFlamesGateway - REST implementation of the remote FLAMES service.

use std::time::Duration;

use async_trait::async_trait;
use flames_core::api::{ApiEnvelope, CalculateRequest, FlamesGateway};
use flames_core::error::{FlamesError, Result};
use flames_core::result::FlamesResult;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Gateway talking JSON over HTTP to the FLAMES backend.
///
/// No timeout is applied unless one is configured; requests are never
/// retried.
#[derive(Clone, Debug)]
pub struct HttpFlamesGateway {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl HttpFlamesGateway {
    /// Creates a gateway for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `FlamesError::Config` if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FlamesError::config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(FlamesError::config(format!(
                "API base URL must be an http(s) URL: {}",
                base_url
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            timeout: None,
        })
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FlamesError::config(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| FlamesError::transport(format!("{}: {}", context, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FlamesError::remote(
                status.as_u16(),
                format!("{}: {}", context, error_text),
            ));
        }

        Ok(response)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FlamesError::transport(format!("{}: {}", context, e)))?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        envelope.into_data(status)
    }

    /// A 404 on an id-addressed endpoint means the result does not exist.
    fn missing_result(err: FlamesError, id: &str) -> FlamesError {
        match err {
            FlamesError::Remote { status: 404, .. } => FlamesError::not_found("FlamesResult", id),
            other => other,
        }
    }
}

#[async_trait]
impl FlamesGateway for HttpFlamesGateway {
    async fn calculate(&self, request: &CalculateRequest) -> Result<FlamesResult> {
        const CONTEXT: &str = "Failed to calculate FLAMES";
        let url = self.endpoint(&["flames", "calculate"])?;
        let response = self.send(self.client.post(url).json(request), CONTEXT).await?;
        Self::unwrap_envelope(response, CONTEXT).await
    }

    async fn history(&self, session_id: &str) -> Result<Vec<FlamesResult>> {
        const CONTEXT: &str = "Failed to fetch history";
        let url = self.endpoint(&["flames", "history"])?;
        let request = self.client.get(url).query(&[("sessionId", session_id)]);
        let response = self.send(request, CONTEXT).await?;
        Self::unwrap_envelope(response, CONTEXT).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["flames", "delete", id])?;
        self.send(self.client.delete(url), "Failed to delete history item")
            .await
            .map_err(|e| Self::missing_result(e, id))?;
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<FlamesResult> {
        const CONTEXT: &str = "Failed to fetch FLAMES result";
        let url = self.endpoint(&["flames", id])?;
        let response = self
            .send(self.client.get(url), CONTEXT)
            .await
            .map_err(|e| Self::missing_result(e, id))?;
        Self::unwrap_envelope(response, CONTEXT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_without_path() {
        let gateway = HttpFlamesGateway::new("https://api.example.com").unwrap();
        assert_eq!(
            gateway.endpoint(&["flames", "calculate"]).unwrap().as_str(),
            "https://api.example.com/flames/calculate"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_trailing_slash() {
        let gateway = HttpFlamesGateway::new("https://api.example.com/v1/").unwrap();
        assert_eq!(
            gateway.endpoint(&["flames", "history"]).unwrap().as_str(),
            "https://api.example.com/v1/flames/history"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let gateway = HttpFlamesGateway::new("https://api.example.com").unwrap();
        assert_eq!(
            gateway.endpoint(&["flames", "delete", "a/b c"]).unwrap().as_str(),
            "https://api.example.com/flames/delete/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpFlamesGateway::new("not a url").unwrap_err().is_config());
        assert!(HttpFlamesGateway::new("mailto:a@b.c").unwrap_err().is_config());
        assert!(HttpFlamesGateway::new("ftp://api.example.com").unwrap_err().is_config());
    }
}
