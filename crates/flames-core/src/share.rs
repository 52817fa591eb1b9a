//! Shareable links for persisted results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FlamesError, Result};
use crate::result::FlamesResult;

/// Query parameter carrying a shared result id on the page URL.
pub const SHARED_RESULT_PARAM: &str = "result";

pub const SHARE_TITLE: &str = "FLAMES Calculator Result";

pub const CLIPBOARD_NOTICE: &str = "Result copied to clipboard! 📋";

/// Title, text and link handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Text written to the clipboard when native sharing is unavailable.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n{}", self.text, self.url)
    }
}

/// Builds the share payload for `result`.
///
/// Returns `Ok(None)` when the result has no server-assigned id, since an
/// unpersisted result cannot be resolved from a link.
///
/// # Errors
///
/// Returns `FlamesError::Config` if `page_origin` is not a valid URL.
pub fn compose_share(result: &FlamesResult, page_origin: &str) -> Result<Option<SharePayload>> {
    let Some(id) = result.id.as_deref().filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    let mut url = Url::parse(page_origin)
        .map_err(|e| FlamesError::config(format!("Invalid page origin '{}': {}", page_origin, e)))?;
    url.query_pairs_mut()
        .clear()
        .append_pair(SHARED_RESULT_PARAM, id);

    Ok(Some(SharePayload {
        title: SHARE_TITLE.to_string(),
        text: format!(
            "{} + {} = {}! 💕 Check out your FLAMES result!",
            result.name_one, result.name_two, result.result
        ),
        url: url.to_string(),
    }))
}

/// Extracts a shared result id from user input.
///
/// Accepts either a page URL carrying `?result=<id>` or a bare id. Returns
/// `None` for blank input and for URLs without the parameter.
pub fn shared_result_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == SHARED_RESULT_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty()),
        Err(_) => Some(input.to_string()),
    }
}

/// How a share request was fulfilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the platform's native share facility
    Shared(SharePayload),
    /// Native share unavailable; copied to the clipboard instead
    Copied(SharePayload),
    /// Nothing to share (no current result, or it has no id)
    Skipped,
    /// The platform reported an error; it has been logged
    Failed(String),
}

/// Platform facilities used to share a result.
#[async_trait]
pub trait SharePlatform: Send + Sync {
    /// Whether a native share facility exists.
    fn supports_native_share(&self) -> bool;

    async fn native_share(&self, payload: &SharePayload) -> Result<()>;

    async fn copy_to_clipboard(&self, text: &str) -> Result<()>;

    /// Shows a short notice to the user.
    fn notify(&self, message: &str);
}

/// Sends `payload` through native share, falling back to the clipboard.
///
/// Never returns an error; failures are logged and reported as
/// [`ShareOutcome::Failed`].
pub async fn dispatch_share(platform: &dyn SharePlatform, payload: SharePayload) -> ShareOutcome {
    if platform.supports_native_share() {
        return match platform.native_share(&payload).await {
            Ok(()) => ShareOutcome::Shared(payload),
            Err(e) => {
                tracing::error!("[Share] Failed to share: {}", e);
                ShareOutcome::Failed(e.to_string())
            }
        };
    }

    match platform.copy_to_clipboard(&payload.clipboard_text()).await {
        Ok(()) => {
            platform.notify(CLIPBOARD_NOTICE);
            ShareOutcome::Copied(payload)
        }
        Err(e) => {
            tracing::error!("[Share] Failed to copy to clipboard: {}", e);
            ShareOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::RelationshipCategory;
    use std::sync::Mutex;

    fn persisted(id: &str) -> FlamesResult {
        let mut result = FlamesResult::unpersisted("Alice", "Bob", RelationshipCategory::Marriage);
        result.id = Some(id.to_string());
        result
    }

    #[test]
    fn test_compose_share_payload() {
        let payload = compose_share(&persisted("r1"), "https://flames.example")
            .unwrap()
            .unwrap();
        assert_eq!(payload.title, "FLAMES Calculator Result");
        assert_eq!(
            payload.text,
            "Alice + Bob = Marriage! 💕 Check out your FLAMES result!"
        );
        assert_eq!(payload.url, "https://flames.example/?result=r1");
        assert_eq!(
            payload.clipboard_text(),
            "Alice + Bob = Marriage! 💕 Check out your FLAMES result!\nhttps://flames.example/?result=r1"
        );
    }

    #[test]
    fn test_compose_share_replaces_existing_query() {
        let payload = compose_share(&persisted("a b&c"), "https://flames.example/app?result=old")
            .unwrap()
            .unwrap();
        assert_eq!(payload.url, "https://flames.example/app?result=a+b%26c");
        assert_eq!(shared_result_id(&payload.url).as_deref(), Some("a b&c"));
    }

    #[test]
    fn test_compose_share_without_id_is_none() {
        let result = FlamesResult::unpersisted("Alice", "Bob", RelationshipCategory::Lovers);
        assert!(compose_share(&result, "https://flames.example").unwrap().is_none());
    }

    #[test]
    fn test_compose_share_rejects_bad_origin() {
        let err = compose_share(&persisted("r1"), "not a url").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_shared_result_id_parsing() {
        assert_eq!(
            shared_result_id("https://flames.example/?result=r1").as_deref(),
            Some("r1")
        );
        assert_eq!(shared_result_id("  r42 ").as_deref(), Some("r42"));
        assert_eq!(shared_result_id("https://flames.example/"), None);
        assert_eq!(shared_result_id("https://flames.example/?result="), None);
        assert_eq!(shared_result_id("   "), None);
    }

    #[derive(Default)]
    struct RecordingPlatform {
        native: bool,
        fail: bool,
        shared: Mutex<Vec<SharePayload>>,
        clipboard: Mutex<Vec<String>>,
        notices: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SharePlatform for RecordingPlatform {
        fn supports_native_share(&self) -> bool {
            self.native
        }

        async fn native_share(&self, payload: &SharePayload) -> Result<()> {
            if self.fail {
                return Err(FlamesError::internal("share dismissed"));
            }
            self.shared.lock().unwrap().push(payload.clone());
            Ok(())
        }

        async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(FlamesError::internal("clipboard denied"));
            }
            self.clipboard.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }

    fn payload() -> SharePayload {
        compose_share(&persisted("r1"), "https://flames.example")
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_prefers_native_share() {
        let platform = RecordingPlatform {
            native: true,
            ..Default::default()
        };
        let outcome = dispatch_share(&platform, payload()).await;
        assert!(matches!(outcome, ShareOutcome::Shared(_)));
        assert_eq!(platform.shared.lock().unwrap().len(), 1);
        assert!(platform.clipboard.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_falls_back_to_clipboard() {
        let platform = RecordingPlatform::default();
        let outcome = dispatch_share(&platform, payload()).await;
        assert!(matches!(outcome, ShareOutcome::Copied(_)));
        assert_eq!(
            platform.clipboard.lock().unwrap()[0],
            payload().clipboard_text()
        );
        assert_eq!(platform.notices.lock().unwrap()[0], CLIPBOARD_NOTICE);
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_reported_not_raised() {
        let platform = RecordingPlatform {
            fail: true,
            ..Default::default()
        };
        let outcome = dispatch_share(&platform, payload()).await;
        assert!(matches!(outcome, ShareOutcome::Failed(_)));
        assert!(platform.notices.lock().unwrap().is_empty());
    }
}
