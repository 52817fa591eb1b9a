//! FlamesPage - view-state of the calculator page.
//!
//! The page holds the current result, the session history, the loading and
//! celebration flags and the field errors of the last rejected submission.
//! Front ends drive it through the async methods below and render from
//! [`FlamesPage::snapshot`].

use std::sync::Arc;
use std::time::Duration;

use flames_core::api::FlamesClient;
use flames_core::config::FlamesConfig;
use flames_core::error::Result;
use flames_core::result::FlamesResult;
use flames_core::share::{ShareOutcome, SharePlatform, compose_share, dispatch_share};
use flames_core::validation::{ValidationErrors, validate};
use tokio::sync::RwLock;

use crate::page::{Celebration, PageState, RequestSlot};

/// Result of a submission from the name form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculateOutcome {
    /// Rejected locally; no request was sent
    Invalid(ValidationErrors),
    /// The service did not produce a result; state is unchanged
    Failed,
    /// Adopted as the current result
    Computed(FlamesResult),
    /// A newer action took over the current-result slot; response discarded
    Superseded,
}

pub struct FlamesPage {
    client: FlamesClient,
    share_platform: Arc<dyn SharePlatform>,
    page_origin: String,
    state: Arc<RwLock<PageState>>,
    requests: RequestSlot,
    celebration: Arc<Celebration>,
}

impl FlamesPage {
    pub fn new(
        client: FlamesClient,
        share_platform: Arc<dyn SharePlatform>,
        config: &FlamesConfig,
    ) -> Self {
        Self {
            client,
            share_platform,
            page_origin: config.page_origin.clone(),
            state: Arc::new(RwLock::new(PageState::default())),
            requests: RequestSlot::new(),
            celebration: Arc::new(Celebration::new(Duration::from_millis(
                config.celebration_ms,
            ))),
        }
    }

    pub fn client(&self) -> &FlamesClient {
        &self.client
    }

    /// Initial load: fetches the history and, when the page was opened from a
    /// share link, the shared result.
    ///
    /// Returns the shared result if it was adopted. A user action issued
    /// while the fetch is in flight supersedes it.
    pub async fn load(&self, shared_result_id: Option<&str>) -> Option<FlamesResult> {
        let shared_result_id = shared_result_id
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let Some(id) = shared_result_id else {
            self.refresh_history().await;
            return None;
        };

        let ticket = self.requests.issue().await;
        let fetch = async {
            tokio::select! {
                biased;
                _ = ticket.cancelled() => None,
                result = self.client.get_by_id(id) => Some(result),
            }
        };
        let ((), response) = tokio::join!(self.refresh_history(), fetch);

        let mut state = self.state.write().await;
        let Some(response) = response else {
            tracing::debug!("[Page] Shared result {} superseded before it resolved", id);
            return None;
        };
        if !self.requests.settle(&ticket).await {
            tracing::debug!("[Page] Discarding stale shared result {}", id);
            return None;
        }
        // A calculation this load superseded left the flag raised.
        state.is_loading = false;

        match response {
            Some(result) => {
                tracing::info!("[Page] Showing shared result {}", id);
                state.current = Some(result.clone());
                Some(result)
            }
            None => {
                tracing::warn!("[Page] Shared result {} could not be loaded", id);
                None
            }
        }
    }

    /// Validates and submits the two names.
    pub async fn calculate(&self, name_one: &str, name_two: &str) -> CalculateOutcome {
        let names = match validate(name_one, name_two) {
            Ok(names) => names,
            Err(errors) => {
                self.state.write().await.field_errors = errors.clone();
                return CalculateOutcome::Invalid(errors);
            }
        };

        let ticket = self.requests.issue().await;
        {
            let mut state = self.state.write().await;
            state.field_errors = ValidationErrors::default();
            state.is_loading = true;
        }

        let response = tokio::select! {
            biased;
            _ = ticket.cancelled() => None,
            result = self.client.calculate_flames(&names.name_one, &names.name_two) => Some(result),
        };

        let mut state = self.state.write().await;
        // The superseding request clears the loading flag once it settles.
        let Some(response) = response else {
            return CalculateOutcome::Superseded;
        };
        if !self.requests.settle(&ticket).await {
            tracing::debug!(
                "[Page] Discarding stale result for {} + {}",
                names.name_one,
                names.name_two
            );
            return CalculateOutcome::Superseded;
        }
        state.is_loading = false;

        let Some(result) = response else {
            tracing::warn!(
                "[Page] No result for {} + {}; keeping the form as is",
                names.name_one,
                names.name_two
            );
            return CalculateOutcome::Failed;
        };

        state.current = Some(result.clone());
        state.history.insert(0, result.clone());
        if result.result.is_romantic() {
            self.celebrate(&mut state);
        }

        CalculateOutcome::Computed(result)
    }

    /// Returns to the name form, abandoning any pending request.
    pub async fn new_calculation(&self) {
        let mut state = self.state.write().await;
        self.requests.reset().await;
        state.current = None;
        state.is_loading = false;
        state.field_errors = ValidationErrors::default();
    }

    /// Replaces the history with the service's view of it.
    pub async fn refresh_history(&self) {
        let history = self.client.get_history().await;
        self.state.write().await.history = history;
    }

    /// Deletes a history entry, then refetches the history.
    ///
    /// # Errors
    ///
    /// Propagates the delete failure; the history is left untouched.
    pub async fn delete_history_item(&self, id: &str) -> Result<()> {
        self.client.delete_history_item(id).await?;
        tracing::info!("[Page] Deleted history item {}", id);
        self.refresh_history().await;
        Ok(())
    }

    /// Shares the current result.
    ///
    /// Does nothing when there is no current result or it has no id.
    pub async fn share(&self) -> ShareOutcome {
        let Some(current) = self.state.read().await.current.clone() else {
            return ShareOutcome::Skipped;
        };
        self.share_result(&current).await
    }

    /// Shares an arbitrary persisted result through the page's platform.
    pub async fn share_result(&self, result: &FlamesResult) -> ShareOutcome {
        match compose_share(result, &self.page_origin) {
            Ok(Some(payload)) => dispatch_share(self.share_platform.as_ref(), payload).await,
            Ok(None) => {
                tracing::debug!("[Page] Result has no id; nothing to share");
                ShareOutcome::Skipped
            }
            Err(e) => {
                tracing::error!("[Page] Failed to build share link: {}", e);
                ShareOutcome::Failed(e.to_string())
            }
        }
    }

    /// Dismisses the celebration before its timer runs out.
    pub async fn acknowledge_celebration(&self) {
        let mut state = self.state.write().await;
        self.celebration.dismiss();
        state.show_celebration = false;
    }

    pub async fn snapshot(&self) -> PageState {
        self.state.read().await.clone()
    }

    /// Raises the celebration flag and schedules its removal.
    fn celebrate(&self, state: &mut PageState) {
        state.show_celebration = true;
        let generation = self.celebration.begin();

        let page_state = Arc::clone(&self.state);
        let celebration = Arc::clone(&self.celebration);
        tokio::spawn(async move {
            tokio::time::sleep(celebration.duration()).await;
            let mut state = page_state.write().await;
            if celebration.is_current(generation) {
                state.show_celebration = false;
            }
        });
    }
}
