//! Ownership of the current-result slot.
//!
//! Every request that may write the current result takes a ticket. Taking a
//! ticket cancels the previous pending one, and a response is adopted only
//! while its token is still the latest issued.

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Monotonically increasing request identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Token plus the cancellation signal of one issued request.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    token: RequestToken,
    cancel: CancellationToken,
}

impl RequestTicket {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once a newer request (or an explicit reset) supersedes this one.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }
}

#[derive(Debug, Default)]
struct SlotState {
    latest: u64,
    pending: Option<CancellationToken>,
}

#[derive(Debug, Default)]
pub struct RequestSlot {
    inner: Mutex<SlotState>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, cancelling the one still pending.
    pub async fn issue(&self) -> RequestTicket {
        let mut slot = self.inner.lock().await;
        if let Some(previous) = slot.pending.take() {
            previous.cancel();
        }

        slot.latest += 1;
        let cancel = CancellationToken::new();
        slot.pending = Some(cancel.clone());

        RequestTicket {
            token: RequestToken(slot.latest),
            cancel,
        }
    }

    /// Cancels the pending request without issuing a new one.
    ///
    /// Any response still in flight becomes stale.
    pub async fn reset(&self) {
        let mut slot = self.inner.lock().await;
        if let Some(previous) = slot.pending.take() {
            previous.cancel();
        }
        slot.latest += 1;
    }

    /// Marks `ticket` finished. Returns whether its response may be adopted.
    pub async fn settle(&self, ticket: &RequestTicket) -> bool {
        let mut slot = self.inner.lock().await;
        if slot.latest != ticket.token.0 {
            return false;
        }
        slot.pending = None;
        true
    }
}
