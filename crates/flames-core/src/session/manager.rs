use std::sync::Arc;

use rand::Rng;

use super::model::{ClientSession, DEFAULT_SESSION_TTL_MS, SESSION_STORAGE_KEY, SESSION_TOKEN_LENGTH};
use super::store::{Clock, KeyValueStore, SystemClock};
use crate::error::{FlamesError, Result};

/// Creates, reuses and drops the client session token.
///
/// `SessionManager` is responsible for:
/// - Reading the persisted session record
/// - Regenerating it once expired (or unreadable)
/// - Persisting the fresh record
///
/// The record is read-modify-write without coordination; a single client
/// process is assumed to be the only writer.
pub struct SessionManager {
    /// Durable storage holding the session record
    store: Arc<dyn KeyValueStore>,
    /// Time source used for expiry decisions
    clock: Arc<dyn Clock>,
    /// Lifetime given to newly created sessions
    ttl_ms: i64,
}

impl SessionManager {
    /// Creates a manager using the system clock and the default one hour TTL.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl_ms: DEFAULT_SESSION_TTL_MS,
        }
    }

    /// Sets the lifetime of newly created sessions.
    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Returns the persisted session if still valid, otherwise a new one.
    ///
    /// # Errors
    ///
    /// Returns `FlamesError::Storage` if the store cannot be read or written.
    pub async fn get_or_create_session(&self) -> Result<ClientSession> {
        let now = self.clock.now_millis();

        if let Some(session) = self.load().await?
            && session.is_valid_at(now)
        {
            return Ok(session);
        }

        let session = ClientSession {
            id: generate_token(),
            expires_at: now.saturating_add(self.ttl_ms),
        };

        let raw = serde_json::to_string(&session)?;
        self.store
            .write(SESSION_STORAGE_KEY, &raw)
            .await
            .map_err(|e| FlamesError::storage(format!("Failed to persist session: {}", e)))?;

        tracing::info!("[Session] Created session {}", session.id);
        Ok(session)
    }

    /// Returns the persisted session record as-is, even when expired.
    pub async fn current_session(&self) -> Result<Option<ClientSession>> {
        self.load().await
    }

    /// Drops the persisted session; the next call creates a fresh one.
    pub async fn clear_session(&self) -> Result<()> {
        self.store
            .clear(SESSION_STORAGE_KEY)
            .await
            .map_err(|e| FlamesError::storage(format!("Failed to clear session: {}", e)))
    }

    async fn load(&self) -> Result<Option<ClientSession>> {
        let raw = self
            .store
            .read(SESSION_STORAGE_KEY)
            .await
            .map_err(|e| FlamesError::storage(format!("Failed to read session: {}", e)))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<ClientSession>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("[Session] Ignoring unreadable session record: {}", e);
                Ok(None)
            }
        }
    }
}

/// Generates a short lowercase base-36 token.
///
/// Collision resistance is best-effort; the token is not a secret.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    (0..SESSION_TOKEN_LENGTH)
        .map(|_| {
            let digit = rng.gen_range(0..36u32);
            char::from_digit(digit, 36).unwrap_or('0')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Mock KeyValueStore for testing
    #[derive(Default)]
    struct MockStore {
        values: Mutex<HashMap<String, String>>,
        fail: bool,
    }

    impl MockStore {
        fn failing() -> Self {
            Self {
                values: Mutex::new(HashMap::new()),
                fail: true,
            }
        }

        fn raw(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl KeyValueStore for MockStore {
        async fn read(&self, key: &str) -> Result<Option<String>> {
            if self.fail {
                return Err(FlamesError::storage("quota exceeded"));
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn write(&self, key: &str, value: &str) -> Result<()> {
            if self.fail {
                return Err(FlamesError::storage("quota exceeded"));
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn clear(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn at(ms: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(ms)))
        }

        fn advance(&self, ms: i64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_session_reused_within_expiry() {
        let store = Arc::new(MockStore::default());
        let clock = ManualClock::at(1_000_000);
        let manager = SessionManager::with_clock(store.clone(), clock.clone());

        let first = manager.get_or_create_session().await.unwrap();
        clock.advance(DEFAULT_SESSION_TTL_MS - 1);
        let second = manager.get_or_create_session().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.expires_at, 1_000_000 + DEFAULT_SESSION_TTL_MS);
    }

    #[tokio::test]
    async fn test_session_regenerated_after_expiry() {
        let store = Arc::new(MockStore::default());
        let clock = ManualClock::at(1_000_000);
        let manager = SessionManager::with_clock(store.clone(), clock.clone());

        let first = manager.get_or_create_session().await.unwrap();
        clock.advance(DEFAULT_SESSION_TTL_MS);
        let second = manager.get_or_create_session().await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.expires_at, 1_000_000 + 2 * DEFAULT_SESSION_TTL_MS);

        let persisted: ClientSession =
            serde_json::from_str(&store.raw(SESSION_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(persisted, second);
    }

    #[tokio::test]
    async fn test_existing_record_is_picked_up() {
        let store = Arc::new(MockStore::default());
        store
            .write(SESSION_STORAGE_KEY, r#"{"id":"persisted1","expiresAt":5000}"#)
            .await
            .unwrap();
        let manager = SessionManager::with_clock(store, ManualClock::at(4000));

        let session = manager.get_or_create_session().await.unwrap();
        assert_eq!(session.id, "persisted1");
    }

    #[tokio::test]
    async fn test_corrupted_record_is_replaced() {
        let store = Arc::new(MockStore::default());
        store.write(SESSION_STORAGE_KEY, "not-json").await.unwrap();
        let manager = SessionManager::with_clock(store.clone(), ManualClock::at(0));

        let session = manager.get_or_create_session().await.unwrap();
        assert_eq!(session.id.len(), SESSION_TOKEN_LENGTH);
        assert_ne!(store.raw(SESSION_STORAGE_KEY).unwrap(), "not-json");
    }

    #[tokio::test]
    async fn test_huge_ttl_saturates_instead_of_overflowing() {
        let store = Arc::new(MockStore::default());
        let config = crate::config::FlamesConfig {
            session_ttl_secs: i64::MAX as u64,
            ..crate::config::FlamesConfig::default()
        };
        let clock = ManualClock::at(1_000_000);
        let manager = SessionManager::with_clock(store, clock.clone())
            .with_ttl_ms(config.session_ttl_ms());

        let first = manager.get_or_create_session().await.unwrap();
        assert_eq!(first.expires_at, i64::MAX);

        clock.advance(DEFAULT_SESSION_TTL_MS);
        let second = manager.get_or_create_session().await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_custom_ttl() {
        let store = Arc::new(MockStore::default());
        let manager =
            SessionManager::with_clock(store, ManualClock::at(100)).with_ttl_ms(50);
        let session = manager.get_or_create_session().await.unwrap();
        assert_eq!(session.expires_at, 150);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let manager = SessionManager::with_clock(Arc::new(MockStore::failing()), ManualClock::at(0));
        let err = manager.get_or_create_session().await.unwrap_err();
        assert!(err.is_storage());
    }

    #[tokio::test]
    async fn test_clear_session_forces_new_token() {
        let store = Arc::new(MockStore::default());
        let manager = SessionManager::with_clock(store.clone(), ManualClock::at(0));

        let first = manager.get_or_create_session().await.unwrap();
        manager.clear_session().await.unwrap();
        assert!(manager.current_session().await.unwrap().is_none());

        let second = manager.get_or_create_session().await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_generated_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
