//! Client session domain model.

use serde::{Deserialize, Serialize};

/// Storage key under which the session record is persisted.
pub const SESSION_STORAGE_KEY: &str = "flames_session";

/// Default lifetime of a session token: one hour.
pub const DEFAULT_SESSION_TTL_MS: i64 = 60 * 60 * 1000;

/// Length of a generated session token.
pub const SESSION_TOKEN_LENGTH: usize = 9;

/// Opaque token scoping this client's history on the remote service.
///
/// There is no server-side session object in this crate; the service joins
/// history entries by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSession {
    pub id: String,
    /// Absolute expiry, Unix epoch milliseconds.
    pub expires_at: i64,
}

impl ClientSession {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        self.expires_at > now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_expires_at() {
        let session = ClientSession {
            id: "k3j9x0a1b".to_string(),
            expires_at: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"id":"k3j9x0a1b","expiresAt":1700000000000}"#);
    }

    #[test]
    fn test_validity_is_strict() {
        let session = ClientSession {
            id: "abc".to_string(),
            expires_at: 1000,
        };
        assert!(session.is_valid_at(999));
        assert!(!session.is_valid_at(1000));
    }
}
