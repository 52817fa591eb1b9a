//! Durable key/value store trait and clock abstraction.

use async_trait::async_trait;

use crate::error::Result;

/// A durable string key/value store, the equivalent of browser local storage.
///
/// Implementations decide where values live (a file, memory, ...). All
/// failures surface as [`crate::FlamesError::Storage`] or IO errors.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: A value is stored
    /// - `Ok(None)`: Nothing stored under this key
    /// - `Err(_)`: The store could not be read
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    async fn clear(&self, key: &str) -> Result<()>;
}

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Current time as Unix epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
