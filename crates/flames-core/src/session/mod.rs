//! Client session domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted session record (`ClientSession`)
//! - `store`: durable key/value storage and clock traits
//! - `manager`: session lifecycle (`SessionManager`)
//!
//! # Usage
//!
//! ```ignore
//! use flames_core::session::{SessionManager, KeyValueStore};
//!
//! let manager = SessionManager::new(store);
//! let session = manager.get_or_create_session().await?;
//! ```

mod manager;
mod model;
mod store;

pub use manager::{SessionManager, generate_token};
pub use model::{ClientSession, DEFAULT_SESSION_TTL_MS, SESSION_STORAGE_KEY, SESSION_TOKEN_LENGTH};
pub use store::{Clock, KeyValueStore, SystemClock};
