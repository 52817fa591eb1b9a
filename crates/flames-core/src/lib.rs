//! Domain layer of the FLAMES client: result model, validation, session
//! lifecycle, remote service contract and share links.

pub mod api;
pub mod config;
pub mod error;
pub mod result;
pub mod session;
pub mod share;
pub mod validation;

// Re-export common error type
pub use error::FlamesError;
pub use result::{FlamesResult, RelationshipCategory};
