//! Remote FLAMES service access.
//!
//! - `dto`: request/response wire types
//! - `gateway`: transport trait implemented by the interaction layer
//! - `client`: session-aware wrapper applying the failure policy

mod client;
mod dto;
mod gateway;

pub use client::FlamesClient;
pub use dto::{ApiEnvelope, CalculateRequest};
pub use gateway::FlamesGateway;
