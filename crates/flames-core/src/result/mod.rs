//! FLAMES result domain module.
//!
//! - `category`: the closed set of relationship outcomes
//! - `model`: the `FlamesResult` entity exchanged with the remote service

mod category;
mod model;

pub use category::RelationshipCategory;
pub use model::FlamesResult;
