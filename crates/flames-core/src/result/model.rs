//! FLAMES result domain model.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::category::RelationshipCategory;

/// A single FLAMES computation, as returned by the remote service.
///
/// Entries pulled from history are never edited in place; the history list
/// is only ever replaced wholesale or shortened by a remote delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlamesResult {
    /// Server-assigned identifier. `None` until the result has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name_one: String,
    pub name_two: String,
    pub result: RelationshipCategory,
    /// ISO 8601 timestamp set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl FlamesResult {
    /// Builds a result that has not been round-tripped through the service.
    pub fn unpersisted(
        name_one: impl Into<String>,
        name_two: impl Into<String>,
        result: RelationshipCategory,
    ) -> Self {
        Self {
            id: None,
            name_one: name_one.into(),
            name_two: name_two.into(),
            result,
            timestamp: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Human readable label for the history list.
    ///
    /// Results without a timestamp are shown as "Just now". Timestamps that
    /// do not parse as RFC 3339 are shown verbatim.
    pub fn timestamp_label(&self) -> String {
        match &self.timestamp {
            None => "Just now".to_string(),
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(ts) => ts
                    .with_timezone(&Local)
                    .format("%b %-d, %I:%M %p")
                    .to_string(),
                Err(_) => raw.clone(),
            },
        }
    }
}
