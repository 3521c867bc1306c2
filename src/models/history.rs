//! Search history records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Immutable log entry describing one search attempt and its outcome.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Query text exactly as received.
    pub query: String,
    /// When the attempt completed.
    pub timestamp: DateTime<Utc>,
    /// Whether a result was returned (cache hit or successful invocation).
    pub success: bool,
    /// Failure message for unsuccessful attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryRecord {
    /// Record a successful attempt.
    #[must_use]
    pub fn succeeded(query: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            query: query.into(),
            timestamp,
            success: true,
            error: None,
        }
    }

    /// Record a failed attempt with its error message.
    #[must_use]
    pub fn failed(
        query: impl Into<String>,
        timestamp: DateTime<Utc>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            timestamp,
            success: false,
            error: Some(error.into()),
        }
    }
}
