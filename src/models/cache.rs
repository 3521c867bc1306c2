//! Cached search result entries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single cached search result, stamped with its creation time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Raw output of the external search program.
    pub value: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry created at `now`.
    #[must_use]
    pub fn new(value: String, now: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at: now,
        }
    }

    /// Time elapsed since creation; zero if `now` precedes `created_at`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// An entry is valid while `now - created_at < ttl`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }

    /// Instant at which the entry stops being served.
    #[must_use]
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
