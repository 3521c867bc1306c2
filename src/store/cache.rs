//! Result cache keyed by the raw query string with lazy TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::cache::CacheEntry;

/// Point-in-time view of one cache entry, used by the cache status resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshotEntry {
    /// Cache key (the query exactly as received).
    pub query: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
    /// Age at snapshot time.
    pub age: Duration,
    /// When the entry stops being served.
    pub expires_at: DateTime<Utc>,
    /// Whether the entry is past its TTL but not yet replaced.
    pub expired: bool,
}

/// Bounded-lifetime query → result store.
///
/// Expired entries are never swept proactively: a lookup treats them as
/// absent and the next `put` for the same key overwrites them.
#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResultCache {
    /// Create an empty cache with the given entry lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh value for `query`.
    pub async fn get(&self, query: &str) -> Option<String> {
        self.get_at(query, Utc::now()).await
    }

    /// Look up a value as of `now`; entries with `now - created_at >= ttl` are absent.
    pub async fn get_at(&self, query: &str, now: DateTime<Utc>) -> Option<String> {
        let entries = self.entries.lock().await;
        match entries.get(query) {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                debug!(query, "cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(query, "cache entry expired");
                None
            }
            None => {
                debug!(query, "cache miss");
                None
            }
        }
    }

    /// Insert or overwrite the value for `query`, stamped with the current time.
    pub async fn put(&self, query: &str, value: String) {
        self.put_at(query, value, Utc::now()).await;
    }

    /// Insert or overwrite the value for `query`, stamped with `now`.
    pub async fn put_at(&self, query: &str, value: String, now: DateTime<Utc>) {
        self.entries
            .lock()
            .await
            .insert(query.to_owned(), CacheEntry::new(value, now));
    }

    /// Remove the entry for `query`; returns whether it existed.
    pub async fn invalidate(&self, query: &str) -> bool {
        self.entries.lock().await.remove(query).is_some()
    }

    /// Remove every entry; returns the number of entries removed.
    pub async fn invalidate_all(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let count = entries.len();
        entries.clear();
        count
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// All stored entries as of `now`, newest first.
    pub async fn snapshot(&self, now: DateTime<Utc>) -> Vec<CacheSnapshotEntry> {
        let entries = self.entries.lock().await;
        let mut snapshot: Vec<CacheSnapshotEntry> = entries
            .iter()
            .map(|(query, entry)| CacheSnapshotEntry {
                query: query.clone(),
                created_at: entry.created_at,
                age: entry.age(now),
                expires_at: entry.expires_at(self.ttl),
                expired: !entry.is_fresh(now, self.ttl),
            })
            .collect();
        drop(entries);

        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        snapshot
    }
}
