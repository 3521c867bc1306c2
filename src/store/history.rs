//! Size-bounded, append-only search history.

use std::collections::VecDeque;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::history::HistoryRecord;

/// Ordered log of search attempts, oldest evicted first once full.
#[derive(Debug)]
pub struct HistoryLog {
    capacity: usize,
    records: Mutex<VecDeque<HistoryRecord>>,
}

impl HistoryLog {
    /// Create an empty log holding at most `capacity` records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Maximum number of retained records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a successful attempt stamped with the current time.
    pub async fn record_success(&self, query: &str) {
        self.push(HistoryRecord::succeeded(query, Utc::now())).await;
    }

    /// Append a failed attempt stamped with the current time.
    pub async fn record_failure(&self, query: &str, error: impl Into<String>) {
        self.push(HistoryRecord::failed(query, Utc::now(), error)).await;
    }

    /// Append `record`, evicting the oldest records past capacity.
    ///
    /// Records are kept in insertion order; callers stamping their own
    /// timestamps are expected to push them chronologically.
    pub async fn push(&self, record: HistoryRecord) {
        let mut records = self.records.lock().await;
        records.push_back(record);
        while records.len() > self.capacity {
            records.pop_front();
        }
    }

    /// Up to `limit` most recent records, newest first.
    ///
    /// When `include_errors` is false, failed records are dropped before the
    /// limit is applied.
    pub async fn recent(&self, limit: usize, include_errors: bool) -> Vec<HistoryRecord> {
        self.records
            .lock()
            .await
            .iter()
            .rev()
            .filter(|record| include_errors || record.success)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of retained records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether no records have been retained.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}
