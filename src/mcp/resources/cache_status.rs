//! `gemini-search://cache/status` MCP resource.
//!
//! Snapshot of every cache entry with its age and expiry time, taken at
//! read time.

use chrono::{DateTime, Utc};
use rmcp::model::{ReadResourceResult, ResourceContents};
use serde_json::{json, Value};

use super::CACHE_STATUS_URI;
use crate::mcp::handler::AppState;
use crate::Result;

/// Human-readable name for this resource.
pub const RESOURCE_NAME: &str = "Search Cache Status";

/// Description of this resource.
pub const RESOURCE_DESCRIPTION: &str =
    "Cached Gemini search results with their age and expiry time.";

/// Build the `{totalEntries, ttlMinutes, entries}` snapshot as of `now`.
pub async fn snapshot_body(state: &AppState, now: DateTime<Utc>) -> Value {
    let entries: Vec<Value> = state
        .cache
        .snapshot(now)
        .await
        .into_iter()
        .map(|entry| {
            json!({
                "query": entry.query,
                "timestamp": entry.created_at.to_rfc3339(),
                "ageMinutes": entry.age.as_secs() / 60,
                "expires": entry.expires_at.to_rfc3339(),
                "expired": entry.expired,
            })
        })
        .collect();

    json!({
        "totalEntries": entries.len(),
        "ttlMinutes": state.cache.ttl().as_secs() / 60,
        "entries": entries,
    })
}

/// Handle `resources/read` for the cache status resource.
///
/// # Errors
///
/// Infallible today; the signature matches the other resource readers.
pub async fn read(state: &AppState) -> Result<ReadResourceResult> {
    let body = snapshot_body(state, Utc::now()).await;
    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(
            format!("{body:#}"),
            CACHE_STATUS_URI,
        )],
    })
}
