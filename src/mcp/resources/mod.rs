//! MCP resources reflecting live cache and history state.

pub mod cache_status;
pub mod history_recent;

use rmcp::model::{Annotated, ListResourcesResult, RawResource, ReadResourceResult, Resource};

use crate::mcp::handler::AppState;
use crate::{AppError, Result};

/// URI of the cache status resource.
pub const CACHE_STATUS_URI: &str = "gemini-search://cache/status";
/// URI of the recent history resource.
pub const HISTORY_RECENT_URI: &str = "gemini-search://history/recent";

fn json_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.into());
    raw.mime_type = Some("application/json".into());
    Annotated::new(raw, None)
}

/// Static catalog of every registered resource.
#[must_use]
pub fn list_resources() -> ListResourcesResult {
    ListResourcesResult::with_all_items(vec![
        json_resource(
            CACHE_STATUS_URI,
            cache_status::RESOURCE_NAME,
            cache_status::RESOURCE_DESCRIPTION,
        ),
        json_resource(
            HISTORY_RECENT_URI,
            history_recent::RESOURCE_NAME,
            history_recent::RESOURCE_DESCRIPTION,
        ),
    ])
}

/// Handle `resources/read` for any registered URI.
///
/// # Errors
///
/// Returns `AppError::UnknownOperation` for an unregistered URI, or
/// `AppError::Mcp` if the snapshot cannot be serialized.
pub async fn read_resource(state: &AppState, uri: &str) -> Result<ReadResourceResult> {
    match uri {
        CACHE_STATUS_URI => cache_status::read(state).await,
        HISTORY_RECENT_URI => history_recent::read(state).await,
        other => Err(AppError::UnknownOperation(format!(
            "resource '{other}' is not registered"
        ))),
    }
}
