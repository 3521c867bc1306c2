//! `gemini-search://history/recent` MCP resource.

use rmcp::model::{ReadResourceResult, ResourceContents};

use super::HISTORY_RECENT_URI;
use crate::mcp::handler::AppState;
use crate::mcp::tools::view_history;
use crate::Result;

/// Human-readable name for this resource.
pub const RESOURCE_NAME: &str = "Recent Search History";

/// Description of this resource.
pub const RESOURCE_DESCRIPTION: &str =
    "The most recent Gemini search attempts, newest first, including failures.";

/// Handle `resources/read` for the recent history resource.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the records cannot be serialized.
pub async fn read(state: &AppState) -> Result<ReadResourceResult> {
    let body =
        view_history::history_body(state, state.config.history_resource_limit, true).await?;
    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(
            format!("{body:#}"),
            HISTORY_RECENT_URI,
        )],
    })
}
