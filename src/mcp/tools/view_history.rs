//! `view_search_history` MCP tool handler.

use rmcp::model::CallToolResult;
use serde_json::json;

use crate::mcp::handler::AppState;
use crate::mcp::request::HistoryArgs;
use crate::mcp::response;
use crate::models::history::HistoryRecord;
use crate::{AppError, Result};

/// Most recent records, newest first. Read-only.
pub async fn list(state: &AppState, limit: usize, include_errors: bool) -> Vec<HistoryRecord> {
    state.history.recent(limit, include_errors).await
}

/// Build the `{total, showing, history}` payload.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the records cannot be serialized.
pub async fn history_body(
    state: &AppState,
    limit: usize,
    include_errors: bool,
) -> Result<serde_json::Value> {
    let records = list(state, limit, include_errors).await;
    let total = state.history.len().await;
    let history = serde_json::to_value(&records)
        .map_err(|err| AppError::Mcp(format!("failed to serialize history: {err}")))?;

    Ok(json!({
        "total": total,
        "showing": records.len(),
        "history": history,
    }))
}

/// Handle the `view_search_history` tool call.
pub async fn handle(state: &AppState, args: &HistoryArgs) -> CallToolResult {
    let limit = usize::try_from(args.limit).unwrap_or(usize::MAX);
    match history_body(state, limit, args.include_errors).await {
        Ok(body) => response::json_text(&body),
        Err(err) => response::error(&err),
    }
}
