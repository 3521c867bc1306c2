//! MCP tool handlers and the tool-call dispatcher.

pub mod clear_cache;
pub mod search_web;
pub mod view_history;

use rmcp::model::CallToolResult;
use serde_json::{Map, Value};
use tracing::warn;

use crate::mcp::handler::AppState;
use crate::mcp::request::ToolRequest;
use crate::mcp::response;

/// Decode and execute one tool call.
///
/// Every failure, including unknown tools and malformed arguments, is
/// returned as an `isError` result rather than a protocol error.
pub async fn call(
    state: &AppState,
    name: &str,
    arguments: Option<Map<String, Value>>,
) -> CallToolResult {
    let request = match ToolRequest::decode(name, arguments) {
        Ok(request) => request,
        Err(err) => {
            warn!(tool = name, %err, "rejected tool call");
            return response::error(&err);
        }
    };

    match request {
        ToolRequest::Search(args) => search_web::handle(state, args).await,
        ToolRequest::ClearCache(args) => clear_cache::handle(state, args).await,
        ToolRequest::ViewHistory(args) => view_history::handle(state, &args).await,
    }
}
