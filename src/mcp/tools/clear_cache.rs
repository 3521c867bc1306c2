//! `clear_gemini_search_cache` MCP tool handler.
//!
//! Invalidates a single cached query or the whole cache. History is never
//! touched.

use rmcp::model::CallToolResult;
use tracing::info;

use crate::mcp::handler::AppState;
use crate::mcp::request::ClearCacheArgs;
use crate::mcp::response;

/// Result of a cache clear request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// A single key was targeted.
    Single {
        /// Query that was invalidated.
        query: String,
        /// Whether an entry existed for it.
        existed: bool,
    },
    /// The whole cache was emptied.
    All {
        /// Number of entries present before clearing.
        cleared: usize,
    },
}

impl ClearOutcome {
    /// Human-readable summary returned to the client.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Single {
                query,
                existed: true,
            } => format!("Cleared cached result for query: \"{query}\""),
            Self::Single {
                query,
                existed: false,
            } => format!("No cached result found for query: \"{query}\""),
            Self::All { cleared } => format!("Cleared {cleared} cached search result(s)"),
        }
    }
}

/// Invalidate `query`, or every entry when `query` is `None`.
pub async fn clear(state: &AppState, query: Option<&str>) -> ClearOutcome {
    let outcome = match query {
        Some(query) => ClearOutcome::Single {
            query: query.to_owned(),
            existed: state.cache.invalidate(query).await,
        },
        None => ClearOutcome::All {
            cleared: state.cache.invalidate_all().await,
        },
    };
    info!(?outcome, "search cache cleared");
    outcome
}

/// Handle the `clear_gemini_search_cache` tool call.
pub async fn handle(state: &AppState, args: ClearCacheArgs) -> CallToolResult {
    let outcome = clear(state, args.query.as_deref()).await;
    response::text(outcome.message())
}
