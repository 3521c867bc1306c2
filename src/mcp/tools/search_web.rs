//! `search_web_with_gemini` MCP tool handler.
//!
//! Validates the query, serves it from the result cache when allowed, and
//! otherwise invokes the external search program. Every attempt that passes
//! validation is appended to the search history, failures included.

use rmcp::model::CallToolResult;
use tracing::{info, info_span, warn, Instrument};

use crate::mcp::handler::AppState;
use crate::mcp::request::SearchArgs;
use crate::mcp::response;
use crate::{AppError, Result};

/// Query length in characters, the unit the length limit is expressed in.
#[must_use]
pub fn query_length(query: &str) -> usize {
    query.chars().count()
}

/// Reject empty, whitespace-only, and over-long queries.
///
/// Length is measured in characters; a query of exactly `max_len`
/// characters is accepted.
///
/// # Errors
///
/// Returns `AppError::InvalidQuery` describing the violated rule.
pub fn validate_query(query: &str, max_len: usize) -> Result<()> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidQuery("query must not be empty".into()));
    }

    let len = query_length(query);
    if len > max_len {
        return Err(AppError::InvalidQuery(format!(
            "query is {len} characters long; the maximum is {max_len}"
        )));
    }

    Ok(())
}

/// Run a cache-aware search for `query`.
///
/// The query is used verbatim as the cache key. Failed invocations are
/// recorded in history and never cached.
///
/// # Errors
///
/// Returns `AppError::InvalidQuery` before touching the cache or history,
/// or the invoker's `NotFound` / `Execution` error after recording it.
pub async fn search(state: &AppState, query: &str, use_cache: bool) -> Result<String> {
    validate_query(query, state.config.max_query_length)?;

    if use_cache {
        if let Some(cached) = state.cache.get(query).await {
            state.history.record_success(query).await;
            info!(cached = true, "search served from cache");
            return Ok(cached);
        }
    }

    match state.invoker.invoke(query).await {
        Ok(result) => {
            if use_cache {
                state.cache.put(query, result.clone()).await;
            }
            state.history.record_success(query).await;
            info!(cached = false, bytes = result.len(), "search completed");
            Ok(result)
        }
        Err(err) => {
            state.history.record_failure(query, err.detail()).await;
            warn!(%err, "search failed");
            Err(err)
        }
    }
}

/// Handle the `search_web_with_gemini` tool call.
pub async fn handle(state: &AppState, args: SearchArgs) -> CallToolResult {
    let span = info_span!(
        "search_web_with_gemini",
        use_cache = args.use_cache,
        query_len = query_length(&args.query),
    );

    async move {
        match search(state, &args.query, args.use_cache).await {
            Ok(result) => response::text(result),
            Err(err) => response::error(&err),
        }
    }
    .instrument(span)
    .await
}
