//! Typed tool requests decoded from raw MCP call arguments.
//!
//! Each tool has its own argument struct; [`ToolRequest::decode`] routes a
//! call by name and rejects arguments that do not fit the declared shape
//! before anything reaches the dispatcher.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{AppError, Result};

/// Search the web through the Gemini CLI.
pub const SEARCH_TOOL: &str = "search_web_with_gemini";
/// Invalidate one or all cached search results.
pub const CLEAR_CACHE_TOOL: &str = "clear_gemini_search_cache";
/// List recent search attempts.
pub const HISTORY_TOOL: &str = "view_search_history";

/// Default number of records returned by `view_search_history`.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Largest accepted `limit` for `view_search_history`.
pub const MAX_HISTORY_LIMIT: u32 = 100;

fn default_true() -> bool {
    true
}

fn default_history_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

/// Arguments for [`SEARCH_TOOL`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// Search query, used verbatim as the cache key.
    pub query: String,
    /// Serve from and populate the result cache (default: `true`).
    #[serde(default = "default_true")]
    pub use_cache: bool,
}

/// Arguments for [`CLEAR_CACHE_TOOL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheArgs {
    /// Single query to invalidate; clears everything when absent.
    #[serde(default)]
    pub query: Option<String>,
}

/// Arguments for [`HISTORY_TOOL`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryArgs {
    /// Maximum number of records to return.
    #[serde(default = "default_history_limit")]
    pub limit: u32,
    /// Include failed attempts (default: `true`).
    #[serde(default = "default_true")]
    pub include_errors: bool,
}

impl Default for HistoryArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
            include_errors: true,
        }
    }
}

/// One validated tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    /// `search_web_with_gemini`
    Search(SearchArgs),
    /// `clear_gemini_search_cache`
    ClearCache(ClearCacheArgs),
    /// `view_search_history`
    ViewHistory(HistoryArgs),
}

impl ToolRequest {
    /// Decode a tool call from its name and raw JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownOperation` for an unregistered tool name and
    /// `AppError::SchemaValidation` when the arguments do not match the tool's
    /// declared shape.
    pub fn decode(name: &str, arguments: Option<Map<String, Value>>) -> Result<Self> {
        let args = Value::Object(arguments.unwrap_or_default());
        match name {
            SEARCH_TOOL => parse(name, args).map(Self::Search),
            CLEAR_CACHE_TOOL => parse(name, args).map(Self::ClearCache),
            HISTORY_TOOL => {
                let args: HistoryArgs = parse(name, args)?;
                if args.limit == 0 || args.limit > MAX_HISTORY_LIMIT {
                    return Err(AppError::SchemaValidation(format!(
                        "limit must be between 1 and {MAX_HISTORY_LIMIT}, got {}",
                        args.limit
                    )));
                }
                Ok(Self::ViewHistory(args))
            }
            other => Err(AppError::UnknownOperation(format!(
                "tool '{other}' is not registered"
            ))),
        }
    }

    /// Registered name of the tool this request targets.
    #[must_use]
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Search(_) => SEARCH_TOOL,
            Self::ClearCache(_) => CLEAR_CACHE_TOOL,
            Self::ViewHistory(_) => HISTORY_TOOL,
        }
    }
}

fn parse<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|err| AppError::SchemaValidation(format!("invalid {tool} arguments: {err}")))
}
