//! Tool response envelopes and protocol error mapping.

use rmcp::model::{CallToolResult, Content};
use serde_json::{json, Value};
use tracing::error;

use crate::AppError;

/// Structured `{Type, Details, Solution}` description of an error.
#[must_use]
pub fn error_body(err: &AppError) -> Value {
    json!({
        "Type": err.error_type(),
        "Details": err.detail(),
        "Solution": err.solution(),
    })
}

/// Successful tool result carrying a single text block.
#[must_use]
pub fn text(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Successful tool result carrying pretty-printed JSON as text.
#[must_use]
pub fn json_text(body: &Value) -> CallToolResult {
    text(format!("{body:#}"))
}

/// Tool result with `isError: true` and the error envelope as text.
#[must_use]
pub fn error(err: &AppError) -> CallToolResult {
    if err.is_internal() {
        error!(%err, "internal fault while handling tool call");
    }
    CallToolResult::error(vec![Content::text(format!("{:#}", error_body(err)))])
}

/// Map an error on a resource or prompt request to a protocol error.
#[must_use]
pub fn protocol_error(err: &AppError) -> rmcp::ErrorData {
    let data = Some(error_body(err));
    match err {
        AppError::InvalidQuery(_)
        | AppError::UnknownOperation(_)
        | AppError::SchemaValidation(_) => rmcp::ErrorData::invalid_params(err.to_string(), data),
        _ => {
            error!(%err, "internal fault while handling request");
            rmcp::ErrorData::internal_error(err.to_string(), data)
        }
    }
}
