//! Integration tests for tool-name routing and argument validation.

use gemini_search_mcp::mcp::tools;
use serde_json::json;

use super::test_helpers::{args, is_error, result_json, test_state, FakeInvoker};

#[tokio::test]
async fn unknown_tool_returns_error_envelope() {
    let invoker = FakeInvoker::echo();
    let state = test_state(invoker.clone());

    let result = tools::call(&state, "search_bing", args(json!({ "query": "q" }))).await;

    assert!(is_error(&result));
    let body = result_json(&result);
    assert_eq!(body["Type"], "UnknownOperation");
    assert!(body["Details"].as_str().unwrap_or_default().contains("search_bing"));
    assert_eq!(invoker.calls(), 0);
    assert_eq!(state.history.len().await, 0);
}

#[tokio::test]
async fn malformed_arguments_return_schema_error() {
    let invoker = FakeInvoker::echo();
    let state = test_state(invoker.clone());

    let result = tools::call(
        &state,
        "search_web_with_gemini",
        args(json!({ "query": "q", "useCache": "yes" })),
    )
    .await;

    assert!(is_error(&result));
    assert_eq!(result_json(&result)["Type"], "SchemaValidationError");
    assert_eq!(invoker.calls(), 0);
}

#[tokio::test]
async fn missing_query_returns_schema_error() {
    let state = test_state(FakeInvoker::echo());
    let result = tools::call(&state, "search_web_with_gemini", None).await;

    assert!(is_error(&result));
    assert_eq!(result_json(&result)["Type"], "SchemaValidationError");
}

#[tokio::test]
async fn concurrent_calls_share_one_cache() {
    let invoker = FakeInvoker::echo();
    let state = test_state(invoker.clone());

    let (a, b) = tokio::join!(
        tools::call(&state, "search_web_with_gemini", args(json!({ "query": "a" }))),
        tools::call(&state, "search_web_with_gemini", args(json!({ "query": "b" }))),
    );

    assert!(!is_error(&a));
    assert!(!is_error(&b));
    assert_eq!(state.cache.len().await, 2);
    assert_eq!(state.history.len().await, 2);
}
