//! Integration tests driving `SearchServer` through the MCP protocol.
//!
//! The server is served over an in-memory duplex stream and exercised with a
//! minimal newline-delimited JSON-RPC client, so request admission, protocol
//! error mapping and shutdown are covered end to end.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gemini_search_mcp::config::GlobalConfig;
use gemini_search_mcp::mcp::handler::AppState;
use gemini_search_mcp::mcp::transport;
use gemini_search_mcp::search::SearchInvoker;
use gemini_search_mcp::Result;
use serde_json::{json, Value};
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::test_helpers::FakeInvoker;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

// ── Slow search backend ──────────────────────────────────────

/// Invoker that signals when a search starts and then takes `delay` to finish.
struct SlowInvoker {
    delay: Duration,
    started: Notify,
    calls: AtomicUsize,
}

impl SlowInvoker {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            started: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchInvoker for SlowInvoker {
    fn invoke<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            tokio::time::sleep(self.delay).await;
            Ok(format!("slow results for {query}"))
        })
    }
}

// ── Minimal JSON-RPC client ──────────────────────────────────

struct McpClient {
    writer: WriteHalf<DuplexStream>,
    lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    server: JoinHandle<Result<()>>,
    _ct: CancellationToken,
}

impl McpClient {
    /// Start a server over a duplex stream and complete the handshake.
    async fn connect(state: Arc<AppState>) -> Self {
        let (client_end, server_end) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_end);
        let ct = CancellationToken::new();
        let server = tokio::spawn(transport::serve_streams(
            state,
            server_read,
            server_write,
            ct.clone(),
        ));

        let (client_read, client_write) = tokio::io::split(client_end);
        let mut client = Self {
            writer: client_write,
            lines: BufReader::new(client_read).lines(),
            server,
            _ct: ct,
        };

        let init = client
            .request(
                0,
                "initialize",
                json!({
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": { "name": "integration-test", "version": "0.0.0" }
                }),
            )
            .await;
        assert!(init.get("result").is_some(), "initialize failed: {init}");
        client
            .send(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .await;
        client
    }

    async fn send(&mut self, message: &Value) {
        let mut line = message.to_string();
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .expect("write request");
        self.writer.flush().await.expect("flush request");
    }

    async fn send_request(&mut self, id: u64, method: &str, params: Value) {
        self.send(&json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }))
            .await;
    }

    /// Next response, skipping server notifications.
    async fn recv(&mut self) -> Value {
        loop {
            let line = tokio::time::timeout(RECV_TIMEOUT, self.lines.next_line())
                .await
                .expect("response within timeout")
                .expect("read response")
                .expect("stream open");
            let message: Value = serde_json::from_str(&line).expect("json-rpc message");
            if message.get("id").is_some() {
                return message;
            }
        }
    }

    async fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        self.send_request(id, method, params).await;
        let response = self.recv().await;
        assert_eq!(response["id"], id);
        response
    }

    /// Close the client side and wait for the server to exit.
    async fn close(mut self) -> Result<()> {
        self.writer.shutdown().await.expect("shutdown writer");
        tokio::time::timeout(RECV_TIMEOUT, self.server)
            .await
            .expect("server exits after stream close")
            .expect("server task joined")
    }
}

fn search_params(query: &str) -> Value {
    json!({ "name": "search_web_with_gemini", "arguments": { "query": query } })
}

fn state_with(invoker: Arc<dyn SearchInvoker>) -> Arc<AppState> {
    Arc::new(AppState::new(GlobalConfig::default(), invoker))
}

// ── Request admission ────────────────────────────────────────

#[tokio::test]
async fn responses_follow_request_order() {
    let invoker = SlowInvoker::new(Duration::from_millis(300));
    let mut client = McpClient::connect(state_with(invoker.clone())).await;

    client.send_request(1, "tools/call", search_params("slow query")).await;
    tokio::time::timeout(RECV_TIMEOUT, invoker.started.notified())
        .await
        .expect("search started");
    client.send_request(2, "tools/list", json!({})).await;

    let first = client.recv().await;
    let second = client.recv().await;
    assert_eq!(first["id"], 1);
    assert_eq!(
        first["result"]["content"][0]["text"],
        "slow results for slow query"
    );
    assert_eq!(second["id"], 2);
    assert_eq!(second["result"]["tools"].as_array().map(Vec::len), Some(3));

    client.close().await.expect("clean shutdown");
}

#[tokio::test]
async fn identical_pipelined_searches_invoke_once() {
    let invoker = SlowInvoker::new(Duration::from_millis(100));
    let mut client = McpClient::connect(state_with(invoker.clone())).await;

    client.send_request(1, "tools/call", search_params("same")).await;
    client.send_request(2, "tools/call", search_params("same")).await;

    for _ in 0..2 {
        let response = client.recv().await;
        assert_eq!(
            response["result"]["content"][0]["text"],
            "slow results for same"
        );
    }
    assert_eq!(invoker.calls(), 1);

    client.close().await.expect("clean shutdown");
}

// ── Protocol error mapping ───────────────────────────────────

#[tokio::test]
async fn unknown_resource_is_resource_not_found_with_envelope() {
    let mut client = McpClient::connect(state_with(FakeInvoker::echo())).await;

    let response = client
        .request(1, "resources/read", json!({ "uri": "gemini-search://nope" }))
        .await;

    let error = &response["error"];
    assert_eq!(error["code"], -32002);
    assert_eq!(error["data"]["Type"], "UnknownOperation");
    assert!(error["data"]["Details"]
        .as_str()
        .unwrap_or_default()
        .contains("gemini-search://nope"));
    assert!(!error["data"]["Solution"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn unknown_prompt_is_invalid_params() {
    let mut client = McpClient::connect(state_with(FakeInvoker::echo())).await;

    let response = client
        .request(1, "prompts/get", json!({ "name": "summarize" }))
        .await;

    assert_eq!(response["error"]["code"], -32602);
    assert_eq!(response["error"]["data"]["Type"], "UnknownOperation");
}

#[tokio::test]
async fn unknown_tool_is_an_error_result_not_a_protocol_error() {
    let mut client = McpClient::connect(state_with(FakeInvoker::echo())).await;

    let response = client
        .request(1, "tools/call", json!({ "name": "search_bing", "arguments": {} }))
        .await;

    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    let envelope: Value = serde_json::from_str(text).expect("json envelope");
    assert_eq!(envelope["Type"], "UnknownOperation");
}

#[tokio::test]
async fn server_keeps_serving_after_errors() {
    let mut client = McpClient::connect(state_with(FakeInvoker::echo())).await;

    client
        .request(1, "resources/read", json!({ "uri": "gemini-search://nope" }))
        .await;
    client
        .request(2, "prompts/get", json!({ "name": "summarize" }))
        .await;
    client.request(3, "tools/call", search_params("  ")).await;

    let search = client.request(4, "tools/call", search_params("rust")).await;
    assert_eq!(search["result"]["content"][0]["text"], "results for rust");

    let status = client
        .request(5, "resources/read", json!({ "uri": "gemini-search://cache/status" }))
        .await;
    let text = status["result"]["contents"][0]["text"]
        .as_str()
        .expect("status text");
    let body: Value = serde_json::from_str(text).expect("status json");
    assert_eq!(body["totalEntries"], 1);

    let prompt = client
        .request(
            6,
            "prompts/get",
            json!({ "name": "fact_check", "arguments": { "claim": "water boils at 100C" } }),
        )
        .await;
    assert!(prompt["result"]["messages"][0]["content"]["text"]
        .as_str()
        .unwrap_or_default()
        .contains("water boils at 100C"));

    client.close().await.expect("clean shutdown");
}

// ── Lifecycle ────────────────────────────────────────────────

#[tokio::test]
async fn closing_the_stream_shuts_the_server_down_cleanly() {
    let client = McpClient::connect(state_with(FakeInvoker::echo())).await;
    assert_eq!(client.close().await, Ok(()));
}
