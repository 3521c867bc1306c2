//! MCP server handler, shared application state, and tool catalog.

use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult, ListToolsResult, PaginatedRequestParam,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info_span, Instrument};

use crate::config::GlobalConfig;
use crate::mcp::request::{CLEAR_CACHE_TOOL, HISTORY_TOOL, MAX_HISTORY_LIMIT, SEARCH_TOOL};
use crate::mcp::{prompts, resources, response, tools};
use crate::search::{CliInvoker, SearchInvoker};
use crate::store::{HistoryLog, ResultCache};
use crate::AppError;

/// Shared application state accessible by all MCP handlers.
///
/// Constructed once at process start; the cache and history are the
/// process-wide stores every request sees. Requests are admitted one at a
/// time through [`AppState::admit`].
pub struct AppState {
    /// Global configuration.
    pub config: Arc<GlobalConfig>,
    /// Search result cache.
    pub cache: Arc<ResultCache>,
    /// Search attempt history.
    pub history: Arc<HistoryLog>,
    /// Backing search capability.
    pub invoker: Arc<dyn SearchInvoker>,
    request_gate: Mutex<()>,
}

impl AppState {
    /// Build state with empty stores sized from `config` and the given invoker.
    #[must_use]
    pub fn new(config: GlobalConfig, invoker: Arc<dyn SearchInvoker>) -> Self {
        Self {
            cache: Arc::new(ResultCache::new(config.cache_ttl())),
            history: Arc::new(HistoryLog::new(config.max_history)),
            config: Arc::new(config),
            invoker,
            request_gate: Mutex::new(()),
        }
    }

    /// Wait for exclusive use of the server.
    ///
    /// The transport dispatches each inbound request on its own task; every
    /// handler holds this guard until its response is built, so requests are
    /// processed one at a time in arrival order.
    pub async fn admit(&self) -> MutexGuard<'_, ()> {
        self.request_gate.lock().await
    }

    /// Build state that shells out to the configured search command.
    #[must_use]
    pub fn from_config(config: GlobalConfig) -> Self {
        let invoker = Arc::new(CliInvoker::from_config(&config));
        Self::new(config, invoker)
    }
}

/// MCP server exposing Gemini web search with caching and history.
#[derive(Clone)]
pub struct SearchServer {
    state: Arc<AppState>,
}

impl SearchServer {
    /// Create a new MCP server bound to shared application state.
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Access the shared application state.
    #[must_use]
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Convert a `serde_json::Value::Object` into the `Arc<Map>` expected by `Tool`.
    fn schema(value: serde_json::Value) -> Arc<serde_json::Map<String, serde_json::Value>> {
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::default()),
        }
    }

    /// Static catalog of every registered tool.
    #[must_use]
    pub fn all_tools() -> Vec<Tool> {
        vec![
            Tool::new(
                SEARCH_TOOL,
                "Search the web using the Gemini CLI (Google Search grounding). \
                 Results are cached for one hour unless useCache is false.",
                Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query (1-500 characters)",
                            "minLength": 1,
                            "maxLength": 500
                        },
                        "useCache": {
                            "type": "boolean",
                            "description": "Serve from and store into the result cache",
                            "default": true
                        }
                    },
                    "required": ["query"]
                })),
            ),
            Tool::new(
                CLEAR_CACHE_TOOL,
                "Clear cached search results for one query, or the entire cache when no \
                 query is given.",
                Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Exact query whose cached result should be removed"
                        }
                    }
                })),
            ),
            Tool::new(
                HISTORY_TOOL,
                "View recent search attempts, newest first.",
                Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of records to return",
                            "minimum": 1,
                            "maximum": MAX_HISTORY_LIMIT,
                            "default": 10
                        },
                        "includeErrors": {
                            "type": "boolean",
                            "description": "Include failed searches",
                            "default": true
                        }
                    }
                })),
            ),
        ]
    }
}

impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Web search through the Gemini CLI. Use search_web_with_gemini for \
                 current information; results are cached per exact query text."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + '_ {
        let span = info_span!("call_tool", tool = %request.name);

        async move {
            let _admitted = self.state.admit().await;
            Ok(tools::call(&self.state, &request.name, request.arguments).await)
        }
        .instrument(span)
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, rmcp::ErrorData>> + Send + '_ {
        async move {
            let _admitted = self.state.admit().await;
            Ok(ListToolsResult::with_all_items(Self::all_tools()))
        }
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourcesResult, rmcp::ErrorData>> + Send + '_ {
        async move {
            let _admitted = self.state.admit().await;
            Ok(resources::list_resources())
        }
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ReadResourceResult, rmcp::ErrorData>> + Send + '_ {
        let span = info_span!("read_resource", uri = %request.uri);

        async move {
            let _admitted = self.state.admit().await;
            resources::read_resource(&self.state, &request.uri)
                .await
                .map_err(|err| match err {
                    AppError::UnknownOperation(msg) => rmcp::ErrorData::resource_not_found(
                        msg.clone(),
                        Some(response::error_body(&AppError::UnknownOperation(msg))),
                    ),
                    other => response::protocol_error(&other),
                })
        }
        .instrument(span)
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListPromptsResult, rmcp::ErrorData>> + Send + '_ {
        async move {
            let _admitted = self.state.admit().await;
            Ok(prompts::list_prompts())
        }
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<GetPromptResult, rmcp::ErrorData>> + Send + '_ {
        let span = info_span!("get_prompt", prompt = %request.name);

        async move {
            let _admitted = self.state.admit().await;
            prompts::get_prompt(&request.name, request.arguments.as_ref())
                .map_err(|err| response::protocol_error(&err))
        }
        .instrument(span)
    }
}
