// MCP server implementation: JSON-RPC dispatch over any transport

use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

use malgn_core::{KnowledgeBase, ValidationEngine};

use crate::error::ToolCallError;
use crate::format;
use crate::protocol::{
    CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, Reply, ServerCapabilities, ServerInfo,
};
use crate::tools::{normalize_aliases, unknown_parameters, ToolExecutor, ToolKind, ToolRegistry};

/// Largest accepted stdio line (10MB)
pub const MAX_LINE_LENGTH: usize = 10 * 1024 * 1024;

pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
pub const DEFAULT_SERVER_NAME: &str = "malgn-mcp";

/// What tools/call does with argument keys a tool does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownParamPolicy {
    /// Fail the call with -32602
    #[default]
    Reject,
    /// Map camelCase aliases, drop the rest and append a warning to the result
    Warn,
}

impl FromStr for UnknownParamPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(UnknownParamPolicy::Reject),
            "warn" => Ok(UnknownParamPolicy::Warn),
            other => anyhow::bail!("Invalid unknown_params policy: {} (expected reject or warn)", other),
        }
    }
}

impl fmt::Display for UnknownParamPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownParamPolicy::Reject => f.write_str("reject"),
            UnknownParamPolicy::Warn => f.write_str("warn"),
        }
    }
}

/// Protocol-level settings, the `[mcp]` section of the server config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpSettings {
    pub protocol_version: String,
    pub server_name: String,
    pub server_version: String,
    pub unknown_params: UnknownParamPolicy,
}

impl Default for McpSettings {
    fn default() -> Self {
        Self {
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            unknown_params: UnknownParamPolicy::default(),
        }
    }
}

/// Runs one resolved tool call and renders its result as text
pub trait ToolRunner: fmt::Debug + Send + Sync {
    fn run(&self, kind: ToolKind, arguments: Map<String, Value>) -> Result<String, ToolCallError>;
}

impl ToolRunner for ToolExecutor {
    fn run(&self, kind: ToolKind, arguments: Map<String, Value>) -> Result<String, ToolCallError> {
        self.execute(kind, arguments)
            .map(|output| format::render(&output))
    }
}

/// Stateless JSON-RPC engine; every message is handled independently
#[derive(Debug, Clone)]
pub struct McpServer {
    settings: McpSettings,
    registry: Arc<ToolRegistry>,
    executor: ToolExecutor,
    runner: Arc<dyn ToolRunner>,
}

impl McpServer {
    pub fn new(settings: McpSettings, registry: ToolRegistry, executor: ToolExecutor) -> Self {
        Self {
            settings,
            registry: Arc::new(registry),
            runner: Arc::new(executor.clone()),
            executor,
        }
    }

    /// Server over the embedded knowledge base and the built-in rule catalog
    pub fn builtin(settings: McpSettings) -> Result<Self> {
        let knowledge = KnowledgeBase::load().context("Failed to load knowledge base")?;
        let engine = ValidationEngine::builtin().context("Failed to compile validation rules")?;
        let executor = ToolExecutor::new(Arc::new(knowledge), Arc::new(engine));

        let registry = ToolRegistry::builtin();
        tracing::info!("Registered {} tools", registry.len());

        Ok(Self::new(settings, registry, executor))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn executor(&self) -> &ToolExecutor {
        &self.executor
    }

    /// Handle a parsed payload: one message or a batch
    ///
    /// Returns `None` when no message required a reply.
    pub fn handle_payload(&self, payload: Value) -> Option<Reply> {
        match payload {
            Value::Array(messages) => {
                let responses: Vec<JsonRpcResponse> = messages
                    .into_iter()
                    .filter_map(|message| self.handle_message(message))
                    .collect();
                if responses.is_empty() {
                    None
                } else {
                    Some(Reply::Batch(responses))
                }
            }
            message => self.handle_message(message).map(Reply::Single),
        }
    }

    /// Handle one message; notifications and non-requests yield `None`
    pub fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let request = JsonRpcRequest::classify(message)?;
        Some(self.dispatch(request))
    }

    fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        tracing::debug!(method = %request.method, id = %id, "Dispatching request");

        let result = match request.method.as_str() {
            "initialize" => to_result(&self.initialize_result()),
            "ping" => Ok(Value::Object(Map::new())),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => match self.call_tool(request.params) {
                Ok(result) => to_result(&result),
                Err(err) => Err(err.to_rpc_error()),
            },
            other => Err(JsonRpcError::method_not_found(other)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: self.settings.protocol_version.clone(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: self.settings.server_name.clone(),
                version: self.settings.server_version.clone(),
            },
        }
    }

    /// The tools/call path: resolve, check arguments, execute, render
    pub fn call_tool(&self, params: Option<Value>) -> Result<CallToolResult, ToolCallError> {
        let mut params = match params {
            Some(Value::Object(params)) => params,
            _ => Map::new(),
        };

        let name = match params.remove("name") {
            Some(Value::String(name)) if !name.is_empty() => name,
            _ => return Err(ToolCallError::MissingName),
        };

        let tool = self.registry.get(&name).ok_or_else(|| {
            tracing::warn!(tool = %name, "Rejected call to unknown tool");
            ToolCallError::UnknownTool(name.clone())
        })?;

        let arguments = match params.remove("arguments") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(arguments)) => arguments,
            Some(_) => {
                return Err(ToolCallError::InvalidArguments {
                    tool: name,
                    message: "arguments must be an object".to_string(),
                })
            }
        };

        let (arguments, ignored) = match self.settings.unknown_params {
            UnknownParamPolicy::Reject => {
                let unknown = unknown_parameters(&arguments, tool);
                if !unknown.is_empty() {
                    tracing::warn!(tool = %name, unknown = ?unknown, "Rejected unknown parameters");
                    return Err(ToolCallError::UnknownParameters {
                        tool: name,
                        unknown,
                        valid: tool.parameter_names().map(str::to_string).collect(),
                    });
                }
                (arguments, Vec::new())
            }
            UnknownParamPolicy::Warn => {
                let normalized = normalize_aliases(arguments, tool);
                (normalized.arguments, normalized.ignored)
            }
        };

        let mut text = self.run_tool(tool.kind, arguments)?;

        if !ignored.is_empty() {
            tracing::warn!(tool = %name, ignored = ?ignored, "Ignored unknown parameters");
            let valid: Vec<&str> = tool.parameter_names().collect();
            text.push_str(&format!(
                "\n\n---\n[WARNING] Ignored unknown parameter(s): {}. Valid parameters: {}",
                ignored.join(", "),
                valid.join(", ")
            ));
        }

        Ok(CallToolResult::text(text))
    }

    fn run_tool(&self, kind: ToolKind, arguments: Map<String, Value>) -> Result<String, ToolCallError> {
        run_guarded(kind, || self.runner.run(kind, arguments))
    }

    /// Handle one line of the stdio transport
    ///
    /// Malformed JSON yields a parse error with a null id; nothing to say yields `None`.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let reply = match serde_json::from_str::<Value>(line) {
            Ok(payload) => to_line(&self.handle_payload(payload)?),
            Err(err) => {
                tracing::debug!("Failed to parse line: {}", err);
                to_line(&parse_error_response())
            }
        };

        match reply {
            Ok(line) => Some(line),
            Err(err) => {
                tracing::error!("Failed to serialize response: {}", err);
                None
            }
        }
    }

    /// Serve newline-delimited JSON-RPC until the reader reaches EOF
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let reply = match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(&line),
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    tracing::warn!("Discarded line longer than {} bytes", MAX_LINE_LENGTH);
                    to_line(&parse_error_response()).ok()
                }
                Err(LinesCodecError::Io(err)) => {
                    return Err(err).context("Failed to read from transport");
                }
            };

            if let Some(reply) = reply {
                sink.send(reply)
                    .await
                    .context("Failed to write to transport")?;
            }
        }

        tracing::info!("Transport closed");
        Ok(())
    }

    /// Serve over the process's stdin and stdout
    pub async fn serve_stdio(&self) -> Result<()> {
        tracing::info!(
            protocol_version = %self.settings.protocol_version,
            unknown_params = %self.settings.unknown_params,
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|err| JsonRpcError::internal_error(err.to_string()))
}

fn parse_error_response() -> JsonRpcResponse {
    JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error("Parse error"))
}

fn to_line<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Run a tool call, turning a panic into an internal error
fn run_guarded<F>(kind: ToolKind, run: F) -> Result<String, ToolCallError>
where
    F: FnOnce() -> Result<String, ToolCallError>,
{
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(result) => result,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!(tool = kind.name(), "Tool execution failed: {}", message);
            Err(ToolCallError::Internal(message))
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool execution panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::builtin(McpSettings::default()).unwrap()
    }

    fn lenient() -> McpServer {
        McpServer::builtin(McpSettings {
            unknown_params: UnknownParamPolicy::Warn,
            ..Default::default()
        })
        .unwrap()
    }

    fn call(server: &McpServer, id: i64, name: &str, arguments: Value) -> JsonRpcResponse {
        server
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": {"name": name, "arguments": arguments}
            }))
            .unwrap()
    }

    fn text_of(response: &JsonRpcResponse) -> String {
        response.result.as_ref().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_initialize() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
        assert_eq!(result["capabilities"], json!({"tools": {}}));
        assert_eq!(result["serverInfo"]["name"], DEFAULT_SERVER_NAME);
        assert_eq!(response.id, json!(1));
    }

    #[test]
    fn test_ping_returns_empty_object() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": "p", "method": "ping"}))
            .unwrap();
        assert_eq!(response.result, Some(json!({})));
        assert_eq!(response.id, json!("p"));
    }

    #[test]
    fn test_tools_list() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
            .unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "get_context");
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

        let schema_of = |name: &str| {
            tools
                .iter()
                .find(|t| t["name"] == name)
                .unwrap()["inputSchema"]
                .clone()
        };
        for optional_only in ["get_class", "get_rules", "get_pattern", "get_doc"] {
            assert!(schema_of(optional_only).get("required").is_none(), "{optional_only}");
        }
        assert_eq!(schema_of("validate_code")["required"], json!(["code", "file_type"]));
        assert_eq!(schema_of("search_docs")["required"], json!(["query"]));
    }

    #[test]
    fn test_notifications_never_get_responses() {
        let server = server();
        for method in ["initialize", "ping", "tools/list", "tools/call", "bogus"] {
            assert!(server
                .handle_message(json!({"jsonrpc": "2.0", "method": method}))
                .is_none());
            assert!(server
                .handle_message(json!({"jsonrpc": "2.0", "id": null, "method": method}))
                .is_none());
        }
    }

    #[test]
    fn test_unknown_method() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}))
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert!(error.message.contains("resources/list"));
    }

    #[test]
    fn test_tools_call_requires_name() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {}}))
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);

        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call"}))
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_tool_is_invalid_params() {
        let server = server();
        for arguments in [json!({}), json!({"name": "Malgn"}), json!(null)] {
            let response = call(&server, 5, "drop_tables", arguments);
            let error = response.error.unwrap();
            assert_eq!(error.code, INVALID_PARAMS);
            assert!(error.message.contains("drop_tables"));
        }
    }

    #[test]
    fn test_unknown_parameters_are_rejected() {
        let response = call(&server(), 6, "get_class", json!({"name": "Malgn", "bogus": 1}));
        let error = response.error.unwrap();

        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("bogus"));
        assert!(error.message.contains("name, category, method_filter"));
        assert_eq!(error.data.unwrap()["unknown"], json!(["bogus"]));
    }

    #[test]
    fn test_every_unknown_key_is_named() {
        let response = call(
            &server(),
            6,
            "search_docs",
            json!({"query": "db", "page": 1, "sort": "asc"}),
        );
        let error = response.error.unwrap();
        assert!(error.message.contains("page"));
        assert!(error.message.contains("sort"));
    }

    #[test]
    fn test_successful_call_renders_text() {
        let response = call(&server(), 7, "get_class", json!({"name": "Malgn"}));
        assert!(response.error.is_none());
        let result = response.result.as_ref().unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert!(result.get("isError").is_none());
        assert!(text_of(&response).starts_with("# Malgn"));
    }

    #[test]
    fn test_not_found_is_a_successful_response() {
        let response = call(&server(), 8, "get_doc", json!({"slug": "nope"}));
        assert!(response.error.is_none());
        assert_eq!(text_of(&response), "[ERROR] Document 'nope' not found.");
    }

    #[test]
    fn test_validate_code_call() {
        let response = call(
            &server(),
            10,
            "validate_code",
            json!({"code": "request.getParameter(\"id\")", "file_type": "jsp", "strict": false}),
        );
        let text = text_of(&response);
        assert!(text.contains("ERROR"));
        assert!(text.contains("RAW_PARAMETER"));
    }

    #[test]
    fn test_bad_argument_types_are_invalid_params() {
        let response = call(&server(), 11, "validate_code", json!({"code": 42, "file_type": "jsp"}));
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[test]
    fn test_warn_policy_maps_aliases_and_warns() {
        let response = call(
            &lenient(),
            12,
            "get_class",
            json!({"name": "Malgn", "methodFilter": "rs", "bogus": 1}),
        );
        assert!(response.error.is_none());

        let text = text_of(&response);
        assert!(text.contains("[WARNING] Ignored unknown parameter(s): bogus"));
        assert!(text.contains("### String rs(String name)"));
        assert!(!text.contains("isPost"));
    }

    #[test]
    fn test_warn_policy_without_noise_adds_no_warning() {
        let response = call(&lenient(), 13, "get_pattern", json!({"type": "jsp-list"}));
        assert!(!text_of(&response).contains("[WARNING]"));
    }

    #[test]
    fn test_batch_omits_notifications() {
        let reply = server()
            .handle_payload(json!([
                {"jsonrpc": "2.0", "method": "notifications/initialized"},
                {"jsonrpc": "2.0", "id": 1, "method": "ping"}
            ]))
            .unwrap();

        let Reply::Batch(responses) = reply else {
            panic!("expected batch reply");
        };
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, json!(1));
    }

    #[test]
    fn test_batch_of_notifications_has_nothing_to_say() {
        let server = server();
        assert!(server
            .handle_payload(json!([{"jsonrpc": "2.0", "method": "notifications/initialized"}]))
            .is_none());
        assert!(server.handle_payload(json!([])).is_none());
        assert!(server
            .handle_payload(json!({"jsonrpc": "2.0", "method": "ping"}))
            .is_none());
    }

    #[test]
    fn test_batch_failures_are_isolated() {
        let reply = server()
            .handle_payload(json!([
                {"jsonrpc": "2.0", "id": 1, "method": "nope"},
                {"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "get_doc", "arguments": {"x": 1}}},
                {"jsonrpc": "2.0", "id": 3, "method": "ping"}
            ]))
            .unwrap();

        let Reply::Batch(responses) = reply else {
            panic!("expected batch reply");
        };
        let ids: Vec<_> = responses.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
        assert!(responses[0].error.is_some());
        assert!(responses[1].error.is_some());
        assert!(responses[2].error.is_none());
    }

    /// Answers every call except search_docs, which panics
    #[derive(Debug)]
    struct BrokenSearch;

    impl ToolRunner for BrokenSearch {
        fn run(&self, kind: ToolKind, _arguments: Map<String, Value>) -> Result<String, ToolCallError> {
            if kind == ToolKind::SearchDocs {
                panic!("doc index is corrupted");
            }
            Ok(format!("{} ok", kind.name()))
        }
    }

    #[test]
    fn test_panicking_tool_is_internal_error_and_siblings_survive() {
        let server = McpServer {
            runner: Arc::new(BrokenSearch),
            ..server()
        };

        let reply = server
            .handle_payload(json!([
                {"jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": {"name": "get_class", "arguments": {}}},
                {"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "search_docs", "arguments": {"query": "dao"}}},
                {"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "get_doc", "arguments": {}}}
            ]))
            .unwrap();

        let Reply::Batch(responses) = reply else {
            panic!("expected batch reply");
        };
        assert_eq!(responses.len(), 3);

        assert_eq!(text_of(&responses[0]), "get_class ok");
        assert_eq!(text_of(&responses[2]), "get_doc ok");

        let error = responses[1].error.as_ref().unwrap();
        assert_eq!(responses[1].id, json!(2));
        assert_eq!(error.code, INTERNAL_ERROR);
        assert_eq!(error.message, "doc index is corrupted");
        assert!(responses[1].result.is_none());
    }

    #[test]
    fn test_run_guarded_passes_errors_through() {
        let err = run_guarded(ToolKind::GetDoc, || Err(ToolCallError::MissingName)).unwrap_err();
        assert!(matches!(err, ToolCallError::MissingName));

        let err = run_guarded(ToolKind::GetDoc, || panic!("{}", String::from("owned"))).unwrap_err();
        assert!(matches!(err, ToolCallError::Internal(ref message) if message == "owned"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let panic = catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(panic.as_ref()), "boom");
        assert_eq!(ToolCallError::Internal("boom".into()).code(), INTERNAL_ERROR);
    }

    #[test]
    fn test_handle_line_parse_error() {
        let line = server().handle_line("{not json").unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["error"]["code"], PARSE_ERROR);
        assert_eq!(value["id"], Value::Null);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("warn".parse::<UnknownParamPolicy>().unwrap(), UnknownParamPolicy::Warn);
        assert_eq!(" REJECT ".parse::<UnknownParamPolicy>().unwrap(), UnknownParamPolicy::Reject);
        assert!("ignore".parse::<UnknownParamPolicy>().is_err());
    }

    #[tokio::test]
    async fn test_serve_line_delimited() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "\n",
            "garbage\n",
            r#"[{"jsonrpc":"2.0","id":2,"method":"tools/list"}]"#,
            "\n"
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], PARSE_ERROR);
        assert!(lines[2].is_array());
        assert_eq!(lines[2][0]["id"], 2);
    }
}
