// MCP server: line-delimited JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::codec::{RequestLine, RequestLineCodec};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, info: ServerInfo) -> Self {
        Self { registry, info }
    }

    /// Serve over the process's stdin/stdout until the client hangs up
    pub async fn start(&self) -> Result<()> {
        tracing::info!(
            "MCP server '{}' listening on stdio with {} tools",
            self.info.name,
            self.registry.len()
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await?;
        tracing::info!("Client disconnected, shutting down");
        Ok(())
    }

    /// Read one request per line and write one response per line.
    ///
    /// Lines that are not UTF-8 or exceed the length limit get a parse error
    /// and the loop continues. Returns when the reader reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, RequestLineCodec::default());
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = lines.next().await {
            let response = match frame.context("Failed to read request line")? {
                RequestLine::Text(line) if line.trim().is_empty() => continue,
                RequestLine::Text(line) => self.handle_line(&line).await,
                RequestLine::Malformed(reason) => {
                    tracing::warn!("Discarding malformed request line: {}", reason);
                    Some(JsonRpcResponse::error(
                        serde_json::Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                let json = serde_json::to_string(&response)?;
                sink.send(json).await.context("Failed to write response")?;
            }
        }

        Ok(())
    }

    /// Handle one raw line; `None` means nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
            }
        };

        self.handle_request(request).await
    }

    pub async fn handle_request(&self, mut request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "Received request");

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }
        let id = request.id.take().unwrap_or_default();

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    fn initialize(&self, id: serde_json::Value, params: Option<serde_json::Value>) -> JsonRpcResponse {
        match params.map(serde_json::from_value::<InitializeParams>) {
            Some(Ok(params)) => {
                let client = params
                    .client_info
                    .map(|c| format!("{} {}", c.name, c.version))
                    .unwrap_or_else(|| "unknown client".to_string());
                tracing::info!(
                    "Initializing session with {} (protocol {})",
                    client,
                    params.protocol_version
                );
            }
            Some(Err(e)) => tracing::debug!("Ignoring malformed initialize params: {}", e),
            None => {}
        }

        JsonRpcResponse::success(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                },
                server_info: self.info.clone(),
            },
        )
    }

    async fn call_tool(&self, id: serde_json::Value, params: Option<serde_json::Value>) -> JsonRpcResponse {
        let params = match params.map(serde_json::from_value::<CallToolParams>) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tools/call params"),
                )
            }
        };

        let tool = match self.registry.get(&params.name) {
            Some(tool) => tool,
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
                )
            }
        };

        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Tool {} failed: {:#}", params.name, e);
                CallToolResult::error(format!("{:#}", e))
            }
        };

        JsonRpcResponse::success(id, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ListCatalogTool, RecommendToolsTool};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use toolsense_core::ToolCatalog;

    fn test_server() -> McpServer {
        let available = Arc::new(ToolCatalog::builtin().availability());
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(RecommendToolsTool::new(available.clone())));
        registry.register(Arc::new(ListCatalogTool::new(available)));

        McpServer::new(
            registry,
            ServerInfo {
                name: "toolsense".to_string(),
                version: "0.1.0".to_string(),
            },
        )
    }

    async fn call(server: &McpServer, request: serde_json::Value) -> serde_json::Value {
        let response = server.handle_line(&request.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = test_server();
        let resp = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test", "version": "1.0"}
                }
            }),
        )
        .await;

        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(resp["result"]["serverInfo"]["name"], "toolsense");
        assert_eq!(resp["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_tools_list_in_registration_order() {
        let server = test_server();
        let resp = call(&server, json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"})).await;

        let tools = resp["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "recommend_tools");
        assert_eq!(tools[1]["name"], "list_tool_catalog");
        assert!(tools[0]["inputSchema"]["properties"]["thought"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_recommend() {
        let server = test_server();
        let resp = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "recommend_tools", "arguments": {"thought": "make multiple edits"}}
            }),
        )
        .await;

        assert!(resp["result"].get("isError").is_none());
        let text = resp["result"]["content"][0]["text"].as_str().unwrap();
        let output: serde_json::Value = serde_json::from_str(text).unwrap();
        let recs = output["recommendations"].as_array().unwrap();
        assert_eq!(recs[0]["tool_name"], "Edit");
        assert_eq!(recs[1]["tool_name"], "MultiEdit");
        assert_eq!(recs[1]["priority"], 1);
    }

    #[tokio::test]
    async fn test_tool_failure_is_error_result() {
        let server = test_server();
        let resp = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "recommend_tools", "arguments": {}}
            }),
        )
        .await;

        assert_eq!(resp["result"]["isError"], true);
        let text = resp["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: Invalid arguments for recommend_tools"));
    }

    #[tokio::test]
    async fn test_unknown_tool_and_method() {
        let server = test_server();

        let resp = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "Read"}}),
        )
        .await;
        assert_eq!(resp["error"]["code"], JsonRpcError::INVALID_PARAMS);

        let resp = call(&server, json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"})).await;
        assert_eq!(resp["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_and_shape_errors() {
        let server = test_server();

        let resp = serde_json::to_value(server.handle_line("{not json").await.unwrap()).unwrap();
        assert_eq!(resp["error"]["code"], JsonRpcError::PARSE_ERROR);
        assert!(resp["id"].is_null());

        let resp = call(&server, json!({"jsonrpc": "2.0", "id": 6})).await;
        assert_eq!(resp["error"]["code"], JsonRpcError::INVALID_REQUEST);
        assert_eq!(resp["id"], 6);

        let resp = call(&server, json!({"jsonrpc": "1.0", "id": 7, "method": "ping"})).await;
        assert_eq!(resp["error"]["code"], JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = test_server();
        let line = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        assert!(server.handle_line(&line).await.is_none());
    }

    #[tokio::test]
    async fn test_null_id_is_a_request() {
        let server = test_server();
        let resp = call(&server, json!({"jsonrpc": "2.0", "id": null, "method": "ping"})).await;

        assert!(resp["id"].is_null());
        assert_eq!(resp["result"], json!({}));
    }

    #[tokio::test]
    async fn test_serve_survives_invalid_utf8_line() {
        let server = test_server();
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let (client_read, mut client_write) = tokio::io::split(client);

        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n");

        let writer = async move {
            client_write.write_all(&input).await.unwrap();
            client_write.shutdown().await.unwrap();
        };
        let (served, _) = tokio::join!(server.serve(server_read, server_write), writer);
        served.unwrap();

        let mut lines = BufReader::new(client_read).lines();
        let first: serde_json::Value =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();

        assert_eq!(first["error"]["code"], JsonRpcError::PARSE_ERROR);
        assert!(first["id"].is_null());
        assert_eq!(second["id"], 1);
        assert_eq!(second["result"], json!({}));
    }

    #[tokio::test]
    async fn test_serve_over_stream() {
        let server = test_server();
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let (client_read, mut client_write) = tokio::io::split(client);

        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string(),
            String::new(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}).to_string(),
        ]
        .join("\n")
            + "\n";

        let writer = async move {
            client_write.write_all(input.as_bytes()).await.unwrap();
            client_write.shutdown().await.unwrap();
        };
        let (served, _) = tokio::join!(server.serve(server_read, server_write), writer);
        served.unwrap();

        let mut lines = BufReader::new(client_read).lines();
        let first: serde_json::Value =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();

        assert_eq!(first["id"], 1);
        assert_eq!(first["result"], json!({}));
        assert_eq!(second["id"], 2);
        assert_eq!(second["result"]["tools"].as_array().unwrap().len(), 2);
    }
}
