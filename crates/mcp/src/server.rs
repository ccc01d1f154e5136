// MCP dispatch server: JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "brewfather-mcp";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve requests from stdin until EOF. One JSON-RPC message per line;
    /// responses go to stdout. Stdout is reserved for protocol traffic, so
    /// all diagnostics use tracing (stderr).
    pub async fn start(&self) -> Result<()> {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        info!("MCP server listening on stdio");

        loop {
            line.clear();
            if stdin.read_line(&mut line).await? == 0 {
                info!("stdin closed, shutting down");
                break;
            }
            let raw = line.trim();
            if raw.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(raw) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!(error = %e, "failed to parse request");
                    Some(JsonRpcResponse::error(
                        serde_json::Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                let payload = serde_json::to_string(&response)?;
                stdout.write_all(payload.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }

    /// Dispatch a single request. Notifications (no id) are acknowledged
    /// silently and get no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification received");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            method => {
                warn!(method = %method, "unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };
        Some(response)
    }

    fn handle_initialize(
        &self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        if let Some(client) = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .and_then(|p| p.client_info)
        {
            info!(client = %client.name, version = %client.version, "client connected");
        }

        JsonRpcResponse::success(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: ToolsCapability {
                        list_changed: false,
                    },
                },
                server_info: ServerInfo {
                    name: SERVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
        )
    }

    async fn handle_call_tool(
        &self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let params = match params.map(serde_json::from_value::<CallToolParams>) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid params for tools/call: {}", e)),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing params for tools/call"),
                )
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            warn!(tool = %params.name, "unknown tool requested");
            return JsonRpcResponse::error(id, JsonRpcError::unknown_tool(&params.name));
        };

        debug!(tool = %params.name, "invoking tool");
        match tool.execute(params.arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                error!(tool = %params.name, error = %e, "tool execution failed");
                JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{
        CalculateAbvTool, GetBatchDetailsTool, GetBatchesTool, GetInventoryFermentablesTool,
    };
    use brewfather_core::{BrewfatherClient, Credentials};
    use std::sync::Arc;

    fn test_server() -> McpServer {
        let credentials = Credentials::new("user", "key");
        let client = Arc::new(BrewfatherClient::new(&credentials).unwrap());

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CalculateAbvTool));
        registry.register(Arc::new(GetBatchesTool::new(client.clone())));
        registry.register(Arc::new(GetBatchDetailsTool::new(client.clone())));
        registry.register(Arc::new(GetInventoryFermentablesTool::new(client)));
        McpServer::new(registry)
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let server = test_server();
        let request = JsonRpcRequest::new(
            1,
            "initialize",
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-host", "version": "0.0.0"}
            }),
        );

        let response = server.handle_request(request).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn tools_list_returns_the_four_tools_in_order() {
        let server = test_server();

        // Repeated calls must be idempotent and side-effect free.
        for id in 1..=3 {
            let request = JsonRpcRequest::new(id, "tools/list", serde_json::json!({}));
            let response = server.handle_request(request).await.unwrap();

            let tools = response.result.unwrap()["tools"].clone();
            let names: Vec<&str> = tools
                .as_array()
                .unwrap()
                .iter()
                .map(|t| t["name"].as_str().unwrap())
                .collect();
            assert_eq!(
                names,
                vec![
                    "calculate_abv",
                    "get_batches",
                    "get_batch_details",
                    "get_inventory_fermentables"
                ]
            );
        }
    }

    #[tokio::test]
    async fn call_tool_runs_the_named_tool() {
        let server = test_server();
        let request = JsonRpcRequest::new(
            7,
            "tools/call",
            serde_json::json!({
                "name": "calculate_abv",
                "arguments": {"og": "1.050", "fg": "1.010"}
            }),
        );

        let response = server.handle_request(request).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "The ABV is 5.25%");
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn unknown_tool_is_a_protocol_error() {
        let server = test_server();
        let request = JsonRpcRequest::new(
            8,
            "tools/call",
            serde_json::json!({"name": "brew_coffee", "arguments": {}}),
        );

        let response = server.handle_request(request).await.unwrap();
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Unknown tool: brew_coffee");
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let server = test_server();
        let request = JsonRpcRequest::new(9, "resources/list", serde_json::json!({}));

        let response = server.handle_request(request).await.unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = test_server();
        let request =
            JsonRpcRequest::notification("notifications/initialized", serde_json::json!({}));

        assert!(server.handle_request(request).await.is_none());
    }

    #[tokio::test]
    async fn ping_answers_with_empty_result() {
        let server = test_server();
        let request = JsonRpcRequest::new(10, "ping", serde_json::json!({}));

        let response = server.handle_request(request).await.unwrap();
        assert_eq!(response.result.unwrap(), serde_json::json!({}));
    }
}
