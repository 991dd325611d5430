//! MCP JSON-RPC 2.0 server implementation for stdio communication.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use modlens_rs::ModlensEngine;

use crate::mcp::protocol::{
    create_analyze_code_schema, error_codes, JsonRpcRequest, JsonRpcResponse, McpInitResult,
    McpServerInfo, McpTool, ToolCallParams,
};
use crate::mcp::tools::{execute_analyze_code, AnalyzeCodeParams};

const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server that handles JSON-RPC 2.0 communication over stdin/stdout
pub struct McpServer {
    /// Server name and version information
    server_info: McpServerInfo,
    engine: ModlensEngine,
}

impl McpServer {
    /// Create a new MCP server instance
    pub fn new(version: &str, engine: ModlensEngine) -> Self {
        Self {
            server_info: McpServerInfo {
                name: "modlens".to_string(),
                version: version.to_string(),
            },
            engine,
        }
    }

    /// Run the MCP server over process stdin/stdout
    pub async fn run(&self) -> anyhow::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Process one JSON-RPC message per line until the reader reaches EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP JSON-RPC 2.0 server");
        let mut line = String::new();

        loop {
            line.clear();

            let response = match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("EOF reached, shutting down MCP server");
                    break;
                }
                Ok(_) if line.trim().is_empty() => continue,
                Ok(_) => self.handle_request(&line).await,
                Err(e) => {
                    error!("Error reading from stdin: {}", e);
                    JsonRpcResponse::error(
                        None,
                        error_codes::INTERNAL_ERROR,
                        format!("Failed to read request: {}", e),
                    )
                }
            };

            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("MCP server shutdown complete");
        Ok(())
    }

    /// Handle a single JSON-RPC request
    async fn handle_request(&self, request_line: &str) -> JsonRpcResponse {
        let request: JsonRpcRequest = match serde_json::from_str(request_line.trim()) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                );
            }
        };

        debug!("Handling method: {}", request.method);

        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "Only JSON-RPC 2.0 is supported".to_string(),
            );
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tool_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn tools() -> Vec<McpTool> {
        vec![McpTool {
            name: "analyze_code".to_string(),
            description: "Analyze one Python file for modularity issues and refactor plans"
                .to_string(),
            input_schema: create_analyze_code_schema(),
        }]
    }

    /// Handle MCP initialization
    fn handle_initialize(&self, id: Option<serde_json::Value>) -> JsonRpcResponse {
        let result = McpInitResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: serde_json::json!({ "tools": {} }),
            server_info: self.server_info.clone(),
        };

        to_response(id, &result)
    }

    /// Handle tools list request
    fn handle_tools_list(&self, id: Option<serde_json::Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, serde_json::json!({ "tools": Self::tools() }))
    }

    /// Handle tool call request
    async fn handle_tool_call(
        &self,
        id: Option<serde_json::Value>,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing parameters".to_string(),
            );
        };

        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tool call parameters: {}", e),
                );
            }
        };

        let result = match tool_params.name.as_str() {
            "analyze_code" => {
                let params: AnalyzeCodeParams =
                    match serde_json::from_value(tool_params.arguments) {
                        Ok(p) => p,
                        Err(e) => {
                            return JsonRpcResponse::error(
                                id,
                                error_codes::INVALID_PARAMS,
                                format!("Invalid analyze_code parameters: {}", e),
                            );
                        }
                    };

                match execute_analyze_code(&self.engine, params).await {
                    Ok(result) => result,
                    Err((code, message)) => return JsonRpcResponse::error(id, code, message),
                }
            }
            _ => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::TOOL_NOT_FOUND,
                    format!("Unknown tool: {}", tool_params.name),
                );
            }
        };

        to_response(id, &result)
    }
}

fn to_response<T: serde::Serialize>(id: Option<serde_json::Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
        ),
    }
}
