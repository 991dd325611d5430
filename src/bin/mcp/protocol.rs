//! MCP protocol types and message handling for JSON-RPC 2.0 communication.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<serde_json::Value>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 error structure
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// MCP tool definition for tool discovery
#[derive(Debug, Serialize)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// MCP initialization result
#[derive(Debug, Serialize)]
pub struct McpInitResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: serde_json::Value,
    #[serde(rename = "serverInfo")]
    pub server_info: McpServerInfo,
}

/// MCP server information
#[derive(Debug, Clone, Serialize)]
pub struct McpServerInfo {
    pub name: String,
    pub version: String,
}

/// Tool execution request parameters
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Tool execution result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
}

/// Content item in tool result
#[derive(Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    /// Single text content item
    pub fn text(text: String) -> Self {
        Self {
            content: vec![ContentItem {
                content_type: "text".to_string(),
                text,
            }],
        }
    }
}

/// Factory methods for [`JsonRpcResponse`].
impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(id: Option<serde_json::Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

/// MCP error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // MCP-specific error codes
    pub const TOOL_NOT_FOUND: i32 = -32001;
    pub const ANALYSIS_ERROR: i32 = -32003;
}

/// Create tool schema for analyze_code
pub fn create_analyze_code_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "code": {
                "type": "string",
                "description": "Python source code to analyze"
            },
            "filename": {
                "type": "string",
                "description": "Optional file name used in the report"
            }
        },
        "required": ["code"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_rpc_success_has_result_and_no_error() {
        let payload = json!({"status": "ok"});
        let response = JsonRpcResponse::success(Some(json!(1)), payload.clone());

        assert_eq!(response.jsonrpc, "2.0");
        assert_eq!(response.id, Some(json!(1)));
        assert!(response.error.is_none());
        assert_eq!(response.result, Some(payload));
    }

    #[test]
    fn json_rpc_error_sets_error_payload() {
        let response =
            JsonRpcResponse::error(None, error_codes::METHOD_NOT_FOUND, "missing method".into());

        assert!(response.result.is_none());
        let error = response.error.as_ref().expect("error payload");
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(error.message, "missing method");

        let serialized = serde_json::to_value(&response).unwrap();
        assert!(serialized.get("result").is_none());
        assert_eq!(serialized["error"]["code"], -32601);
    }

    #[test]
    fn analyze_code_schema_requires_code() {
        let schema = create_analyze_code_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["code"]["type"], "string");
        assert_eq!(schema["properties"]["filename"]["type"], "string");
        assert_eq!(schema["required"], json!(["code"]));
    }

    #[test]
    fn tool_definition_uses_camel_case_schema_key() {
        let tool = McpTool {
            name: "analyze_code".into(),
            description: "Analyze".into(),
            input_schema: create_analyze_code_schema(),
        };
        let value = serde_json::to_value(&tool).unwrap();
        assert!(value.get("inputSchema").is_some());
    }
}
