//! MCP Protocol Models and Constants
//!
//! This module contains the JSON-RPC envelope, the typed input record of each
//! tool and the tool result shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Tool: filter the menu
pub const LIST_PIZZAS_TOOL: &str = "list_pizzas";
/// Tool: add a pizza to the cart
pub const ADD_TO_CART_TOOL: &str = "add_to_cart";
/// Tool: remove a pizza from the cart
pub const REMOVE_FROM_CART_TOOL: &str = "remove_from_cart";
/// Tool: show the cart
pub const GET_CART_TOOL: &str = "get_cart";

/// Resource exposing the live cart snapshot
pub const CART_RESOURCE_URI: &str = "cart://current";
/// Resource exposing the full catalog
pub const CATALOG_RESOURCE_URI: &str = "catalog://pizzas";
/// MIME type of both resources
pub const JSON_MIME_TYPE: &str = "application/json";

/// Server identifier
pub const SERVER_NAME: &str = "pizza-cart-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Standard MCP methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const PING: &str = "ping";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
    pub const LIST_RESOURCES: &str = "resources/list";
    pub const READ_RESOURCE: &str = "resources/read";
}

/// JSON-RPC error codes
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
}

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    #[serde(default)]
    pub params: Value,

    /// Request identifier; absent for notifications. An explicit `null` is
    /// kept as `Some(Value::Null)` and still gets a response.
    #[serde(default, deserialize_with = "present_value")]
    pub id: Option<Value>,
}

/// Wraps any value that is present in the frame, `null` included.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parameters of `tools/call`
#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,

    #[serde(default)]
    pub arguments: Value,
}

/// Parameters of `resources/read`
#[derive(Debug, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

// =============================================================================
// Tool Inputs
// =============================================================================

/// Input for the add_to_cart and remove_from_cart tools
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartLineInput {
    /// Pizza name, matched case-insensitively
    pub name: String,

    /// Number of pizzas; missing or non-positive means 1
    pub quantity: Option<i64>,
}

/// Input for the get_cart tool
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetCartInput {}

// =============================================================================
// Tool Results
// =============================================================================

/// One piece of tool output
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Result of `tools/call`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolCallResult {
    /// A successful result with text and structured content
    pub fn success(text: impl Into<String>, structured: Value) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            structured_content: Some(structured),
            is_error: None,
        }
    }

    /// A recoverable failure the agent can correct and retry
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            structured_content: None,
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Concatenated text content
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
