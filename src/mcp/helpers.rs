//! MCP Protocol Helpers
//!
//! JSON-RPC envelope construction and argument validation shared by the
//! handlers and the tools.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ToolError;

/// Builds a JSON-RPC 2.0 success response echoing the request `id`.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

/// Deserializes tool arguments into their typed input record.
///
/// Missing arguments (`null`) are read as an empty object so tools without
/// required fields can be called bare.
pub fn parse_arguments<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => json!({}),
        other => other,
    };
    Ok(serde_json::from_value(args)?)
}

/// Rejects blank pizza names before they reach the cart.
pub fn require_name(name: &str) -> Result<&str, ToolError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ToolError::InvalidArguments(String::from(
            "\"name\" must not be empty",
        )));
    }
    Ok(trimmed)
}
