//! MCP request handlers
//!
//! Dispatches JSON-RPC requests (initialize, tools, resources) against the
//! shared state. Responses are plain `serde_json::Value` envelopes; the
//! transport decides how they are framed.

use serde_json::{json, Value};

use super::{helpers::*, models::*, registry::ToolRegistry, tools::default_registry};
use crate::cart::state::SharedState;
use crate::error::ToolError;

/// Handles decoded MCP frames for one shared cart.
pub struct McpHandler {
    state: SharedState,
    registry: ToolRegistry,
}

impl McpHandler {
    /// Handler with the default pizza cart tools
    pub fn new(state: SharedState) -> Self {
        Self::with_registry(state, default_registry())
    }

    pub fn with_registry(state: SharedState, registry: ToolRegistry) -> Self {
        Self { state, registry }
    }

    /// Handles one raw frame. Returns the response to write, or `None` for
    /// notifications.
    ///
    /// Text that is not JSON is a parse error (-32700). JSON that is not a
    /// request envelope is an invalid request (-32600), answered with the
    /// frame's `id` when it has one.
    pub fn handle_frame(&self, frame: &str) -> Option<Value> {
        let value = match serde_json::from_str::<Value>(frame) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("JSON-RPC parse error: {}", e);
                return Some(rpc_error(Value::Null, codes::PARSE_ERROR, "Parse error"));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                tracing::warn!("invalid JSON-RPC request: {}", e);
                Some(rpc_error(id, codes::INVALID_REQUEST, "Invalid Request"))
            }
        }
    }

    /// Dispatches a request. Requests without an `id` are notifications and
    /// never produce a response.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        tracing::debug!(method, id = ?request.id, "MCP call");

        let Some(id) = request.id else {
            self.handle_notification(method, request.params);
            return None;
        };

        let response = match method {
            methods::INITIALIZE => rpc_success(id, handle_initialize()),
            methods::PING => rpc_success(id, json!({})),
            methods::LIST_TOOLS => rpc_success(id, self.registry.definitions()),
            methods::LIST_RESOURCES => rpc_success(id, handle_resources_list()),
            methods::READ_RESOURCE => match self.handle_resources_read(request.params) {
                Ok(result) => rpc_success(id, result),
                Err(e) => rpc_error(id, e.code(), e.to_string()),
            },
            methods::CALL_TOOL => match self.handle_tool_call(request.params) {
                Ok(result) => rpc_success(id, result),
                Err(e) => {
                    tracing::info!("tool call rejected: {}", e);
                    rpc_error(id, e.code(), e.to_string())
                }
            },
            _ => {
                tracing::warn!("Unknown method: {}", method);
                rpc_error(id, codes::METHOD_NOT_FOUND, "Method not found")
            }
        };

        Some(response)
    }

    fn handle_notification(&self, method: &str, params: Value) {
        if method == methods::CALL_TOOL {
            // Executed for its effect; the result has nowhere to go.
            if let Err(e) = self.handle_tool_call(params) {
                tracing::info!("tool notification rejected: {}", e);
            }
        } else {
            tracing::debug!(method, "notification");
        }
    }

    /// Handles `tools/call`.
    pub fn handle_tool_call(&self, params: Value) -> Result<Value, ToolError> {
        let call: CallToolParams = serde_json::from_value(params)?;
        let result = self.registry.call(&self.state, &call.name, call.arguments)?;

        if result.is_error() {
            tracing::info!(tool = %call.name, "tool reported error: {}", result.text());
        }

        Ok(serde_json::to_value(result)?)
    }

    /// Handles `resources/read`.
    fn handle_resources_read(&self, params: Value) -> Result<Value, ToolError> {
        let params: ReadResourceParams = serde_json::from_value(params)?;

        let body = match params.uri.as_str() {
            CART_RESOURCE_URI => serde_json::to_string_pretty(&self.state.cart.snapshot())?,
            CATALOG_RESOURCE_URI => serde_json::to_string_pretty(self.state.catalog.pizzas())?,
            other => return Err(ToolError::UnknownResource(other.to_string())),
        };

        Ok(json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": JSON_MIME_TYPE,
                "text": body,
            }]
        }))
    }
}

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false, "subscribe": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Handles `resources/list` request.
fn handle_resources_list() -> Value {
    json!({
        "resources": [
            {
                "name": "Current cart",
                "uri": CART_RESOURCE_URI,
                "mimeType": JSON_MIME_TYPE
            },
            {
                "name": "Pizza menu",
                "uri": CATALOG_RESOURCE_URI,
                "mimeType": JSON_MIME_TYPE
            }
        ]
    })
}
