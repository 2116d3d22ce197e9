//! Tool Registry
//!
//! Named tools with a declared input schema and a handler. The registry is the
//! seam between the JSON-RPC dispatcher and the cart: handlers only see the
//! shared state and the raw arguments of their own call.

use serde_json::{json, Value};

use super::models::ToolCallResult;
use crate::cart::AppState;
use crate::error::ToolError;

/// Handler invoked for `tools/call`
pub type ToolHandler =
    Box<dyn Fn(&AppState, Value) -> Result<ToolCallResult, ToolError> + Send + Sync>;

struct RegisteredTool {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    input_schema: Value,
    handler: ToolHandler,
}

/// Tools in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. A later registration with the same name replaces the
    /// earlier one.
    pub fn register<F>(
        &mut self,
        name: &'static str,
        title: &'static str,
        description: &'static str,
        input_schema: Value,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&AppState, Value) -> Result<ToolCallResult, ToolError> + Send + Sync + 'static,
    {
        self.tools.retain(|t| t.name != name);
        self.tools.push(RegisteredTool {
            name,
            title,
            description,
            input_schema,
            handler: Box::new(handler),
        });
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Tool definitions for `tools/list`
    pub fn definitions(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    /// Runs the named tool against `state`.
    pub fn call(&self, state: &AppState, name: &str, args: Value) -> Result<ToolCallResult, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        (tool.handler)(state, args)
    }
}
