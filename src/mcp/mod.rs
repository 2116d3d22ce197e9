//! Model Context Protocol (MCP) Module
//!
//! This module contains the tool surface, including:
//! - Protocol models (JsonRpcRequest, tool inputs and results, constants)
//! - RPC helpers (success/error envelopes, argument validation)
//! - The tool registry and the pizza cart tools
//! - MCP handlers (initialize, tools/*, resources/*)
//! - The stdio transport

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod registry;
pub mod tools;
pub mod transport;

// Re-export commonly used types and functions
pub use handlers::McpHandler;
pub use registry::ToolRegistry;
pub use transport::{serve, serve_stdio};
