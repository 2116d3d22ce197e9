//! Error types for the pizza cart
//!
//! Catalog errors are fatal at startup. Cart and tool errors are per-call and
//! are reported back to the caller without stopping the process.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or parsing the pizza catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog {origin}{}: {message}", location(.line))]
    Format {
        /// Path or label of the source being parsed
        origin: String,
        /// 1-based line number (lines format) or record number (JSON)
        line: Option<usize>,
        message: String,
    },
}

fn location(line: &Option<usize>) -> String {
    line.map(|n| format!(" (line {})", n)).unwrap_or_default()
}

impl CatalogError {
    pub fn format(line: Option<usize>, message: impl Into<String>) -> Self {
        CatalogError::Format {
            origin: String::from("<input>"),
            line,
            message: message.into(),
        }
    }

    /// Attaches the source path to a format error produced by pure parsing.
    pub fn with_origin(self, origin: impl Into<String>) -> Self {
        match self {
            CatalogError::Format { line, message, .. } => CatalogError::Format {
                origin: origin.into(),
                line,
                message,
            },
            other => other,
        }
    }
}

/// User-input errors raised by cart operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Pizza not found: \"{0}\". Use list_pizzas to see the menu.")]
    PizzaNotFound(String),

    #[error("\"{0}\" is not in the cart.")]
    LineNotFound(String),
}

/// Errors raised by the tool surface that map to JSON-RPC error responses.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}

impl ToolError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i64 {
        -32602
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidArguments(err.to_string())
    }
}

/// Top-level failures that stop the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("cannot bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
