//! Pizza Cart Library
//!
//! An in-memory pizza ordering assistant. The same cart is driven by an AI
//! agent through MCP tools and watched by a human through a read-only web
//! page.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod mcp;

// Surfaces and infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod web;
