//! Cart View Module
//!
//! The read-only HTTP surface: an auto-refreshing HTML page, the JSON
//! snapshot and a liveness check.

pub mod handlers;
pub mod render;

pub use handlers::{not_found, routes};
