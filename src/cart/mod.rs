//! Shopping Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartLine, snapshots, mutation outcomes)
//! - Business logic helpers (rounding, quantities, formatting)
//! - The CartStore that owns the single cart, and the shared AppState

pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use models::{AddOutcome, CartSnapshot, RemoveOutcome, SnapshotLine, CURRENCY};
pub use state::{AppState, CartStore, SharedState};
