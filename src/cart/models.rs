//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the cart: the stored
//! line, the read-only snapshot projection and the outcomes of mutations.

use serde::Serialize;

use super::helpers::round2;

/// The single flat currency used for every price.
pub const CURRENCY: &str = "EUR";

// =============================================================================
// Cart Line
// =============================================================================

/// One pizza's accumulated quantity in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Normalized name used as the cart key
    pub key: String,

    /// Catalog display name
    pub name: String,

    /// Catalog price frozen at the first add
    pub unit_price: f64,

    /// Always greater than zero
    pub quantity: u32,
}

impl CartLine {
    /// Unrounded line value
    pub fn value(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// A line as presented to callers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLine {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    /// `unit_price * quantity`, rounded to cents on its own
    pub line_total: f64,
}

impl From<&CartLine> for SnapshotLine {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: round2(line.value()),
        }
    }
}

/// Freshly computed, read-only view of the cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Lines in order of first add
    pub items: Vec<SnapshotLine>,

    /// Rounded sum of the unrounded line values
    pub subtotal: f64,

    pub currency: &'static str,

    /// Total number of pizzas across all lines
    pub item_count: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Mutation Outcomes
// =============================================================================

/// The delta applied by an add.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    pub name: String,
    pub added: u32,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Resulting state of a line after a remove.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RemoveOutcome {
    /// The line is still in the cart with a lower quantity
    Updated { name: String, quantity: u32 },
    /// The line was deleted
    Removed { name: String },
}

impl RemoveOutcome {
    pub fn name(&self) -> &str {
        match self {
            RemoveOutcome::Updated { name, .. } | RemoveOutcome::Removed { name } => name,
        }
    }
}
