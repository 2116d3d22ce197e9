//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart arithmetic and formatting.

use super::models::CartSnapshot;

/// Rounds a money value to cents. Only applied at presentation time.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a money value with two decimals, e.g. `8.50`.
pub fn format_money(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Clamps a requested quantity: missing or non-positive means 1.
pub fn effective_quantity(requested: Option<i64>) -> u32 {
    match requested {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Produces a human-readable one-line summary of the cart.
///
/// Example output: `"2x Margherita, 1x Marinara (subtotal 23.00 EUR)"`.
pub fn format_item_summary(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return String::from("The cart is empty.");
    }

    let items = snapshot
        .items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} (subtotal {} {})",
        items,
        format_money(snapshot.subtotal),
        snapshot.currency
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_default_to_one() {
        assert_eq!(effective_quantity(None), 1);
        assert_eq!(effective_quantity(Some(0)), 1);
        assert_eq!(effective_quantity(Some(-4)), 1);
        assert_eq!(effective_quantity(Some(3)), 3);
        assert_eq!(effective_quantity(Some(i64::MAX)), u32::MAX);
    }

    #[test]
    fn money_is_rounded_for_display() {
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(8.5), "8.50");
    }
}
