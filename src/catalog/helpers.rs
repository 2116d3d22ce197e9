//! Catalog Parsing Helpers
//!
//! Small pure functions shared by both catalog encodings.

use serde_json::Value;

/// Cart and catalog key for a pizza name: trimmed and lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parses a price, accepting a decimal comma (`8,50`).
///
/// Returns `None` for anything that is not a finite, non-negative number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let price: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Coerces a JSON value into a list of strings.
///
/// * missing / `null` → empty list
/// * string → comma-separated list
/// * array → each scalar element stringified
/// * any other scalar → single-element list
pub fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => split_list(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
    }
}

/// Coerces a JSON price (number or numeric string) into a number.
pub fn coerce_price(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|p| p.is_finite() && *p >= 0.0),
        Value::String(s) => parse_price(s),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
