//! Catalog Loading
//!
//! Reads the catalog source once and parses it into a [`Catalog`]. Parsing is
//! pure and lives in [`parse_catalog`]; [`load_catalog`] only adds the read.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::helpers::{coerce_list, coerce_price, normalize_name, parse_price, split_list};
use super::models::{Catalog, CatalogFormat, Pizza};
use crate::error::CatalogError;

/// Default catalog file, relative to the working directory or its parent.
pub const DEFAULT_CATALOG_PATH: &str = "data/pizzas.json";

/// Reads and parses the catalog at `path`.
pub async fn load_catalog(path: &Path, format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let format = format.resolve(path);
    tracing::debug!(path = %path.display(), ?format, "parsing catalog");

    parse_catalog(&text, format).map_err(|e| e.with_origin(path.display().to_string()))
}

/// Parses catalog text in the given encoding. `Auto` is treated as JSON when
/// the text starts with `[`, lines otherwise.
pub fn parse_catalog(text: &str, format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let pizzas = match format {
        CatalogFormat::Json => parse_json(text)?,
        CatalogFormat::Lines => parse_lines(text)?,
        CatalogFormat::Auto if text.trim_start().starts_with('[') => parse_json(text)?,
        CatalogFormat::Auto => parse_lines(text)?,
    };

    if pizzas.is_empty() {
        return Err(CatalogError::format(None, "catalog contains no pizzas"));
    }

    Ok(Catalog::new(pizzas))
}

/// Locates the default catalog file using a multi-step strategy:
/// 1. ./data/pizzas.json
/// 2. ../data/pizzas.json (if running from a subdir)
/// 3. Fallback to the relative path
pub fn locate_default_catalog(current_dir: &Path) -> PathBuf {
    if current_dir.join(DEFAULT_CATALOG_PATH).exists() {
        return current_dir.join(DEFAULT_CATALOG_PATH);
    }

    if let Some(parent) = current_dir.parent() {
        if parent.join(DEFAULT_CATALOG_PATH).exists() {
            return parent.join(DEFAULT_CATALOG_PATH);
        }
    }

    PathBuf::from(DEFAULT_CATALOG_PATH)
}

// =============================================================================
// Encodings
// =============================================================================

fn parse_json(text: &str) -> Result<Vec<Pizza>, CatalogError> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| CatalogError::format(Some(e.line()), format!("invalid JSON: {}", e)))?;

    let Value::Array(records) = root else {
        return Err(CatalogError::format(
            None,
            "expected a JSON array of pizza records",
        ));
    };

    let mut seen = HashSet::new();
    let mut pizzas = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let number = index + 1;
        let fail = |message: &str| {
            CatalogError::format(None, format!("record {}: {}", number, message))
        };

        let Value::Object(fields) = record else {
            return Err(fail("expected an object"));
        };

        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| fail("missing \"name\""))?;

        let price = coerce_price(fields.get("price"))
            .ok_or_else(|| fail("\"price\" must be a non-negative number"))?;

        if !seen.insert(normalize_name(name)) {
            return Err(fail(&format!("duplicate pizza \"{}\"", name)));
        }

        pizzas.push(Pizza {
            name: name.to_string(),
            price,
            ingredients: coerce_list(fields.get("ingredients")),
            allergens: coerce_list(fields.get("allergens")),
        });
    }

    Ok(pizzas)
}

fn parse_lines(text: &str) -> Result<Vec<Pizza>, CatalogError> {
    let mut seen = HashSet::new();
    let mut pizzas = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(CatalogError::format(
                Some(line_no),
                format!(
                    "expected 4 fields (name | price | ingredients | allergens), found {}",
                    fields.len()
                ),
            ));
        }

        let name = fields[0];
        if name.is_empty() {
            return Err(CatalogError::format(Some(line_no), "pizza name is empty"));
        }

        let price = parse_price(fields[1]).ok_or_else(|| {
            CatalogError::format(
                Some(line_no),
                format!("invalid price \"{}\"", fields[1]),
            )
        })?;

        if !seen.insert(normalize_name(name)) {
            return Err(CatalogError::format(
                Some(line_no),
                format!("duplicate pizza \"{}\"", name),
            ));
        }

        pizzas.push(Pizza {
            name: name.to_string(),
            price,
            ingredients: split_list(fields[2]),
            allergens: split_list(fields[3]),
        });
    }

    Ok(pizzas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: &str = "\
# name | price | ingredients | allergens
Margherita | 8,50 | tomato, mozzarella , basil | gluten, dairy

  BBQ Chicken  | 12 | chicken, bbq sauce | gluten
Marinara | 7 | tomato, garlic |
";

    #[test]
    fn parses_line_catalog() {
        let catalog = parse_catalog(LINES, CatalogFormat::Lines).unwrap();
        assert_eq!(catalog.len(), 3);

        let margherita = &catalog.pizzas()[0];
        assert_eq!(margherita.name, "Margherita");
        assert_eq!(margherita.price, 8.5);
        assert_eq!(margherita.ingredients, vec!["tomato", "mozzarella", "basil"]);
        assert_eq!(margherita.allergens, vec!["gluten", "dairy"]);

        assert_eq!(catalog.pizzas()[1].name, "BBQ Chicken");
        assert!(catalog.pizzas()[2].allergens.is_empty());
    }

    #[test]
    fn short_line_reports_line_number() {
        let text = "Margherita | 8 | tomato | gluten\n\nBroken | 9 | cheese\n";
        let err = parse_catalog(text, CatalogFormat::Lines).unwrap_err();
        match err {
            CatalogError::Format { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_price_reports_line_number() {
        let text = "# menu\nMargherita | eight | tomato | gluten\n";
        let err = parse_catalog(text, CatalogFormat::Lines).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("eight"), "{message}");
    }

    #[test]
    fn parses_json_catalog_with_defaults_and_coercion() {
        let text = r#"[
            {"name": " Margherita ", "price": "8.5", "ingredients": ["tomato", "basil"], "allergens": ["gluten"]},
            {"name": "Plain", "price": 5}
        ]"#;
        let catalog = parse_catalog(text, CatalogFormat::Json).unwrap();
        assert_eq!(catalog.pizzas()[0].name, "Margherita");
        assert_eq!(catalog.pizzas()[0].price, 8.5);
        assert_eq!(catalog.pizzas()[1].ingredients, Vec::<String>::new());
        assert_eq!(catalog.pizzas()[1].allergens, Vec::<String>::new());
    }

    #[test]
    fn json_record_without_name_fails() {
        let text = r#"[{"name": "Ok", "price": 1}, {"price": 2}]"#;
        let message = parse_catalog(text, CatalogFormat::Json)
            .unwrap_err()
            .to_string();
        assert!(message.contains("record 2"), "{message}");
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_catalog(r#"{"name": "x"}"#, CatalogFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::Format { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let text = "Margherita | 8 | | \nmargherita | 9 | | \n";
        let err = parse_catalog(text, CatalogFormat::Lines).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = parse_catalog("# nothing here\n", CatalogFormat::Lines).unwrap_err();
        assert!(err.to_string().contains("no pizzas"));
    }

    #[test]
    fn auto_sniffs_json() {
        let catalog = parse_catalog(r#"[{"name": "A", "price": 1}]"#, CatalogFormat::Auto).unwrap();
        assert_eq!(catalog.pizzas()[0].name, "A");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json"), CatalogFormat::Auto)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
