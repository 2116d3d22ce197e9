//! Catalog Domain Models

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::helpers::normalize_name;

// =============================================================================
// Pizza
// =============================================================================

/// A pizza on the menu. Immutable once the catalog is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pizza {
    /// Display name, trimmed
    pub name: String,

    /// Price in the catalog currency
    pub price: f64,

    /// Ingredients in source order
    pub ingredients: Vec<String>,

    /// Allergens in source order
    pub allergens: Vec<String>,
}

impl Pizza {
    /// Case-insensitive check against a list of allergens
    pub fn contains_any_allergen(&self, excluded: &[String]) -> bool {
        self.allergens.iter().any(|a| {
            let a = normalize_name(a);
            excluded.iter().any(|e| normalize_name(e) == a)
        })
    }

    /// Case-insensitive check that every requested ingredient is present
    pub fn contains_all_ingredients(&self, required: &[String]) -> bool {
        required.iter().all(|r| {
            let r = normalize_name(r);
            self.ingredients.iter().any(|i| normalize_name(i) == r)
        })
    }
}

// =============================================================================
// Catalog Format
// =============================================================================

/// Encoding of a catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CatalogFormat {
    /// Pick from the file extension
    #[default]
    Auto,
    /// Array of `{name, price, ingredients, allergens}` records
    Json,
    /// `name | price | ingredients | allergens`, one pizza per line
    Lines,
}

impl CatalogFormat {
    /// Resolves `Auto` against a path: `.json` means JSON, anything else lines.
    pub fn resolve(self, path: &Path) -> CatalogFormat {
        match self {
            CatalogFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if is_json {
                    CatalogFormat::Json
                } else {
                    CatalogFormat::Lines
                }
            }
            explicit => explicit,
        }
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Criteria for `list_pizzas`. Empty criteria match everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PizzaFilter {
    /// Inclusive upper bound on price
    pub max_price: Option<f64>,

    /// Pizzas carrying any of these allergens are dropped
    #[serde(default)]
    pub exclude_allergens: Vec<String>,

    /// Pizzas must contain all of these ingredients
    #[serde(default)]
    pub include_ingredients: Vec<String>,
}

impl PizzaFilter {
    pub fn matches(&self, pizza: &Pizza) -> bool {
        if let Some(max) = self.max_price {
            if pizza.price > max {
                return false;
            }
        }
        !pizza.contains_any_allergen(&self.exclude_allergens)
            && pizza.contains_all_ingredients(&self.include_ingredients)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable list of pizzas loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pizzas: Vec<Pizza>,
}

impl Catalog {
    pub fn new(pizzas: Vec<Pizza>) -> Self {
        Self { pizzas }
    }

    pub fn pizzas(&self) -> &[Pizza] {
        &self.pizzas
    }

    pub fn len(&self) -> usize {
        self.pizzas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pizzas.is_empty()
    }

    /// Exact, case-insensitive lookup by name. No fuzzy matching.
    pub fn find(&self, name: &str) -> Option<&Pizza> {
        let key = normalize_name(name);
        self.pizzas.iter().find(|p| normalize_name(&p.name) == key)
    }

    /// Returns the pizzas matching `filter`, in catalog order.
    pub fn filter(&self, filter: &PizzaFilter) -> Vec<&Pizza> {
        self.pizzas.iter().filter(|p| filter.matches(p)).collect()
    }
}
