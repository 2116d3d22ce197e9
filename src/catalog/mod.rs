//! Pizza Catalog Module
//!
//! This module contains the immutable menu, including:
//! - Domain models (Pizza, Catalog, filters, format hints)
//! - Parsing helpers shared by both encodings
//! - The loader that reads the catalog source at startup

pub mod helpers;
pub mod loader;
pub mod models;

pub use loader::{load_catalog, locate_default_catalog, parse_catalog};
pub use models::{Catalog, CatalogFormat, Pizza, PizzaFilter};
