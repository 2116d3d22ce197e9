//! Command-line and environment configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::catalog::{locate_default_catalog, CatalogFormat};

#[derive(Parser, Debug, Clone)]
#[command(name = "pizza-cart")]
#[command(about = "Pizza ordering assistant: MCP tools on stdio, cart view over HTTP")]
#[command(version)]
pub struct Config {
    /// Catalog file (defaults to data/pizzas.json in the working directory or its parent)
    #[arg(long, env = "PIZZA_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Catalog encoding
    #[arg(long, env = "PIZZA_CATALOG_FORMAT", value_enum, default_value = "auto")]
    pub catalog_format: CatalogFormat,

    /// Host the cart view binds to
    #[arg(long, env = "PIZZA_HTTP_HOST", default_value = "127.0.0.1")]
    pub http_host: String,

    /// Port the cart view binds to
    #[arg(long, env = "PIZZA_HTTP_PORT", default_value = "3000")]
    pub http_port: u16,
}

impl Config {
    /// The configured catalog, or the default one located from `current_dir`.
    pub fn catalog_path(&self, current_dir: &Path) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| locate_default_catalog(current_dir))
    }

    /// `host:port` for the HTTP listener
    pub fn http_addr(&self) -> String {
        match self.http_host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.http_port).to_string(),
            Err(_) => format!("{}:{}", self.http_host, self.http_port),
        }
    }
}
