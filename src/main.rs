use clap::Parser;
use pizza_cart_rust::cart::AppState;
use pizza_cart_rust::catalog::load_catalog;
use pizza_cart_rust::config::Config;
use pizza_cart_rust::error::AppError;
use pizza_cart_rust::mcp::{serve_stdio, McpHandler};
use pizza_cart_rust::router::create_app_router;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Logging goes to stderr; stdout is reserved for MCP frames
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    let code = match run(config).await {
        Ok(()) => 0,
        Err(e) => {
            // Printed directly so it shows even when RUST_LOG filters errors out
            eprintln!("pizza-cart: {}", e);
            1
        }
    };

    // The blocking stdin reader would otherwise hold the runtime open
    std::process::exit(code);
}

async fn run(config: Config) -> Result<(), AppError> {
    // Load the catalog before either surface starts
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let catalog_path = config.catalog_path(&current_dir);
    let catalog = load_catalog(&catalog_path, config.catalog_format).await?;
    tracing::info!(
        path = %catalog_path.display(),
        pizzas = catalog.len(),
        "catalog loaded"
    );

    let state = Arc::new(AppState::new(catalog));

    // HTTP surface
    let addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Cart view running on http://{}", listener.local_addr()?);

    let app = create_app_router(Arc::clone(&state));
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let http = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
        if let Err(e) = &result {
            tracing::error!("HTTP server stopped: {}", e);
        }
        result
    });

    // Tool surface
    let handler = McpHandler::new(state);
    tracing::info!("MCP server listening on stdio");

    let outcome = tokio::select! {
        result = serve_stdio(&handler) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    };

    let _ = shutdown_tx.send(());
    if let Ok(Err(e)) = http.await {
        return Err(e.into());
    }

    outcome
}
