//! Routing module for the cart view

use crate::cart::state::SharedState;
use axum::{body::Body, extract::Request, http::Method, middleware::Next, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let res = next.run(req).await;
        if res.status().is_success() {
            tracing::debug!(%method, %uri, status = %res.status(), "http request");
        } else {
            tracing::info!(%method, %uri, status = %res.status(), "http request failed");
        }
        res
    });

    // Middleware: only GET gets past this point. HEAD and OPTIONS (CORS
    // preflights included) are answered with the plain 404.
    let get_only_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        if req.method() == Method::GET {
            next.run(req).await
        } else {
            crate::web::not_found().await
        }
    });

    // Middleware: CORS, so any origin may GET the JSON snapshot
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .merge(crate::web::routes())
        .layer(
            ServiceBuilder::new()
                .layer(log_layer)
                .layer(get_only_layer)
                .layer(cors_layer),
        )
        .with_state(state)
}
