//! Read-only HTTP handlers for the cart view
//!
//! Every route is GET-only. Any other method or path gets a plain 404.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::render::render_cart_page;
use crate::cart::state::SharedState;

/// Creates routes for the human-facing cart view
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(cart_page).fallback(not_found))
        .route("/cart", get(cart_page).fallback(not_found))
        .route("/api/cart.json", get(cart_json).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .fallback(not_found)
}

/// Endpoint: GET / and GET /cart
async fn cart_page(State(state): State<SharedState>) -> Html<String> {
    Html(render_cart_page(&state.cart.snapshot()))
}

/// Endpoint: GET /api/cart.json
async fn cart_json(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.cart.snapshot())
}

/// Endpoint: GET /health
async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "ok")
}

/// Plain 404 for unknown paths and non-GET methods
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not found",
    )
        .into_response()
}
