//! Router assembly and the health probe.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::require_auth, state::AppState};

pub fn router(state: AppState) -> Router {
    let cart = Router::new()
        .route("/", get(cart::get_cart))
        .route("/add", post(cart::add_to_cart))
        .route("/update/:id", put(cart::update_item))
        .route("/remove/:id", delete(cart::remove_item))
        .route("/clear", delete(cart::clear_cart))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth));

    let checkout = Router::new()
        .route("/", post(checkout::checkout))
        .route("/orders", get(checkout::list_orders))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(products::list_products))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .nest("/api/cart", cart)
        .nest("/api/checkout", checkout)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "timestamp": chrono::Utc::now() }))
}
