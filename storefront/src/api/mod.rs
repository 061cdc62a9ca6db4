//! HTTP API routes

pub mod account;
pub mod admin;
pub mod cart;
pub mod health;
mod json;
pub mod orders;
pub mod stock;

use axum::Router;
use axum::routing::{get, patch, post, put};
use shared::error::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use json::AppJson;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the storefront router
pub fn create_router(state: AppState) -> Router {
    let orders = Router::new()
        .route("/api/orders", post(orders::place_order))
        .route("/api/orders/{transaction_id}", get(orders::get_order))
        .route("/api/user-summary", get(orders::order_history));

    let cart = Router::new()
        .route("/api/cart", get(cart::get_cart).post(cart::add_to_cart))
        .route(
            "/api/cart/{id}",
            put(cart::update_cart_line).delete(cart::remove_cart_line),
        );

    let admin = Router::new()
        .route(
            "/api/appliance-details/{id}/stock",
            patch(stock::adjust_stock),
        )
        .route("/api/admin/orders", get(admin::list_orders));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/change-password", post(account::change_password))
        .merge(orders)
        .merge(cart)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
