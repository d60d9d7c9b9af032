//! Checkout API Module
//!
//! Cart quoting (no side effects) and order placement.

mod handler;

use axum::{
    Router,
    routing::post,
};

use crate::core::ServerState;

/// Checkout router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Price a cart + coupon before committing
        .route("/quote", post(handler::quote))
        // Place an order (consumes the coupon use atomically)
        .route("/orders", post(handler::place_order))
}
