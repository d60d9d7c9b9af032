//! Order API Module
//!
//! Queries, lifecycle transitions, and admin metadata. Order placement
//! lives under `/api/checkout`.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Queries
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/by-number/{order_number}", get(handler::get_by_number))
        // Customer-initiated requests (need admin approval)
        .route("/{id}/cancel-request", post(handler::cancel_request))
        .route("/{id}/return-request", post(handler::return_request))
        // Admin transitions and metadata
        .route("/{id}/status", post(handler::update_status))
        .route("/{id}/logistics", put(handler::update_logistics))
        .route("/{id}/invoiced", post(handler::mark_invoiced))
        .route("/{id}/payment", put(handler::update_payment))
}
