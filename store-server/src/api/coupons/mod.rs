//! Coupon API Module
//!
//! Admin CRUD over coupons. Redemption happens inside order placement, not
//! here.

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

/// Coupon router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/by-name/{name}", get(handler::get_by_name))
}
