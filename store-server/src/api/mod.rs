//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`checkout`] - cart quoting and order placement
//! - [`orders`] - order queries, status transitions, admin metadata
//! - [`coupons`] - coupon administration
//! - [`products`] - product catalog administration

pub mod checkout;
pub mod coupons;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Combined API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(coupons::router())
        .merge(products::router())
}
