//! Store Server - storefront backend for the Gopi Nath Collection
//!
//! # Architecture overview
//!
//! The heart of the crate is the order & coupon evaluation engine:
//!
//! - **Checkout** (`checkout`): GST price breakdown, coupon evaluation,
//!   and order total aggregation as pure, deterministic functions
//! - **Orders** (`orders`): the order status state machine and the manager
//!   that drives placement and lifecycle transitions
//! - **Stores** (`store`): in-process persistence with the atomic
//!   conditional updates the engine requires (versioned CAS on orders,
//!   entry-locked redemption on coupons)
//! - **HTTP API** (`api`): axum routers for checkout, orders, coupons,
//!   products, and health
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # configuration, state, server
//! ├── checkout/      # pricing engine (pure)
//! ├── orders/        # state machine + manager
//! ├── store/         # in-memory stores
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod checkout;
pub mod core;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use orders::{Actor, OrderError, OrdersManager};
pub use store::{CouponStore, OrderStore, ProductStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then initialize logging from the resulting environment
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
