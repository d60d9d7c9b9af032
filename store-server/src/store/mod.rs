//! Store Module
//!
//! In-process persistence for orders, coupons, and products. Every handle is
//! cheaply clonable (`Arc<DashMap>` inside) and exposes the conditional
//! updates the engine needs: versioned compare-and-swap on orders and an
//! entry-locked check-then-increment on coupon usage. This is the seam where
//! an external database would plug in; nothing above this module assumes a
//! storage technology.

pub mod memory;

pub use memory::{CouponStore, OrderStore, ProductStore};

use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("version conflict on {0}")]
    VersionConflict(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
