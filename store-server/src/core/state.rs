use std::sync::Arc;

use crate::core::Config;
use crate::orders::OrdersManager;
use crate::store::{CouponStore, OrderStore, ProductStore};

/// Server state - shared handles to configuration, stores, and the orders
/// manager
///
/// Cloning is cheap: every field is an `Arc`-backed handle.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Arc<Config> | immutable configuration |
/// | products | ProductStore | catalog-lite |
/// | coupons | CouponStore | coupon records + usage counters |
/// | orders | OrderStore | order records with version CAS |
/// | manager | OrdersManager | order placement and lifecycle |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub products: ProductStore,
    pub coupons: CouponStore,
    pub orders: OrderStore,
    pub manager: OrdersManager,
}

impl ServerState {
    /// Initialize fresh state for the given configuration
    pub fn initialize(config: &Config) -> Self {
        let products = ProductStore::open_in_memory();
        let coupons = CouponStore::open_in_memory();
        let orders = OrderStore::open_in_memory();
        let manager = OrdersManager::new(products.clone(), coupons.clone(), orders.clone());

        tracing::info!(environment = %config.environment, "Server state initialized");

        Self {
            config: Arc::new(config.clone()),
            products,
            coupons,
            orders,
            manager,
        }
    }
}
