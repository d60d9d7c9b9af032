//! In-memory stores backed by DashMap
//!
//! Atomicity relies on DashMap entry locks: a `get_mut` guard holds the
//! entry exclusively, so check-then-mutate sequences inside one guard are
//! atomic with respect to concurrent callers on the same key.

use super::{StoreError, StoreResult};
use dashmap::{DashMap, Entry};
use shared::models::{Coupon, CouponUpdate, Order, Product};
use std::sync::Arc;

// ========================================================================
// Orders
// ========================================================================

/// Order store with optimistic concurrency on a per-order version counter
#[derive(Clone, Default)]
pub struct OrderStore {
    orders: Arc<DashMap<String, Order>>,
    /// order_number -> id index
    by_number: Arc<DashMap<String, String>>,
}

impl OrderStore {
    pub fn open_in_memory() -> Self {
        Self::default()
    }

    /// Insert a new order; id and order number must be unused
    pub fn insert(&self, order: Order) -> StoreResult<()> {
        if self.orders.contains_key(&order.id) {
            return Err(StoreError::Duplicate(format!("order {}", order.id)));
        }
        // Reserve the number through the entry lock so two concurrent
        // inserts of the same number cannot both pass the check
        match self.by_number.entry(order.order_number.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::Duplicate(format!(
                    "order number {}",
                    order.order_number
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(order.id.clone());
            }
        }
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.get(id).map(|o| o.clone())
    }

    pub fn get_by_number(&self, order_number: &str) -> Option<Order> {
        let id = self.by_number.get(order_number)?;
        self.get(&id)
    }

    /// List orders, newest first
    pub fn list(&self, limit: usize, offset: usize) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.iter().map(|o| o.clone()).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders.into_iter().skip(offset).take(limit).collect()
    }

    /// Conditionally update an order: the mutation is applied only if the
    /// stored version still equals `expected_version` (optimistic
    /// concurrency). On success the version is bumped and the new state
    /// returned; a lost race yields [`StoreError::VersionConflict`] and
    /// leaves the order unchanged.
    pub fn update_if_version(
        &self,
        id: &str,
        expected_version: u64,
        apply: impl FnOnce(&mut Order),
    ) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))?;
        if entry.version != expected_version {
            return Err(StoreError::VersionConflict(format!("order {}", id)));
        }
        apply(&mut entry);
        entry.version += 1;
        Ok(entry.clone())
    }

    /// Unconditional update for fields with no read-modify-write hazard
    /// (logistics, invoice flag, payment facts). Still bumps the version.
    pub fn update(&self, id: &str, apply: impl FnOnce(&mut Order)) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))?;
        apply(&mut entry);
        entry.version += 1;
        Ok(entry.clone())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// ========================================================================
// Coupons
// ========================================================================

/// Coupon store; redemption is an entry-locked check-then-increment
#[derive(Clone, Default)]
pub struct CouponStore {
    coupons: Arc<DashMap<String, Coupon>>,
    /// normalized name -> id index
    by_name: Arc<DashMap<String, String>>,
}

impl CouponStore {
    pub fn open_in_memory() -> Self {
        Self::default()
    }

    /// Insert a new coupon; the normalized code must be unused
    pub fn insert(&self, coupon: Coupon) -> StoreResult<()> {
        match self.by_name.entry(coupon.name.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::Duplicate(format!("coupon {}", coupon.name)));
            }
            Entry::Vacant(slot) => {
                slot.insert(coupon.id.clone());
            }
        }
        self.coupons.insert(coupon.id.clone(), coupon);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Coupon> {
        self.coupons.get(id).map(|c| c.clone())
    }

    pub fn get_by_name(&self, name: &str) -> Option<Coupon> {
        let id = self.by_name.get(&Coupon::normalize_code(name))?;
        self.get(&id)
    }

    pub fn list(&self) -> Vec<Coupon> {
        let mut coupons: Vec<Coupon> = self.coupons.iter().map(|c| c.clone()).collect();
        coupons.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        coupons
    }

    /// Merge an admin update into a coupon, keeping the name index unique
    pub fn update(&self, id: &str, data: CouponUpdate) -> StoreResult<Coupon> {
        // Rename needs the uniqueness check against the index first
        let new_name = data.name.as_deref().map(Coupon::normalize_code);
        if let Some(ref name) = new_name
            && let Some(existing) = self.by_name.get(name)
            && existing.value().as_str() != id
        {
            return Err(StoreError::Duplicate(format!("coupon {}", name)));
        }

        let mut entry = self
            .coupons
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("coupon {}", id)))?;

        if let Some(name) = new_name {
            if name != entry.name {
                self.by_name.remove(&entry.name);
                self.by_name.insert(name.clone(), id.to_string());
                entry.name = name;
            }
        }
        if let Some(v) = data.discount_type {
            entry.discount_type = v;
        }
        if let Some(v) = data.discount_value {
            entry.discount_value = v;
        }
        if let Some(v) = data.max_discount {
            // 0 keeps its legacy "uncapped" meaning at the API boundary
            entry.max_discount = if v > 0.0 { Some(v) } else { None };
        }
        if let Some(v) = data.min_purchase {
            entry.min_purchase = v;
        }
        if let Some(v) = data.usage_limit {
            entry.usage_limit = v;
        }
        if let Some(v) = data.gift_product_id {
            entry.gift_product_id = Some(v);
        }
        if let Some(v) = data.expires_at {
            entry.expires_at = v;
        }
        if let Some(v) = data.is_active {
            entry.is_active = v;
        }
        Ok(entry.clone())
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let (_, coupon) = self
            .coupons
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(format!("coupon {}", id)))?;
        self.by_name.remove(&coupon.name);
        Ok(())
    }

    /// Atomically redeem one use of a coupon.
    ///
    /// `check` runs under the coupon's entry lock with the current state
    /// (including `times_used`); if it passes, the usage counter is
    /// incremented before the lock is released. Two checkouts racing on the
    /// last remaining use therefore resolve to exactly one success: the
    /// loser re-runs `check` against the incremented counter and fails its
    /// usage test.
    pub fn redeem_with<T, E>(
        &self,
        name: &str,
        check: impl FnOnce(&Coupon) -> Result<T, E>,
    ) -> StoreResult<Result<T, E>> {
        let id = self
            .by_name
            .get(&Coupon::normalize_code(name))
            .map(|e| e.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("coupon {}", name)))?;
        let mut entry = self
            .coupons
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("coupon {}", name)))?;

        let result = check(&entry);
        if result.is_ok() {
            entry.times_used += 1;
        }
        Ok(result)
    }

    /// Return one use to a coupon after a failed placement
    pub fn release_redemption(&self, name: &str) -> StoreResult<()> {
        let id = self
            .by_name
            .get(&Coupon::normalize_code(name))
            .map(|e| e.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("coupon {}", name)))?;
        let mut entry = self
            .coupons
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("coupon {}", name)))?;
        entry.times_used = entry.times_used.saturating_sub(1);
        Ok(())
    }
}

// ========================================================================
// Products
// ========================================================================

/// Product store (catalog-lite)
#[derive(Clone, Default)]
pub struct ProductStore {
    products: Arc<DashMap<String, Product>>,
}

impl ProductStore {
    pub fn open_in_memory() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product) -> StoreResult<()> {
        if self.products.contains_key(&product.id) {
            return Err(StoreError::Duplicate(format!("product {}", product.id)));
        }
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.clone())
    }

    /// Lookup for checkout: active products only
    pub fn get_active(&self, id: &str) -> Option<Product> {
        self.get(id).filter(|p| p.is_active)
    }

    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.iter().map(|p| p.clone()).collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        products
    }
}
