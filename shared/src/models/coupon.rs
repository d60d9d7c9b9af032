//! Coupon Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Flat amount off the cart subtotal
    Fixed,
    /// Percentage of the cart subtotal, optionally capped
    Percentage,
    /// Free product line item instead of a monetary discount
    Gift,
}

/// Coupon entity
///
/// Created and edited by admin, read by the checkout flow. The only
/// mutable runtime state is the `times_used` counter, which is bumped
/// atomically on each successful redemption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    /// Unique code, stored uppercase
    pub name: String,
    pub discount_type: DiscountType,
    /// Flat amount or percentage depending on type; 0 and ignored for Gift
    pub discount_value: f64,
    /// Cap for Percentage coupons; None = uncapped
    pub max_discount: Option<f64>,
    /// Minimum cart subtotal required to apply
    pub min_purchase: f64,
    /// Total number of redemptions allowed
    pub usage_limit: u32,
    /// Redemptions so far
    pub times_used: u32,
    /// Gift product, required when discount_type = Gift
    pub gift_product_id: Option<String>,
    /// Inapplicable at or after this instant (Unix millis)
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Coupon {
    /// Canonical form of a coupon code: trimmed, uppercase
    pub fn normalize_code(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    pub fn remaining_uses(&self) -> u32 {
        self.usage_limit.saturating_sub(self.times_used)
    }
}

/// Create coupon payload
///
/// `max_discount` accepts `0`/absent as "uncapped" for compatibility with
/// older admin tooling; it is normalized to `None` on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub min_purchase: Option<f64>,
    pub usage_limit: u32,
    #[serde(default)]
    pub gift_product_id: Option<String>,
    pub expires_at: Timestamp,
}

/// Update coupon payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CouponUpdate {
    pub name: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    pub max_discount: Option<f64>,
    pub min_purchase: Option<f64>,
    pub usage_limit: Option<u32>,
    pub gift_product_id: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}
