//! Coupon Evaluator
//!
//! Validates a coupon against a cart subtotal and returns a discount
//! outcome. Checks run in a fixed order and short-circuit on the first
//! failure, so the customer always sees the most fundamental problem
//! (expiry before usage before minimum purchase).
//!
//! Evaluation is pure; the atomic usage-counter increment happens in
//! [`crate::store::CouponStore::redeem_with`], which runs this evaluator
//! under the coupon's entry lock at placement time.

use super::error::{CheckoutError, CheckoutResult};
use super::money::{to_decimal, to_f64, validate_amount};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{Coupon, DiscountType};
use shared::types::Timestamp;

/// Result of a successful coupon evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountOutcome {
    /// Coupon code, uppercase
    pub code: String,
    /// Monetary discount (0 for gift coupons)
    pub discount: f64,
    /// Gift product to append as a zero-price line, for gift coupons
    pub gift_product_id: Option<String>,
}

/// Evaluate a coupon against a cart subtotal at a given instant
///
/// Steps, in order, short-circuiting on first failure:
/// 1. not expired (`now < expires_at`)
/// 2. remaining usage > 0
/// 3. subtotal meets `min_purchase` (failure reports the shortfall)
/// 4. discount computed by type
pub fn evaluate_coupon(
    coupon: &Coupon,
    cart_subtotal: f64,
    now: Timestamp,
) -> CheckoutResult<DiscountOutcome> {
    validate_amount(cart_subtotal, "cart_subtotal")?;

    if now >= coupon.expires_at {
        return Err(CheckoutError::CouponExpired);
    }

    if coupon.times_used >= coupon.usage_limit {
        return Err(CheckoutError::CouponExhausted);
    }

    let subtotal = to_decimal(cart_subtotal);
    let min_purchase = to_decimal(coupon.min_purchase);
    if subtotal < min_purchase {
        return Err(CheckoutError::MinimumPurchaseNotMet {
            shortfall: to_f64(min_purchase - subtotal),
        });
    }

    let discount = match coupon.discount_type {
        // Flat amount, never exceeding the subtotal (a discount cannot
        // push the total negative)
        DiscountType::Fixed => to_decimal(coupon.discount_value).min(subtotal),

        DiscountType::Percentage => {
            let mut discount = (subtotal * to_decimal(coupon.discount_value)
                / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            if let Some(cap) = coupon.max_discount {
                discount = discount.min(to_decimal(cap));
            }
            discount
        }

        DiscountType::Gift => {
            if coupon.gift_product_id.is_none() {
                return Err(CheckoutError::GiftProductMissing);
            }
            Decimal::ZERO
        }
    };

    Ok(DiscountOutcome {
        code: coupon.name.clone(),
        discount: to_f64(discount),
        gift_product_id: coupon.gift_product_id.clone(),
    })
}
