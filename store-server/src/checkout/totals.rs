//! Order Total Aggregator
//!
//! Combines resolved line items, the shipping fee, and a discount outcome
//! into the final payable totals. Deterministic and pure given identical
//! inputs; no hidden state.

use super::coupon::DiscountOutcome;
use super::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::models::{OrderLine, OrderTotals};

/// Sum of `unit_price * quantity` over the lines, 2dp
///
/// Gift lines contribute 0 by construction (`unit_price == 0`).
pub fn cart_subtotal(lines: &[OrderLine]) -> f64 {
    let total: Decimal = lines
        .iter()
        .map(|l| to_decimal(l.unit_price) * Decimal::from(l.quantity))
        .sum();
    to_f64(total)
}

/// Aggregate final order totals, appending the gift line when present
///
/// - discount is clamped so it never exceeds `subtotal + shipping_fee`
/// - `total_paid = subtotal + shipping_fee - discount`, floored at 0
///   (defensive; the clamp already guarantees it)
/// - a gift outcome appends the pre-resolved zero-price line so it appears
///   on fulfillment and shipping lists without contributing to the subtotal
pub fn aggregate(
    mut lines: Vec<OrderLine>,
    shipping_fee: f64,
    outcome: Option<&DiscountOutcome>,
    gift_line: Option<OrderLine>,
) -> (OrderTotals, Vec<OrderLine>) {
    if let Some(gift) = gift_line {
        debug_assert!(gift.is_gift && gift.unit_price == 0.0 && gift.quantity == 1);
        lines.push(gift);
    }

    let subtotal = to_decimal(cart_subtotal(&lines));
    let shipping = to_decimal(shipping_fee);

    let raw_discount = outcome.map(|o| to_decimal(o.discount)).unwrap_or(Decimal::ZERO);
    let discount = raw_discount.min(subtotal + shipping).max(Decimal::ZERO);

    let total_paid = (subtotal + shipping - discount).max(Decimal::ZERO);

    let totals = OrderTotals {
        subtotal: to_f64(subtotal),
        shipping_fee: to_f64(shipping),
        discount: to_f64(discount),
        total_paid: to_f64(total_paid),
    };
    (totals, lines)
}
