//! GST price breakdown
//!
//! Prices in the catalog are tax-inclusive: the displayed price already
//! contains the GST amount, which must be decomposed for display and
//! accounting. Formula: `gst = gross * rate / (100 + rate)`.

use super::error::{CheckoutError, CheckoutResult};
use super::money::{to_decimal, to_f64, validate_amount};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::OrderLine;

/// Supported GST slabs (percent)
pub const GST_RATES: [i32; 4] = [0, 5, 12, 18];

/// Tax-exclusive decomposition of a tax-inclusive price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub gst_amount: f64,
}

/// Check that a rate is one of the supported slabs
pub fn validate_gst_rate(rate: i32) -> CheckoutResult<()> {
    if !GST_RATES.contains(&rate) {
        return Err(CheckoutError::InvalidGstRate(rate));
    }
    Ok(())
}

/// Decompose a tax-inclusive price into base price and GST amount
///
/// Both components are rounded half-up to 2 decimal places, and
/// `base_price + gst_amount == total_price` holds exactly: the GST amount is
/// rounded first and the base is derived by subtraction, so the same
/// breakdown appears at every call site without penny mismatches.
pub fn gst_breakdown(total_price: f64, gst_rate_percent: i32) -> CheckoutResult<PriceBreakdown> {
    validate_amount(total_price, "total_price")?;
    validate_gst_rate(gst_rate_percent)?;

    let total = to_decimal(total_price);
    let rate = Decimal::from(gst_rate_percent);

    let gst = if rate > Decimal::ZERO {
        (total * rate / (Decimal::ONE_HUNDRED + rate))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    Ok(PriceBreakdown {
        base_price: to_f64(total - gst),
        gst_amount: to_f64(gst),
    })
}

/// Total GST contained in an order's line items
///
/// Used by the invoice flow; line totals are decomposed per line so the
/// printed per-line breakdown sums to the order figure.
pub fn order_gst_total(lines: &[OrderLine]) -> CheckoutResult<f64> {
    let mut total = Decimal::ZERO;
    for line in lines {
        let line_total = to_f64(to_decimal(line.unit_price) * Decimal::from(line.quantity));
        let breakdown = gst_breakdown(line_total, line.gst_rate)?;
        total += to_decimal(breakdown.gst_amount);
    }
    Ok(to_f64(total))
}
