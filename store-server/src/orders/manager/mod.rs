//! Orders Manager
//!
//! Owns the order lifecycle end to end: placement (resolve lines from the
//! catalog, evaluate and atomically redeem the coupon, aggregate totals,
//! persist) and every post-placement mutation (status transitions,
//! logistics, invoice flag, payment facts).
//!
//! Concurrency: coupon redemption runs the evaluator under the coupon's
//! entry lock ([`CouponStore::redeem_with`]) so the usage counter can never
//! over-redeem, and status transitions commit through a version-conditional
//! update so two racing actions resolve to one winner and one
//! [`OrderError::Conflict`].

use super::error::{OrderError, OrderResult};
use super::status::{Actor, ReasonSlot, plan_transition};
use crate::checkout::{
    self, CheckoutError, DiscountOutcome, evaluate_coupon, gst::validate_gst_rate, money,
};
use crate::store::{CouponStore, OrderStore, ProductStore, StoreError};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_REASON_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    validate_checkout_text,
};
use shared::models::{
    CartLineInput, Coupon, LogisticsUpdate, Order, OrderCreate, OrderLine, OrderStatus,
    OrderTotals, PaymentInfo, PaymentStatus, Product,
};
use shared::types::Timestamp;
use shared::util;

/// Order lifecycle manager over the stores
#[derive(Clone)]
pub struct OrdersManager {
    products: ProductStore,
    coupons: CouponStore,
    orders: OrderStore,
}

impl OrdersManager {
    pub fn new(products: ProductStore, coupons: CouponStore, orders: OrderStore) -> Self {
        Self {
            products,
            coupons,
            orders,
        }
    }

    // ====================================================================
    // Checkout
    // ====================================================================

    /// Price a cart without side effects: no redemption, no persistence.
    ///
    /// The checkout screen calls this to show totals and coupon errors
    /// before the customer commits.
    pub fn quote(
        &self,
        lines: &[CartLineInput],
        coupon_code: Option<&str>,
        shipping_fee: f64,
        now: Timestamp,
    ) -> OrderResult<OrderTotals> {
        let lines = self.resolve_lines(lines)?;
        money::validate_amount(shipping_fee, "shipping_fee").map_err(OrderError::Checkout)?;
        let subtotal = checkout::cart_subtotal(&lines);

        let outcome = match coupon_code {
            Some(code) => {
                let coupon = self.lookup_coupon(code)?;
                Some(evaluate_coupon(&coupon, subtotal, now).map_err(OrderError::Checkout)?)
            }
            None => None,
        };
        let gift_line = self.resolve_gift_line(outcome.as_ref())?;

        let (totals, _) = checkout::aggregate(lines, shipping_fee, outcome.as_ref(), gift_line);
        Ok(totals)
    }

    /// Place an order.
    ///
    /// The coupon use is consumed atomically at this point; if anything
    /// after the redemption fails, the use is released before the error
    /// propagates.
    pub fn place_order(
        &self,
        req: OrderCreate,
        shipping_fee: f64,
        now: Timestamp,
    ) -> OrderResult<Order> {
        validate_buyer(&req.buyer).map_err(OrderError::Checkout)?;
        let lines = self.resolve_lines(&req.lines)?;
        money::validate_amount(shipping_fee, "shipping_fee").map_err(OrderError::Checkout)?;
        let subtotal = checkout::cart_subtotal(&lines);

        // Evaluate + redeem under the coupon's entry lock
        let outcome = match req.coupon_code.as_deref() {
            Some(code) => Some(self.redeem_coupon(code, subtotal, now)?),
            None => None,
        };
        let coupon_code = outcome.as_ref().map(|o| o.code.clone());

        // Everything from here on must release the redeemed use on failure
        let result = self.build_and_insert(req, lines, shipping_fee, outcome, now);
        if result.is_err()
            && let Some(code) = coupon_code
            && let Err(e) = self.coupons.release_redemption(&code)
        {
            tracing::error!(coupon = %code, error = %e, "Failed to release coupon redemption");
        }
        result
    }

    fn build_and_insert(
        &self,
        req: OrderCreate,
        lines: Vec<OrderLine>,
        shipping_fee: f64,
        outcome: Option<DiscountOutcome>,
        now: Timestamp,
    ) -> OrderResult<Order> {
        let gift_line = self.resolve_gift_line(outcome.as_ref())?;
        let (totals, lines) =
            checkout::aggregate(lines, shipping_fee, outcome.as_ref(), gift_line);

        let mut order = Order {
            id: util::entity_id(),
            order_number: util::order_number(),
            buyer: req.buyer,
            lines,
            subtotal: totals.subtotal,
            shipping_fee: totals.shipping_fee,
            discount: totals.discount,
            total_paid: totals.total_paid,
            coupon_code: outcome.map(|o| o.code),
            status: OrderStatus::NotProcessed,
            is_approved_by_admin: true,
            cancel_reason: None,
            return_reason: None,
            awb_number: None,
            tracking_link: None,
            is_invoiced: false,
            payment: PaymentInfo {
                method: req.payment_method,
                status: PaymentStatus::Pending,
            },
            version: 1,
            created_at: now,
        };

        // Snowflake numbers are unique per millisecond slot; concurrent
        // checkouts can still land on the same one, so regenerate instead
        // of failing the placement
        const NUMBER_ATTEMPTS: u32 = 3;
        for attempt in 1..=NUMBER_ATTEMPTS {
            match self.orders.insert(order.clone()) {
                Ok(()) => break,
                Err(StoreError::Duplicate(_)) if attempt < NUMBER_ATTEMPTS => {
                    order.order_number = util::order_number();
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            order_number = %order.order_number,
            total_paid = order.total_paid,
            discount = order.discount,
            "Order placed"
        );
        Ok(order)
    }

    /// Subtotal a cart would have after catalog resolution
    ///
    /// Used by the API layer to apply the free-shipping policy before it
    /// knows the final totals.
    pub fn subtotal_for(&self, lines: &[CartLineInput]) -> OrderResult<f64> {
        let lines = self.resolve_lines(lines)?;
        Ok(checkout::cart_subtotal(&lines))
    }

    /// Snapshot catalog data into order lines
    fn resolve_lines(&self, inputs: &[CartLineInput]) -> OrderResult<Vec<OrderLine>> {
        if inputs.is_empty() {
            return Err(OrderError::Checkout(CheckoutError::EmptyCart));
        }
        let mut lines = Vec::with_capacity(inputs.len());
        for input in inputs {
            money::validate_quantity(input.quantity).map_err(OrderError::Checkout)?;
            let product = self
                .products
                .get_active(&input.product_id)
                .ok_or_else(|| CheckoutError::ProductNotFound(input.product_id.clone()))
                .map_err(OrderError::Checkout)?;
            money::validate_amount(product.price, "price").map_err(OrderError::Checkout)?;
            validate_gst_rate(product.gst_rate).map_err(OrderError::Checkout)?;
            lines.push(OrderLine {
                product_id: product.id,
                name: product.name,
                unit_price: product.price,
                quantity: input.quantity,
                gst_rate: product.gst_rate,
                is_gift: false,
            });
        }
        Ok(lines)
    }

    fn lookup_coupon(&self, code: &str) -> OrderResult<Coupon> {
        self.coupons
            .get_by_name(code)
            .filter(|c| c.is_active)
            .ok_or_else(|| {
                OrderError::Checkout(CheckoutError::CouponNotFound(Coupon::normalize_code(code)))
            })
    }

    fn redeem_coupon(
        &self,
        code: &str,
        subtotal: f64,
        now: Timestamp,
    ) -> OrderResult<DiscountOutcome> {
        let outcome = self
            .coupons
            .redeem_with(code, |coupon| {
                if !coupon.is_active {
                    return Err(CheckoutError::CouponNotFound(coupon.name.clone()));
                }
                evaluate_coupon(coupon, subtotal, now)
            })
            .map_err(|_| {
                OrderError::Checkout(CheckoutError::CouponNotFound(Coupon::normalize_code(code)))
            })?
            .map_err(OrderError::Checkout)?;
        Ok(outcome)
    }

    /// Resolve the gift product of a gift-coupon outcome into a zero-price
    /// line
    fn resolve_gift_line(
        &self,
        outcome: Option<&DiscountOutcome>,
    ) -> OrderResult<Option<OrderLine>> {
        let Some(gift_id) = outcome.and_then(|o| o.gift_product_id.as_deref()) else {
            return Ok(None);
        };
        let product = self
            .products
            .get_active(gift_id)
            .ok_or_else(|| CheckoutError::ProductNotFound(gift_id.to_string()))
            .map_err(OrderError::Checkout)?;
        Ok(Some(gift_line(&product)))
    }

    // ====================================================================
    // Status transitions
    // ====================================================================

    /// Apply a status transition on behalf of an actor.
    ///
    /// The plan is computed from a snapshot and committed with a
    /// version-conditional update; losing the race yields
    /// [`OrderError::Conflict`] and the caller retries with fresh state.
    pub fn transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        actor: Actor,
        reason: Option<String>,
    ) -> OrderResult<Order> {
        let reason = normalize_reason(reason)?;
        let order = self
            .orders
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        let plan = plan_transition(order.status, target, actor, reason.is_some())?;

        // Approvals reuse the reason captured with the request; reject the
        // degenerate case where it is somehow absent.
        if order.status.is_request() {
            let stored = match target {
                OrderStatus::Cancelled => &order.cancel_reason,
                OrderStatus::Returned => &order.return_reason,
                _ => &None,
            };
            if stored.is_none() && reason.is_none() {
                return Err(OrderError::ReasonRequired(target));
            }
        }

        let updated = self
            .orders
            .update_if_version(order_id, order.version, |o| {
                o.status = plan.next;
                o.is_approved_by_admin = plan.approved;
                match plan.reason_slot {
                    Some(ReasonSlot::Cancel) => o.cancel_reason = reason.clone(),
                    Some(ReasonSlot::Return) => o.return_reason = reason.clone(),
                    None => {
                        // Approval may refresh the stored reason if a new
                        // one was provided
                        if let Some(r) = reason.clone() {
                            match target {
                                OrderStatus::Cancelled => o.cancel_reason = Some(r),
                                OrderStatus::Returned => o.return_reason = Some(r),
                                _ => {}
                            }
                        }
                    }
                }
            })?;

        tracing::info!(
            order_number = %updated.order_number,
            from = ?order.status,
            to = ?updated.status,
            actor = ?actor,
            "Order status changed"
        );
        Ok(updated)
    }

    // ====================================================================
    // Admin metadata
    // ====================================================================

    /// Set logistics metadata (admin only)
    pub fn set_logistics(&self, order_id: &str, update: LogisticsUpdate) -> OrderResult<Order> {
        if let Some(awb) = &update.awb_number
            && awb.len() > MAX_SHORT_TEXT_LEN
        {
            return Err(OrderError::Validation(format!(
                "awb_number is too long ({} chars, max {MAX_SHORT_TEXT_LEN})",
                awb.len()
            )));
        }
        if let Some(link) = &update.tracking_link
            && link.len() > MAX_URL_LEN
        {
            return Err(OrderError::Validation(format!(
                "tracking_link is too long ({} chars, max {MAX_URL_LEN})",
                link.len()
            )));
        }
        let updated = self.orders.update(order_id, |o| {
            if update.awb_number.is_some() {
                o.awb_number = update.awb_number.clone();
            }
            if update.tracking_link.is_some() {
                o.tracking_link = update.tracking_link.clone();
            }
        })?;
        Ok(updated)
    }

    /// Flag that an invoice artifact has been generated (idempotent)
    pub fn mark_invoiced(&self, order_id: &str) -> OrderResult<Order> {
        let updated = self.orders.update(order_id, |o| o.is_invoiced = true)?;
        Ok(updated)
    }

    /// Record a payment status confirmed by the gateway
    pub fn set_payment_status(&self, order_id: &str, status: PaymentStatus) -> OrderResult<Order> {
        let updated = self.orders.update(order_id, |o| o.payment.status = status)?;
        Ok(updated)
    }

    // ====================================================================
    // Queries
    // ====================================================================

    pub fn get(&self, order_id: &str) -> OrderResult<Order> {
        self.orders
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    pub fn get_by_number(&self, order_number: &str) -> OrderResult<Order> {
        self.orders
            .get_by_number(order_number)
            .ok_or_else(|| OrderError::NotFound(order_number.to_string()))
    }

    pub fn list(&self, limit: usize, offset: usize) -> Vec<Order> {
        self.orders.list(limit, offset)
    }
}

/// Trim a caller-supplied reason; blank collapses to None
fn normalize_reason(reason: Option<String>) -> OrderResult<Option<String>> {
    let Some(reason) = reason else {
        return Ok(None);
    };
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.len() > MAX_REASON_LEN {
        return Err(OrderError::Validation(format!(
            "reason is too long ({} chars, max {MAX_REASON_LEN})",
            trimmed.len()
        )));
    }
    Ok(Some(trimmed.to_string()))
}

fn validate_buyer(buyer: &shared::models::BuyerSnapshot) -> Result<(), CheckoutError> {
    validate_checkout_text(&buyer.name, "buyer name", MAX_NAME_LEN)?;
    validate_checkout_text(&buyer.phone, "buyer phone", MAX_SHORT_TEXT_LEN)?;
    validate_checkout_text(&buyer.address, "buyer address", MAX_ADDRESS_LEN)?;
    Ok(())
}

/// Zero-price line for a gift product
fn gift_line(product: &Product) -> OrderLine {
    OrderLine {
        product_id: product.id.clone(),
        name: product.name.clone(),
        unit_price: 0.0,
        quantity: 1,
        gst_rate: product.gst_rate,
        is_gift: true,
    }
}

#[cfg(test)]
mod tests;
