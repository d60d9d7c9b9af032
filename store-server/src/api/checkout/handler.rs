//! Checkout API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{CartLineInput, Order, OrderCreate, OrderTotals};
use shared::util;

/// Quote request: cart lines plus an optional coupon
///
/// `shipping_fee` may be supplied by the caller; when absent the server
/// applies the configured free-shipping policy.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub lines: Vec<CartLineInput>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub shipping_fee: Option<f64>,
}

/// Price a cart without placing an order
///
/// Coupon failures (expired, exhausted, minimum purchase) surface as tagged
/// errors for the checkout screen; nothing is persisted or redeemed.
pub async fn quote(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<ApiResponse<OrderTotals>> {
    let shipping_fee = resolve_shipping_fee(&state, payload.shipping_fee, &payload.lines)?;
    let totals = state.manager.quote(
        &payload.lines,
        payload.coupon_code.as_deref(),
        shipping_fee,
        util::now_millis(),
    )?;
    Ok(ApiResponse::success(totals))
}

/// Place order request
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(flatten)]
    pub order: OrderCreate,
    #[serde(default)]
    pub shipping_fee: Option<f64>,
}

/// Place an order
pub async fn place_order(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<ApiResponse<Order>> {
    let shipping_fee = resolve_shipping_fee(&state, payload.shipping_fee, &payload.order.lines)?;
    let order = state
        .manager
        .place_order(payload.order, shipping_fee, util::now_millis())?;
    Ok(ApiResponse::success(order))
}

/// Caller-supplied fee wins; otherwise the free-shipping policy decides
fn resolve_shipping_fee(
    state: &ServerState,
    supplied: Option<f64>,
    lines: &[CartLineInput],
) -> AppResult<f64> {
    match supplied {
        Some(fee) => Ok(fee),
        None => {
            let subtotal = state.manager.subtotal_for(lines)?;
            Ok(state.config.shipping_fee_for(subtotal))
        }
    }
}
