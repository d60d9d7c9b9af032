//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::Actor;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{
    LogisticsUpdate, Order, OrderStatus, PaymentUpdate, StatusRequest, StatusUpdate,
};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// List orders (paginated, newest first)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    let orders = state.manager.list(query.limit, query.offset);
    Ok(ApiResponse::success(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.get(&id)?;
    Ok(ApiResponse::success(order))
}

/// Get order by its human-readable order number
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.get_by_number(&order_number)?;
    Ok(ApiResponse::success(order))
}

/// Customer requests cancellation (only before shipping)
pub async fn cancel_request(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.transition(
        &id,
        OrderStatus::CancelRequested,
        Actor::Customer,
        Some(payload.reason),
    )?;
    Ok(ApiResponse::success(order))
}

/// Customer requests a return (only after delivery)
pub async fn return_request(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.transition(
        &id,
        OrderStatus::ReturnRequested,
        Actor::Customer,
        Some(payload.reason),
    )?;
    Ok(ApiResponse::success(order))
}

/// Admin status change: forward moves, request approvals, direct
/// cancel/return
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<ApiResponse<Order>> {
    let order = state
        .manager
        .transition(&id, payload.status, Actor::Admin, payload.reason)?;
    Ok(ApiResponse::success(order))
}

/// Set AWB number / tracking link (admin)
pub async fn update_logistics(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LogisticsUpdate>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.set_logistics(&id, payload)?;
    Ok(ApiResponse::success(order))
}

/// Flag the order as invoiced once the artifact has been generated
pub async fn mark_invoiced(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.mark_invoiced(&id)?;
    Ok(ApiResponse::success(order))
}

/// Record a payment status confirmed by the gateway
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.manager.set_payment_status(&id, payload.status)?;
    Ok(ApiResponse::success(order))
}
