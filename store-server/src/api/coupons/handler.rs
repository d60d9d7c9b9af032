//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::checkout::money;
use crate::core::ServerState;
use crate::store::StoreError;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppResult};
use shared::error::{AppError, ErrorCode};
use shared::models::{Coupon, CouponCreate, CouponUpdate, DiscountType};
use shared::util;

/// List all coupons
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Coupon>>> {
    Ok(ApiResponse::success(state.coupons.list()))
}

/// Get coupon by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Coupon>> {
    let coupon = state
        .coupons
        .get(&id)
        .ok_or_else(|| AppError::with_message(ErrorCode::CouponNotFound, format!("Coupon {} not found", id)))?;
    Ok(ApiResponse::success(coupon))
}

/// Get coupon by code (case-insensitive)
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<ApiResponse<Coupon>> {
    let coupon = state.coupons.get_by_name(&name).ok_or_else(|| {
        AppError::with_message(ErrorCode::CouponNotFound, format!("Coupon {} not found", name))
    })?;
    Ok(ApiResponse::success(coupon))
}

/// Create a new coupon
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<ApiResponse<Coupon>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    money::validate_amount(payload.discount_value, "discount_value")?;
    if let Some(cap) = payload.max_discount {
        money::validate_amount(cap, "max_discount")?;
    }
    if let Some(min) = payload.min_purchase {
        money::validate_amount(min, "min_purchase")?;
    }
    if payload.usage_limit == 0 {
        return Err(AppError::validation("usage_limit must be at least 1"));
    }

    // Gift coupons must reference an existing product
    let gift_product_id = match payload.discount_type {
        DiscountType::Gift => {
            let gift_id = payload.gift_product_id.as_deref().ok_or_else(|| {
                AppError::new(ErrorCode::CouponGiftProductRequired)
            })?;
            if state.products.get(gift_id).is_none() {
                return Err(AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Gift product {} not found", gift_id),
                ));
            }
            Some(gift_id.to_string())
        }
        _ => None,
    };

    let coupon = Coupon {
        id: util::entity_id(),
        name: Coupon::normalize_code(&payload.name),
        discount_type: payload.discount_type,
        discount_value: payload.discount_value,
        // 0 means "uncapped" in older admin tooling; make it explicit
        max_discount: payload.max_discount.filter(|cap| *cap > 0.0),
        min_purchase: payload.min_purchase.unwrap_or(0.0),
        usage_limit: payload.usage_limit,
        times_used: 0,
        gift_product_id,
        expires_at: payload.expires_at,
        is_active: true,
        created_at: util::now_millis(),
    };

    state.coupons.insert(coupon.clone()).map_err(|e| match e {
        StoreError::Duplicate(_) => AppError::with_message(
            ErrorCode::CouponNameExists,
            format!("Coupon '{}' already exists", coupon.name),
        ),
        other => AppError::storage(other.to_string()),
    })?;

    tracing::info!(coupon = %coupon.name, "Coupon created");
    Ok(ApiResponse::success(coupon))
}

/// Update a coupon
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<ApiResponse<Coupon>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(value) = payload.discount_value {
        money::validate_amount(value, "discount_value")?;
    }
    if let Some(limit) = payload.usage_limit
        && limit == 0
    {
        return Err(AppError::validation("usage_limit must be at least 1"));
    }
    if let Some(ref gift_id) = payload.gift_product_id
        && state.products.get(gift_id).is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Gift product {} not found", gift_id),
        ));
    }

    let coupon = state.coupons.update(&id, payload).map_err(|e| match e {
        StoreError::NotFound(_) => {
            AppError::with_message(ErrorCode::CouponNotFound, format!("Coupon {} not found", id))
        }
        StoreError::Duplicate(what) => AppError::with_message(
            ErrorCode::CouponNameExists,
            format!("{} already exists", what),
        ),
        other => AppError::storage(other.to_string()),
    })?;
    Ok(ApiResponse::success(coupon))
}

/// Delete a coupon
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.coupons.delete(&id).map_err(|_| {
        AppError::with_message(ErrorCode::CouponNotFound, format!("Coupon {} not found", id))
    })?;
    Ok(ApiResponse::ok())
}
