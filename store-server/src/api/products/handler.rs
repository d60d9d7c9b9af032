//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::checkout::gst::validate_gst_rate;
use crate::checkout::money;
use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppResult};
use shared::error::{AppError, ErrorCode};
use shared::models::{Product, ProductCreate};
use shared::util;

/// List all products
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Product>>> {
    Ok(ApiResponse::success(state.products.list()))
}

/// Get product by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Product>> {
    let product = state.products.get(&id).ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
    })?;
    Ok(ApiResponse::success(product))
}

/// Create a new product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<ApiResponse<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    money::validate_amount(payload.price, "price")
        .map_err(|_| AppError::new(ErrorCode::ProductInvalidPrice))?;
    validate_gst_rate(payload.gst_rate)?;

    let product = Product {
        id: util::entity_id(),
        name: payload.name,
        price: payload.price,
        gst_rate: payload.gst_rate,
        is_active: payload.is_active.unwrap_or(true),
        created_at: util::now_millis(),
    };

    state
        .products
        .insert(product.clone())
        .map_err(|e| AppError::storage(e.to_string()))?;

    tracing::info!(product = %product.name, "Product created");
    Ok(ApiResponse::success(product))
}
