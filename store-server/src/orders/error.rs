use crate::checkout::CheckoutError;
use crate::store::StoreError;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Order lifecycle errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("order not found: {0}")]
    NotFound(String),

    #[error("status change {from:?} -> {to:?} is not permitted")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("a reason is required to enter {0:?}")]
    ReasonRequired(OrderStatus),

    #[error("order was modified concurrently, retry with fresh state")]
    Conflict,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => OrderError::NotFound(what),
            StoreError::VersionConflict(_) => OrderError::Conflict,
            StoreError::Duplicate(what) => {
                tracing::error!(error = %what, "Unexpected duplicate during order write");
                OrderError::Storage(format!("duplicate: {}", what))
            }
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::Validation(_) => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
            }
            OrderError::NotFound(_) => AppError::with_message(ErrorCode::OrderNotFound, message),
            OrderError::InvalidTransition { from, to } => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, message)
                    .with_detail("from", format!("{:?}", from))
                    .with_detail("to", format!("{:?}", to))
            }
            OrderError::ReasonRequired(_) => {
                AppError::with_message(ErrorCode::ReasonRequired, message)
            }
            OrderError::Conflict => AppError::new(ErrorCode::StatusConflict),
            OrderError::Checkout(inner) => inner.into(),
            OrderError::Storage(msg) => AppError::storage(msg),
        }
    }
}
