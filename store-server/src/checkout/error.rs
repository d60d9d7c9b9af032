use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Checkout evaluation errors
///
/// All variants are expected, user-facing outcomes the checkout flow can
/// display and the caller can recover from; none is a system fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("{0}")]
    Validation(String),

    #[error("coupon not found: {0}")]
    CouponNotFound(String),

    #[error("coupon has expired")]
    CouponExpired,

    #[error("coupon usage limit reached")]
    CouponExhausted,

    #[error("minimum purchase not met, add {shortfall:.2} more")]
    MinimumPurchaseNotMet { shortfall: f64 },

    #[error("gift coupon has no gift product configured")]
    GiftProductMissing,

    #[error("unsupported GST rate: {0}")]
    InvalidGstRate(i32),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("cart has no items")]
    EmptyCart,
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        let message = err.to_string();
        match err {
            CheckoutError::Validation(_) => AppError::with_message(ErrorCode::ValidationFailed, message),
            CheckoutError::CouponNotFound(code) => {
                AppError::with_message(ErrorCode::CouponNotFound, message).with_detail("coupon", code)
            }
            CheckoutError::CouponExpired => AppError::new(ErrorCode::CouponExpired),
            CheckoutError::CouponExhausted => AppError::new(ErrorCode::CouponExhausted),
            CheckoutError::MinimumPurchaseNotMet { shortfall } => {
                AppError::with_message(ErrorCode::CouponMinPurchase, message)
                    .with_detail("shortfall", shortfall)
            }
            CheckoutError::GiftProductMissing => AppError::new(ErrorCode::CouponGiftProductRequired),
            CheckoutError::InvalidGstRate(rate) => {
                AppError::with_message(ErrorCode::InvalidGstRate, message).with_detail("rate", rate)
            }
            CheckoutError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message).with_detail("product", id)
            }
            CheckoutError::EmptyCart => AppError::new(ErrorCode::OrderEmpty),
        }
    }
}
