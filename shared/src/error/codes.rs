//! Unified error codes for the storefront backend
//!
//! This module defines all error codes used across the server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon & payment errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4002,
    /// Status change not permitted by the order lifecycle
    InvalidStatusTransition = 4003,
    /// Cancel/return reason missing
    ReasonRequired = 4004,
    /// Order was updated concurrently; retry with fresh state
    StatusConflict = 4005,

    // ==================== 5xxx: Coupon & Payment ====================
    /// Coupon not found
    CouponNotFound = 5001,
    /// Coupon expiry date has passed
    CouponExpired = 5002,
    /// Coupon usage limit reached
    CouponExhausted = 5003,
    /// Cart subtotal below the coupon minimum purchase
    CouponMinPurchase = 5004,
    /// Coupon code already exists
    CouponNameExists = 5005,
    /// Coupon redemption lost a concurrent race; retry
    CouponRedemptionConflict = 5006,
    /// Gift coupon is missing its gift product
    CouponGiftProductRequired = 5007,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product price is invalid
    ProductInvalidPrice = 6002,
    /// GST rate is not one of the supported slabs
    InvalidGstRate = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no items",
            Self::InvalidStatusTransition => "Status change not permitted",
            Self::ReasonRequired => "A reason is required",
            Self::StatusConflict => "Order was updated concurrently, retry",

            Self::CouponNotFound => "Coupon not found",
            Self::CouponExpired => "Coupon has expired",
            Self::CouponExhausted => "Coupon usage limit reached",
            Self::CouponMinPurchase => "Minimum purchase not met",
            Self::CouponNameExists => "Coupon code already exists",
            Self::CouponRedemptionConflict => "Coupon redemption conflict, retry",
            Self::CouponGiftProductRequired => "Gift coupon requires a gift product",

            Self::ProductNotFound => "Product not found",
            Self::ProductInvalidPrice => "Product price is invalid",
            Self::InvalidGstRate => "Unsupported GST rate",

            Self::InternalError => "Internal server error",
            Self::StorageError => "Storage error",
        }
    }

    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::CouponNotFound | Self::ProductNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict (concurrent updates, duplicates)
            Self::AlreadyExists
            | Self::CouponNameExists
            | Self::StatusConflict
            | Self::CouponRedemptionConflict => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (expected user-facing outcomes)
            Self::CouponExpired
            | Self::CouponExhausted
            | Self::CouponMinPurchase
            | Self::InvalidStatusTransition => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 value does not map to a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderEmpty,
            4003 => Self::InvalidStatusTransition,
            4004 => Self::ReasonRequired,
            4005 => Self::StatusConflict,

            5001 => Self::CouponNotFound,
            5002 => Self::CouponExpired,
            5003 => Self::CouponExhausted,
            5004 => Self::CouponMinPurchase,
            5005 => Self::CouponNameExists,
            5006 => Self::CouponRedemptionConflict,
            5007 => Self::CouponGiftProductRequired,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductInvalidPrice,
            6003 => Self::InvalidGstRate,

            9001 => Self::InternalError,
            9002 => Self::StorageError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::OrderNotFound,
            ErrorCode::StatusConflict,
            ErrorCode::CouponExhausted,
            ErrorCode::ProductNotFound,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
        assert_eq!(ErrorCode::CouponExpired.to_string(), "E5002");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::StatusConflict.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::CouponExhausted.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::ReasonRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
