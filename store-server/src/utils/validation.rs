//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits are
//! chosen for reasonable UX on names, addresses, and free-text reasons.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: products, coupons, buyer names
pub const MAX_NAME_LEN: usize = 200;

/// Free-text reasons and notes (cancel reason, return reason)
pub const MAX_REASON_LEN: usize = 500;

/// Short identifiers: phone numbers, AWB numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / tracking links
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

// ── Validation helpers (checkout path) ──────────────────────────────

use crate::checkout::CheckoutError;

/// Validate a required string on the checkout path (non-empty + max length).
pub fn validate_checkout_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> Result<(), CheckoutError> {
    if value.trim().is_empty() {
        return Err(CheckoutError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > max_len {
        return Err(CheckoutError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
