//! Common types for the shared crate
//!
//! Utility types used across the workspace

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Currency amount in rupees, 2 decimal places after rounding
pub type Amount = f64;
