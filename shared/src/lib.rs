//! Shared types for the storefront backend
//!
//! Common types used across the workspace: domain models, unified error
//! codes and response structures, and utility types.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
