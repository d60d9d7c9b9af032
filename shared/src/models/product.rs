//! Product Model
//!
//! Catalog-lite: just enough product data for checkout to snapshot
//! name/price/GST into order lines and to resolve gift coupons.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Selling price in currency unit, tax-inclusive
    pub price: f64,
    /// GST slab percent (0, 5, 12, 18)
    pub gst_rate: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub gst_rate: i32,
    #[serde(default)]
    pub is_active: Option<bool>,
}
