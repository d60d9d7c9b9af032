//! Order Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Forward path: `NotProcessed → Processing → Shipped → Delivered`.
/// Side branches: customer-initiated `CancelRequested`/`ReturnRequested`
/// (pending admin approval) and the final `Cancelled`/`Returned` states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    NotProcessed,
    Processing,
    Shipped,
    Delivered,
    CancelRequested,
    Cancelled,
    ReturnRequested,
    Returned,
}

impl OrderStatus {
    /// Customer-initiated request pending admin approval
    pub fn is_request(&self) -> bool {
        matches!(self, Self::CancelRequested | Self::ReturnRequested)
    }

    /// No outgoing transitions once reached
    ///
    /// `Delivered` is terminal for the forward path but still allows a
    /// customer return request, so it is not terminal here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Returned)
    }

    /// Position on the forward path, if this status is on it
    pub fn forward_rank(&self) -> Option<u8> {
        match self {
            Self::NotProcessed => Some(0),
            Self::Processing => Some(1),
            Self::Shipped => Some(2),
            Self::Delivered => Some(3),
            _ => None,
        }
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cod,
    Online,
}

/// Payment status, confirmed externally by the payment gateway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Payment facts attached to an order (externally supplied, never computed)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

/// Customer snapshot taken at order creation
///
/// Deliberately denormalized: order history must not change retroactively
/// when the customer record is later edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyerSnapshot {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Order line item (immutable snapshot taken at order creation)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product reference (String ID)
    pub product_id: String,
    /// Product name snapshot
    pub name: String,
    /// Unit price in currency unit, tax-inclusive (0 for gift lines)
    pub unit_price: f64,
    pub quantity: i32,
    /// GST slab percent (0, 5, 12, 18)
    pub gst_rate: i32,
    /// Gift line granted by a gift-type coupon
    #[serde(default)]
    pub is_gift: bool,
}

/// Order totals as computed by the checkout engine
///
/// Invariant: `total_paid == subtotal + shipping_fee - discount`, all ≥ 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub discount: f64,
    pub total_paid: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Human-readable order reference, unique
    pub order_number: String,
    pub buyer: BuyerSnapshot,
    /// Line items, immutable once the order is placed
    pub lines: Vec<OrderLine>,
    /// Sum of unit_price * quantity over lines
    pub subtotal: f64,
    pub shipping_fee: f64,
    /// Discount amount from an applied coupon, or zero
    pub discount: f64,
    /// subtotal + shipping_fee - discount, never negative
    pub total_paid: f64,
    /// Coupon code applied at checkout, uppercase
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    /// False exactly while status is a `*Requested` variant
    pub is_approved_by_admin: bool,
    pub cancel_reason: Option<String>,
    pub return_reason: Option<String>,
    /// Logistics metadata, settable only by admin
    pub awb_number: Option<String>,
    pub tracking_link: Option<String>,
    /// True once an invoice artifact has been generated
    pub is_invoiced: bool,
    pub payment: PaymentInfo,
    /// Optimistic concurrency counter, bumped on every write
    pub version: u64,
    pub created_at: Timestamp,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Cart line as submitted by the checkout flow; price and name are
/// snapshotted server-side from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineInput {
    pub product_id: String,
    pub quantity: i32,
}

/// Place order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub buyer: BuyerSnapshot,
    pub lines: Vec<CartLineInput>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Admin status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Customer cancel/return request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub reason: String,
}

/// Admin logistics payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsUpdate {
    #[serde(default)]
    pub awb_number: Option<String>,
    #[serde(default)]
    pub tracking_link: Option<String>,
}

/// Payment status payload (facts relayed from the gateway)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(OrderStatus::CancelRequested.is_request());
        assert!(OrderStatus::ReturnRequested.is_request());
        assert!(!OrderStatus::Cancelled.is_request());

        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Returned.is_terminal());
        assert!(!OrderStatus::Delivered.is_terminal());
    }

    #[test]
    fn test_forward_rank_ordering() {
        assert!(OrderStatus::NotProcessed.forward_rank() < OrderStatus::Processing.forward_rank());
        assert!(OrderStatus::Shipped.forward_rank() < OrderStatus::Delivered.forward_rank());
        assert_eq!(OrderStatus::CancelRequested.forward_rank(), None);
    }

    #[test]
    fn test_status_serde_tags() {
        let json = serde_json::to_string(&OrderStatus::CancelRequested).unwrap();
        assert_eq!(json, "\"CANCEL_REQUESTED\"");
        let status: OrderStatus = serde_json::from_str("\"NOT_PROCESSED\"").unwrap();
        assert_eq!(status, OrderStatus::NotProcessed);
    }
}
