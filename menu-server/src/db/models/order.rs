//! Order Model
//!
//! Line items are snapshotted from the menu at order time (name, price,
//! combo metadata). Later menu edits never change a stored order.

use super::serde_helpers;
use super::{AccountId, ComboItem, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

/// Payment method chosen by the customer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
}

/// Snapshotted order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_combo: bool,
    #[serde(default)]
    pub combo_items: Vec<ComboItem>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub account: AccountId,
    pub table_number: i32,
    pub customer_name: String,
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub created_at: i64,
}

/// One requested line of a new order (resolved against the live menu)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineCreate {
    /// Menu item id ("menu_item:xyz")
    pub item: String,
    pub quantity: i32,
}

/// Create order payload (public QR endpoint)
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct OrderCreate {
    #[validate(range(min = 1))]
    pub table_number: i32,
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[validate(length(min = 1))]
    pub items: Vec<OrderLineCreate>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Update order status payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Update order payment payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPaymentUpdate {
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}
