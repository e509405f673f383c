//! Row types for the managed relational store.
//!
//! These mirror the tables the managed service exposes through its row API.
//! Joined reads deserialize the embedded resource under the table's name
//! (e.g. `products`), renamed here to a singular field.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row of the `carts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart row joined with the product columns cart reads and checkout need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: Uuid,
    pub quantity: i32,
    pub product_id: i64,
    #[serde(rename = "products")]
    pub product: CartProduct,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Always computed server-side at checkout, never client-supplied.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct NewOrderItem {
    pub order_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
    /// Unit price snapshot, decoupled from later product price changes.
    pub price_at_purchase: Decimal,
}

/// Order history row with embedded line items and product names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistory {
    pub id: Uuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderHistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryItem {
    pub quantity: i32,
    pub price_at_purchase: Decimal,
    #[serde(rename = "products")]
    pub product: OrderedProduct,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
