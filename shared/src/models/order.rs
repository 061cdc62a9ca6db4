//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment method reported by the checkout step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            other => Err(format!("unsupported payment method: {other}")),
        }
    }
}

/// Checkout payload: the product bought plus the confirmation handed over by
/// the payment step
///
/// `payment_method` stays a string so an unknown method is reported as a
/// payment error instead of a JSON rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub product_id: i64,
    pub quantity: i32,
    /// Total charged (price x quantity)
    pub amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
    pub delivery_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: i64,
    pub message: String,
}

/// Order row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
    pub delivery_address: String,
    pub payment_status: String,
    /// Creation time (Unix millis)
    pub created_at: i64,
}

/// Order line row; `unit_price` is a snapshot taken at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub appliance_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Order with its lines (lookup by transaction reference)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
}

/// Line of a user's order history, joined with the product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryItem {
    pub item_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    pub appliance_id: i64,
    pub appliance_name: String,
    pub appliance_type: String,
    pub appliance_image: Option<String>,
}

/// One order of a user's order history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: i64,
    pub order_date: i64,
    pub total_amount: f64,
    pub payment_status: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub delivery_address: String,
    pub items: Vec<OrderHistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryResponse {
    pub orders: Vec<OrderSummary>,
}

/// Admin order management row: one order line with its order, product and buyer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminOrderLine {
    pub id: i64,
    pub order_id: i64,
    pub appliance_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    pub appliance_name: String,
    pub appliance_type: String,
    pub photo_path: Option<String>,
    pub user_email: String,
    pub user_id: i64,
    pub created_at: i64,
    pub transaction_id: String,
    pub payment_status: String,
    pub payment_method: String,
    pub delivery_address: String,
    pub total_amount: f64,
}
