//! Sale and sale detail models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price tier applied to a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    Retail,
    Wholesale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Other,
}

/// A recorded sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub client_id: Option<i64>,
    pub store_id: i64,
    pub user_id: i64,
    pub sale_type: SaleType,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub details: Vec<SaleDetail>,
    pub created_at: DateTime<Utc>,
}

/// One line of a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub batch_id: Option<i64>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Payload for recording a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub client_id: Option<i64>,
    pub store_id: i64,
    pub user_id: i64,
    pub sale_type: SaleType,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub details: Vec<NewSaleDetail>,
}

/// One line of a sale being recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleDetail {
    pub product_id: i64,
    pub batch_id: Option<i64>,
    pub quantity: i32,
    pub unit_price: Decimal,
}
