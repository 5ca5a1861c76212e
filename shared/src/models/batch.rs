//! Production batch models

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dated production lot of a product, optionally pinned to one store
///
/// Created with `current_quantity == initial_quantity`; sales and movements
/// only ever decrement it. A batch with no store lives in the central
/// warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBatch {
    pub id: i64,
    /// Human-readable code (e.g. "CHOC-2025-0042"). Uniqueness is checked
    /// client-side only; the server is the authority.
    pub batch_code: String,
    pub product_id: i64,
    /// Absent means the central warehouse.
    pub store_id: Option<i64>,
    pub production_date: NaiveDate,
    pub expiration_date: NaiveDate,
    /// Fixed at creation; `current_quantity` never exceeds it.
    pub initial_quantity: i32,
    pub current_quantity: i32,
    pub batch_cost: Decimal,
    pub is_active: bool,
}

impl ProductBatch {
    /// Whether the batch still has sellable stock
    pub fn has_stock(&self) -> bool {
        self.is_active && self.current_quantity > 0
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date < today
    }

    /// Not yet expired, but expiring within `days` from `today`
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        !self.is_expired(today) && self.expiration_date <= today + Duration::days(days)
    }
}
