//! Inventory movement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory movement types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Replenishment into a store or the warehouse
    In,
    /// Depletion (sale, damage, expiration)
    Out,
    /// Move between two stores
    Transfer,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "IN",
            MovementType::Out => "OUT",
            MovementType::Transfer => "TRANSFER",
        }
    }
}

/// Reason codes accepted by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementReason {
    Production,
    Purchase,
    Sale,
    Damage,
    Transfer,
    Adjustment,
    Expiration,
    Other,
}

impl MovementReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementReason::Production => "PRODUCTION",
            MovementReason::Purchase => "PURCHASE",
            MovementReason::Sale => "SALE",
            MovementReason::Damage => "DAMAGE",
            MovementReason::Transfer => "TRANSFER",
            MovementReason::Adjustment => "ADJUSTMENT",
            MovementReason::Expiration => "EXPIRATION",
            MovementReason::Other => "OTHER",
        }
    }
}

/// An append-only inventory audit record
///
/// `from_store_id`/`to_store_id` meaning depends on the type: IN uses only
/// the destination, OUT only the origin, TRANSFER both. Never mutated once
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMovement {
    pub id: i64,
    pub movement_type: MovementType,
    pub product_id: i64,
    pub batch_id: Option<i64>,
    pub from_store_id: Option<i64>,
    pub to_store_id: Option<i64>,
    pub quantity: i32,
    pub reason: MovementReason,
    pub user_id: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a movement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryMovement {
    pub movement_type: MovementType,
    pub product_id: i64,
    pub batch_id: Option<i64>,
    pub from_store_id: Option<i64>,
    pub to_store_id: Option<i64>,
    pub quantity: i32,
    pub reason: MovementReason,
    pub user_id: i64,
    pub notes: Option<String>,
}
