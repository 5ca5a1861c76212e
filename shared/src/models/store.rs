//! Store and per-store stock models

use serde::{Deserialize, Serialize};

/// A physical point of sale or storage
///
/// Leaf entity; the inventory workflow never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    /// Free-form type descriptor from the backend (e.g. "FISICA", "BODEGA")
    #[serde(rename = "typeStore")]
    pub store_type: String,
    pub is_active: bool,
}

/// The per-store stock ledger row for a product
///
/// At most one row exists per (product, store) pair. The backend has no
/// upsert endpoint, so writers search first, then create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStore {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub current_stock: i32,
    /// Reorder threshold for this pair (a genuine threshold, unlike the
    /// product-level field the API calls `minStockLevel`).
    pub min_stock_level: i32,
}
