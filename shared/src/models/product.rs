//! Product and category models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A product in the Chocorocks catalog
///
/// The backend still serves the product-level quantity under its historical
/// `minStockLevel` name; here it is `global_stock`, the stock across all
/// stores and the central warehouse. The true reorder threshold lives on
/// [`ProductStore`](super::ProductStore), one per (product, store) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Flavor descriptor (e.g. "chocolate amargo 70%")
    pub flavor: Option<String>,
    /// Size or presentation descriptor (e.g. "caja 250 g")
    pub size: Option<String>,
    pub category_id: i64,
    pub production_cost: Decimal,
    pub wholesale_price: Decimal,
    pub retail_price: Decimal,
    /// Product-level stock. Assumed non-negative; the client clamps writes.
    #[serde(rename = "minStockLevel")]
    pub global_stock: i32,
    pub is_active: bool,
}
