//! Stock snapshot assembly
//!
//! The read side of the inventory workflow: given the product record, its
//! batches and the per-store ledger rows, build the consistent in-memory
//! view the validator and planner consume. Assembly is pure; the concurrent
//! fetching lives in the client crate.

use serde::{Deserialize, Serialize};

use crate::models::{Product, ProductBatch, ProductStore};

/// A consistent view of stock for one product, optionally scoped to a store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub product_id: i64,
    /// Store context the snapshot was taken for: the origin for OUT and
    /// TRANSFER drafts, the destination for IN.
    pub store_id: Option<i64>,
    /// Product-level stock across all locations
    pub product_stock: i32,
    /// Stock at the store in context; falls back to `product_stock` when no
    /// store is given or no ledger row exists for the pair.
    pub store_stock: i32,
    /// The (product, store) ledger row, when one exists
    pub store_relation: Option<ProductStore>,
    /// Active batches with remaining stock, scoped to the store when given
    pub available_batches: Vec<ProductBatch>,
}

impl StockSnapshot {
    /// Quantity available to an OUT/TRANSFER draft: the batch's remaining
    /// stock when a specific batch is in use, the store stock otherwise.
    pub fn available_for(&self, batch: Option<&ProductBatch>) -> i32 {
        match batch {
            Some(b) => b.current_quantity,
            None => self.store_stock,
        }
    }

    /// Low-stock threshold in effect: the relation's reorder level when a
    /// ledger row is in context, the fixed default otherwise.
    pub fn low_stock_threshold(&self) -> i32 {
        self.store_relation
            .as_ref()
            .map(|r| r.min_stock_level)
            .unwrap_or(crate::movement::DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Build a snapshot from fetched records. Never mutates its inputs.
pub fn assemble_snapshot(
    product: &Product,
    batches: &[ProductBatch],
    relations: &[ProductStore],
    store_id: Option<i64>,
) -> StockSnapshot {
    let available_batches: Vec<ProductBatch> = batches
        .iter()
        .filter(|b| b.product_id == product.id && b.has_stock())
        .filter(|b| store_id.is_none() || b.store_id == store_id)
        .cloned()
        .collect();

    let store_relation = store_id.and_then(|sid| {
        relations
            .iter()
            .find(|r| r.product_id == product.id && r.store_id == sid)
            .cloned()
    });

    let store_stock = store_relation
        .as_ref()
        .map(|r| r.current_stock)
        .unwrap_or(product.global_stock);

    StockSnapshot {
        product_id: product.id,
        store_id,
        product_stock: product.global_stock,
        store_stock,
        store_relation,
        available_batches,
    }
}
