//! Inventory reports computed client-side from fetched data
//!
//! The builders are pure so they can be tested without a backend; the
//! service wraps them with the concurrent fetches and CSV export.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use shared::models::{Product, ProductBatch, ProductStore, Store};
use shared::movement::{DEFAULT_LOW_STOCK_THRESHOLD, EXPIRY_WARNING_DAYS};

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};

/// A (product, store) pair at or below its reorder threshold
#[derive(Debug, Clone, Serialize)]
pub struct LowStockEntry {
    pub product_id: i64,
    pub product_name: String,
    /// Absent for products tracked only at the product level
    pub store_id: Option<i64>,
    pub store_name: Option<String>,
    pub current_stock: i32,
    pub threshold: i32,
}

/// An active batch with stock that is expired or expiring soon
#[derive(Debug, Clone, Serialize)]
pub struct ExpiringBatchEntry {
    pub batch_id: i64,
    pub batch_code: String,
    pub product_name: String,
    pub expiration_date: NaiveDate,
    pub current_quantity: i32,
    pub expired: bool,
}

/// Per-store stock totals
#[derive(Debug, Clone, Serialize)]
pub struct StoreInventorySummary {
    pub store_id: i64,
    pub store_name: String,
    pub total_units: i64,
    pub product_count: i64,
}

/// Every ledger row at/below its own threshold, plus products at/below the
/// default threshold that have no ledger rows at all
pub fn build_low_stock_report(
    products: &[Product],
    stores: &[Store],
    relations: &[ProductStore],
) -> Vec<LowStockEntry> {
    let mut entries = Vec::new();

    for relation in relations {
        if relation.current_stock > relation.min_stock_level {
            continue;
        }
        let Some(product) = products.iter().find(|p| p.id == relation.product_id) else {
            continue;
        };
        entries.push(LowStockEntry {
            product_id: product.id,
            product_name: product.name.clone(),
            store_id: Some(relation.store_id),
            store_name: stores
                .iter()
                .find(|s| s.id == relation.store_id)
                .map(|s| s.name.clone()),
            current_stock: relation.current_stock,
            threshold: relation.min_stock_level,
        });
    }

    for product in products.iter().filter(|p| p.is_active) {
        let has_rows = relations.iter().any(|r| r.product_id == product.id);
        if !has_rows && product.global_stock <= DEFAULT_LOW_STOCK_THRESHOLD {
            entries.push(LowStockEntry {
                product_id: product.id,
                product_name: product.name.clone(),
                store_id: None,
                store_name: None,
                current_stock: product.global_stock,
                threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            });
        }
    }

    entries
}

/// Active batches with stock that are expired or expire within
/// `window_days`, soonest first
pub fn build_expiring_batches_report(
    products: &[Product],
    batches: &[ProductBatch],
    today: NaiveDate,
    window_days: i64,
) -> Vec<ExpiringBatchEntry> {
    let mut entries: Vec<ExpiringBatchEntry> = batches
        .iter()
        .filter(|b| b.has_stock())
        .filter(|b| b.is_expired(today) || b.expires_within(today, window_days))
        .map(|b| ExpiringBatchEntry {
            batch_id: b.id,
            batch_code: b.batch_code.clone(),
            product_name: products
                .iter()
                .find(|p| p.id == b.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            expiration_date: b.expiration_date,
            current_quantity: b.current_quantity,
            expired: b.is_expired(today),
        })
        .collect();

    entries.sort_by_key(|e| e.expiration_date);
    entries
}

/// Per-store totals of ledger stock
pub fn build_store_summary(stores: &[Store], relations: &[ProductStore]) -> Vec<StoreInventorySummary> {
    stores
        .iter()
        .map(|store| {
            let rows: Vec<&ProductStore> = relations
                .iter()
                .filter(|r| r.store_id == store.id)
                .collect();
            StoreInventorySummary {
                store_id: store.id,
                store_name: store.name.clone(),
                total_units: rows.iter().map(|r| i64::from(r.current_stock)).sum(),
                product_count: rows.len() as i64,
            }
        })
        .collect()
}

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    api: ApiClient,
}

impl ReportingService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn low_stock_report(&self) -> AppResult<Vec<LowStockEntry>> {
        let (products, stores, relations) = tokio::try_join!(
            self.api.list_products(),
            self.api.list_stores(),
            self.api.list_product_stores(),
        )?;
        Ok(build_low_stock_report(&products, &stores, &relations))
    }

    pub async fn expiring_batches_report(&self) -> AppResult<Vec<ExpiringBatchEntry>> {
        let (products, batches) =
            tokio::try_join!(self.api.list_products(), self.api.list_batches())?;
        Ok(build_expiring_batches_report(
            &products,
            &batches,
            Utc::now().date_naive(),
            EXPIRY_WARNING_DAYS,
        ))
    }

    pub async fn store_inventory_summary(&self) -> AppResult<Vec<StoreInventorySummary>> {
        let (stores, relations) =
            tokio::try_join!(self.api.list_stores(), self.api.list_product_stores())?;
        Ok(build_store_summary(&stores, &relations))
    }

    /// Serialize report rows to a CSV string for download
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
