//! Stock lookup and the shared stock-adjustment primitives
//!
//! The lookup side assembles a [`StockSnapshot`] from concurrent fetches.
//! The adjustment side carries the find-or-create-or-update ledger step and
//! the product-level read-modify-write that the movement, batch and sale
//! services all sequence through.

use shared::models::{Product, ProductStore};
use shared::movement::DEFAULT_LOW_STOCK_THRESHOLD;
use shared::stock::{assemble_snapshot, StockSnapshot};

use crate::api::{ApiClient, NewProductStoreInput, UpdateProductInput, UpdateProductStoreInput};
use crate::error::{AppError, AppResult};

/// Read side of the inventory workflow
#[derive(Clone)]
pub struct StockService {
    api: ApiClient,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the product, its batches and the ledger rows concurrently and
    /// assemble a snapshot
    ///
    /// Any fetch failure is an error. Callers must block submission while no
    /// snapshot exists rather than treat missing data as unlimited stock.
    pub async fn lookup(
        &self,
        product_id: i64,
        store_id: Option<i64>,
    ) -> AppResult<StockSnapshot> {
        let (product, batches, relations) = tokio::try_join!(
            self.api.get_product(product_id),
            self.api.list_batches_for_product(product_id),
            self.api.list_product_stores(),
        )?;

        Ok(assemble_snapshot(&product, &batches, &relations, store_id))
    }

    /// Add `quantity` to the (product, store) ledger row, creating it with
    /// `current_stock = quantity` when the pair has no row yet
    pub(crate) async fn add_store_stock(
        &self,
        product_id: i64,
        store_id: i64,
        quantity: i32,
    ) -> AppResult<ProductStore> {
        match self.api.find_product_store(product_id, store_id).await? {
            Some(existing) => {
                self.api
                    .update_product_store(
                        existing.id,
                        &UpdateProductStoreInput {
                            current_stock: Some(existing.current_stock + quantity),
                            ..Default::default()
                        },
                    )
                    .await
            }
            None => {
                self.api
                    .create_product_store(&NewProductStoreInput {
                        product_id,
                        store_id,
                        current_stock: quantity,
                        min_stock_level: DEFAULT_LOW_STOCK_THRESHOLD,
                    })
                    .await
            }
        }
    }

    /// Subtract `quantity` from the (product, store) ledger row
    ///
    /// The row must exist; validation runs before any write, so a missing
    /// row here means another session changed the data underneath us.
    pub(crate) async fn remove_store_stock(
        &self,
        product_id: i64,
        store_id: i64,
        quantity: i32,
    ) -> AppResult<ProductStore> {
        let existing = self
            .api
            .find_product_store(product_id, store_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "la relación producto {} / tienda {}",
                    product_id, store_id
                ))
            })?;

        let next = (existing.current_stock - quantity).max(0);
        if existing.current_stock - quantity < 0 {
            tracing::warn!(
                product_id,
                store_id,
                current = existing.current_stock,
                quantity,
                "store stock would go negative; clamping to zero"
            );
        }

        self.api
            .update_product_store(
                existing.id,
                &UpdateProductStoreInput {
                    current_stock: Some(next),
                    ..Default::default()
                },
            )
            .await
    }

    /// Read-modify-write the product-level stock field by `delta`,
    /// clamping at zero
    pub(crate) async fn adjust_global_stock(
        &self,
        product_id: i64,
        delta: i32,
    ) -> AppResult<Product> {
        let product = self.api.get_product(product_id).await?;
        let next = (product.global_stock + delta).max(0);
        if product.global_stock + delta < 0 {
            tracing::warn!(
                product_id,
                current = product.global_stock,
                delta,
                "global stock would go negative; clamping to zero"
            );
        }

        self.api
            .update_product(
                product_id,
                &UpdateProductInput {
                    global_stock: Some(next),
                    ..Default::default()
                },
            )
            .await
    }
}
