//! Batch lifecycle: creation consumes product-level stock; edits are clamped
//!
//! Creating a batch moves `initial_quantity` units out of the unassigned
//! pool (the product-level field) and, when a store is assigned, into that
//! store's ledger row. Edits never cascade into Product or ProductStore.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::ProductBatch;
use shared::validation::{
    clamp_current_quantity, is_batch_code_taken, validate_batch_code, validate_expiration_date,
    validate_initial_quantity, validate_production_date,
};

use crate::api::{ApiClient, NewBatchInput, UpdateBatchInput};
use crate::error::{AppError, AppResult};
use crate::services::stock::StockService;

/// Input for registering a new batch
///
/// `current_quantity` is deliberately absent: it is forced equal to
/// `initial_quantity` on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchInput {
    pub batch_code: String,
    pub product_id: i64,
    pub store_id: Option<i64>,
    pub production_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub initial_quantity: i32,
    pub batch_cost: Decimal,
}

#[derive(Clone)]
pub struct BatchService {
    api: ApiClient,
    stock: StockService,
}

impl BatchService {
    /// Create a new BatchService instance
    pub fn new(api: ApiClient) -> Self {
        let stock = StockService::new(api.clone());
        Self { api, stock }
    }

    /// Register a batch and apply its stock effects
    ///
    /// The create POST comes first; the stock adjustments that follow are
    /// sequential and not rolled back when one of them fails.
    pub async fn create(&self, input: CreateBatchInput) -> AppResult<ProductBatch> {
        let today = Utc::now().date_naive();

        if let Err(msg) = validate_batch_code(&input.batch_code) {
            return Err(AppError::Validation {
                field: "batchCode".to_string(),
                message: msg.to_string(),
                message_es: "El código de lote debe tener entre 3 y 50 caracteres.".to_string(),
            });
        }
        if let Err(msg) = validate_production_date(input.production_date, today) {
            return Err(AppError::Validation {
                field: "productionDate".to_string(),
                message: msg.to_string(),
                message_es: "La fecha de producción no puede ser futura.".to_string(),
            });
        }
        if let Err(msg) =
            validate_expiration_date(input.production_date, input.expiration_date, today)
        {
            return Err(AppError::Validation {
                field: "expirationDate".to_string(),
                message: msg.to_string(),
                message_es: "La fecha de vencimiento debe ser posterior a la de producción y no estar vencida.".to_string(),
            });
        }
        if let Err(msg) = validate_initial_quantity(input.initial_quantity) {
            return Err(AppError::Validation {
                field: "initialQuantity".to_string(),
                message: msg.to_string(),
                message_es: "La cantidad inicial debe ser un entero entre 1 y 10,000.".to_string(),
            });
        }

        // Advisory uniqueness check against the currently-loaded batches.
        let existing = self.api.list_batches().await?;
        if is_batch_code_taken(&input.batch_code, &existing) {
            return Err(AppError::DuplicateEntry(format!(
                "un lote con el código {}",
                input.batch_code.trim()
            )));
        }

        let created = self
            .api
            .create_batch(&NewBatchInput {
                batch_code: input.batch_code.trim().to_string(),
                product_id: input.product_id,
                store_id: input.store_id,
                production_date: input.production_date,
                expiration_date: input.expiration_date,
                initial_quantity: input.initial_quantity,
                current_quantity: input.initial_quantity,
                batch_cost: input.batch_cost,
            })
            .await?;

        tracing::info!(
            batch_id = created.id,
            batch_code = %created.batch_code,
            product_id = created.product_id,
            initial_quantity = created.initial_quantity,
            "batch registered, applying stock adjustments"
        );

        // The new lot came out of the unassigned pool.
        if let Err(err) = self
            .stock
            .adjust_global_stock(input.product_id, -input.initial_quantity)
            .await
        {
            return Err(AppError::PartiallyApplied(format!(
                "lote {} creado, ajuste de stock del producto falló ({})",
                created.id, err
            )));
        }

        if let Some(store_id) = input.store_id {
            if let Err(err) = self
                .stock
                .add_store_stock(input.product_id, store_id, input.initial_quantity)
                .await
            {
                return Err(AppError::PartiallyApplied(format!(
                    "lote {} creado, ajuste de stock de la tienda falló ({})",
                    created.id, err
                )));
            }
        }

        Ok(created)
    }

    /// Edit a batch
    ///
    /// `batch_code` and `product_id` are immutable; `current_quantity` is
    /// clamped to `[0, initial_quantity]`. Edits never touch Product or
    /// ProductStore.
    pub async fn update(&self, batch_id: i64, input: UpdateBatchInput) -> AppResult<ProductBatch> {
        let existing = self.api.get_batch(batch_id).await?;

        let current_quantity = input
            .current_quantity
            .map(|q| clamp_current_quantity(q, existing.initial_quantity));

        self.api
            .update_batch(
                batch_id,
                &UpdateBatchInput {
                    current_quantity,
                    ..input
                },
            )
            .await
    }

    pub async fn delete(&self, batch_id: i64) -> AppResult<()> {
        self.api.delete_batch(batch_id).await
    }
}
