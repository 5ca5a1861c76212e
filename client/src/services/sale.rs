//! Sale recording with stock deduction
//!
//! A sale consumes stock the same way an OUT movement does: batch quantity
//! when a line names a batch, the store's ledger row, and the product-level
//! field — applied sequentially after the sale POST succeeds, with no
//! rollback. Deleting a sale does not restock.

use chrono::Utc;
use rust_decimal::Decimal;

use shared::models::{NewSale, NewSaleDetail, Sale};
use shared::validation::clamp_current_quantity;

use crate::api::{ApiClient, UpdateBatchInput};
use crate::error::{AppError, AppResult};
use crate::services::stock::StockService;

/// Compute `(subtotal, total)` for a set of sale lines
///
/// `subtotal = sum(quantity × unit_price)`, `total = subtotal − discount`,
/// never below zero.
pub fn compute_sale_totals(details: &[NewSaleDetail], discount: Decimal) -> (Decimal, Decimal) {
    let subtotal: Decimal = details
        .iter()
        .map(|line| Decimal::from(line.quantity) * line.unit_price)
        .sum();
    let total = (subtotal - discount).max(Decimal::ZERO);
    (subtotal, total)
}

#[derive(Clone)]
pub struct SaleService {
    api: ApiClient,
    stock: StockService,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(api: ApiClient) -> Self {
        let stock = StockService::new(api.clone());
        Self { api, stock }
    }

    /// Record a sale and deduct its stock
    ///
    /// Totals are recomputed here regardless of what the caller filled in;
    /// each line is checked against a fresh snapshot before the POST.
    pub async fn create(&self, mut input: NewSale) -> AppResult<Sale> {
        if input.user_id <= 0 {
            return Err(AppError::Validation {
                field: "user".to_string(),
                message: "acting user is not resolved".to_string(),
                message_es: "Usuario no válido. Vuelva a iniciar sesión.".to_string(),
            });
        }
        if input.details.is_empty() {
            return Err(AppError::Validation {
                field: "details".to_string(),
                message: "a sale needs at least one line".to_string(),
                message_es: "Agregue al menos un producto a la venta.".to_string(),
            });
        }
        for line in &input.details {
            if line.quantity <= 0 {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: "line quantity must be positive".to_string(),
                    message_es: "La cantidad de cada línea debe ser un entero positivo."
                        .to_string(),
                });
            }
            if line.unit_price < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "unitPrice".to_string(),
                    message: "unit price cannot be negative".to_string(),
                    message_es: "El precio unitario no puede ser negativo.".to_string(),
                });
            }
        }

        // Fresh stock check per line, immediately before the write.
        let today = Utc::now().date_naive();
        for line in &input.details {
            if let Some(batch_id) = line.batch_id {
                let batch = self.api.get_batch(batch_id).await?;
                if batch.is_expired(today) {
                    return Err(AppError::Validation {
                        field: "batchId".to_string(),
                        message: format!("batch {} is expired", batch.batch_code),
                        message_es: format!("El lote {} está vencido.", batch.batch_code),
                    });
                }
                if line.quantity > batch.current_quantity {
                    return Err(AppError::InsufficientStock(format!(
                        "Stock insuficiente en el lote {}: disponible {}.",
                        batch.batch_code, batch.current_quantity
                    )));
                }
            } else {
                let snapshot = self
                    .stock
                    .lookup(line.product_id, Some(input.store_id))
                    .await?;
                if line.quantity > snapshot.store_stock {
                    return Err(AppError::InsufficientStock(format!(
                        "Stock insuficiente: disponible {}.",
                        snapshot.store_stock
                    )));
                }
            }
        }

        let (subtotal, total) = compute_sale_totals(&input.details, input.discount);
        input.subtotal = subtotal;
        input.total = total;

        let sale = self.api.create_sale(&input).await?;

        tracing::info!(
            sale_id = sale.id,
            store_id = sale.store_id,
            lines = sale.details.len(),
            "sale recorded, applying stock deductions"
        );

        for line in &input.details {
            if let Err(err) = self.deduct_line(line, input.store_id).await {
                tracing::error!(
                    sale_id = sale.id,
                    product_id = line.product_id,
                    error = %err,
                    "stock deduction failed after sale was recorded"
                );
                return Err(AppError::PartiallyApplied(format!(
                    "venta {}: falló la deducción de stock del producto {} ({})",
                    sale.id, line.product_id, err
                )));
            }
        }

        Ok(sale)
    }

    async fn deduct_line(&self, line: &NewSaleDetail, store_id: i64) -> AppResult<()> {
        if let Some(batch_id) = line.batch_id {
            let batch = self.api.get_batch(batch_id).await?;
            let next = clamp_current_quantity(
                batch.current_quantity - line.quantity,
                batch.initial_quantity,
            );
            self.api
                .update_batch(
                    batch_id,
                    &UpdateBatchInput {
                        current_quantity: Some(next),
                        ..Default::default()
                    },
                )
                .await?;
        }

        // The ledger row may not exist when the store sells from the
        // unassigned pool; only the product-level field tracks that stock.
        if self
            .api
            .find_product_store(line.product_id, store_id)
            .await?
            .is_some()
        {
            self.stock
                .remove_store_stock(line.product_id, store_id, line.quantity)
                .await?;
        }

        self.stock
            .adjust_global_stock(line.product_id, -line.quantity)
            .await?;

        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<Sale>> {
        self.api.list_sales().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Sale> {
        self.api.get_sale(id).await
    }

    /// Delete a sale. Stock is NOT restored; corrections go through an IN
    /// movement so the audit trail stays complete.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.api.delete_sale(id).await
    }
}
