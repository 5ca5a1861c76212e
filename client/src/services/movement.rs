//! Movement submission: validate against a fresh snapshot, then apply the
//! execution plan in order
//!
//! The writes are sequential and non-transactional. A failure after the
//! audit record is created leaves earlier steps applied — there is no
//! compensation. Callers must treat [`AppError::PartiallyApplied`] as
//! "movement may have partially applied" and re-run a stock lookup instead
//! of retrying blindly.

use shared::models::{InventoryMovement, MovementType};
use shared::movement::{plan_movement, validate_movement, MovementDraft, MovementStep};

use crate::api::{ApiClient, UpdateBatchInput};
use crate::error::{AppError, AppResult};
use crate::services::stock::StockService;

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct MovementReceipt {
    pub movement: InventoryMovement,
    /// Non-blocking warnings from the pre-write validation (low stock, near
    /// expiration, unusually large entry)
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct MovementService {
    api: ApiClient,
    stock: StockService,
}

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(api: ApiClient) -> Self {
        let stock = StockService::new(api.clone());
        Self { api, stock }
    }

    /// Validate `draft` against a fresh snapshot and, when accepted, apply
    /// the execution plan strictly in order
    pub async fn submit(&self, draft: &MovementDraft) -> AppResult<MovementReceipt> {
        // Snapshot the store whose stock the draft depletes (or receives).
        let store_context = match draft.movement_type {
            MovementType::In => draft.to_store_id,
            MovementType::Out | MovementType::Transfer => draft.from_store_id,
        };
        let snapshot = self.stock.lookup(draft.product_id, store_context).await?;

        let selected_batch = match draft.batch_id {
            Some(id) => Some(self.api.get_batch(id).await?),
            None => None,
        };

        let today = chrono::Utc::now().date_naive();
        let outcome = validate_movement(draft, &snapshot, selected_batch.as_ref(), today);
        if !outcome.is_valid() {
            let mut fields: Vec<&String> = outcome.errors.keys().collect();
            fields.sort();
            let field = fields[0].clone();
            let message_es = outcome.errors[&field].clone();
            return Err(AppError::Validation {
                message: format!("movement rejected on field '{}'", field),
                message_es,
                field,
            });
        }

        let plan = plan_movement(draft, &snapshot);

        // The audit record comes first; a failure here means nothing was
        // applied and the error can surface as-is.
        let movement = match plan.first() {
            Some(MovementStep::CreateMovement { record }) => {
                self.api.create_movement(record).await?
            }
            _ => {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "movement plan did not start with the audit record"
                )))
            }
        };

        tracing::info!(
            movement_id = movement.id,
            movement_type = draft.movement_type.as_str(),
            product_id = draft.product_id,
            quantity = draft.quantity,
            "movement recorded, applying stock adjustments"
        );

        for (index, step) in plan.iter().enumerate().skip(1) {
            if let Err(err) = self.apply_step(step).await {
                tracing::error!(
                    movement_id = movement.id,
                    step = index,
                    of = plan.len(),
                    error = %err,
                    "stock adjustment failed after movement was recorded"
                );
                return Err(AppError::PartiallyApplied(format!(
                    "movimiento {}: falló el paso {} de {} ({})",
                    movement.id,
                    index + 1,
                    plan.len(),
                    err
                )));
            }
        }

        Ok(MovementReceipt {
            movement,
            warnings: outcome.warnings,
        })
    }

    async fn apply_step(&self, step: &MovementStep) -> AppResult<()> {
        match step {
            // Applied before the loop; nothing to do here.
            MovementStep::CreateMovement { .. } => Ok(()),
            MovementStep::IncrementStoreStock {
                product_id,
                store_id,
                quantity,
            } => {
                self.stock
                    .add_store_stock(*product_id, *store_id, *quantity)
                    .await?;
                Ok(())
            }
            MovementStep::DecrementStoreStock {
                product_id,
                store_id,
                quantity,
            } => {
                self.stock
                    .remove_store_stock(*product_id, *store_id, *quantity)
                    .await?;
                Ok(())
            }
            MovementStep::AdjustGlobalStock { product_id, delta } => {
                self.stock.adjust_global_stock(*product_id, *delta).await?;
                Ok(())
            }
            MovementStep::DecrementBatchQuantity { batch_id, quantity } => {
                let batch = self.api.get_batch(*batch_id).await?;
                let next = shared::validation::clamp_current_quantity(
                    batch.current_quantity - quantity,
                    batch.initial_quantity,
                );
                self.api
                    .update_batch(
                        *batch_id,
                        &UpdateBatchInput {
                            current_quantity: Some(next),
                            ..Default::default()
                        },
                    )
                    .await?;
                Ok(())
            }
            MovementStep::ReassignBatchStore { batch_id, store_id } => {
                self.api
                    .update_batch(
                        *batch_id,
                        &UpdateBatchInput {
                            store_id: Some(*store_id),
                            ..Default::default()
                        },
                    )
                    .await?;
                Ok(())
            }
        }
    }
}
