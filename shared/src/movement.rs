//! Movement validation and execution planning
//!
//! The validator is the pure function the browser runs while the form is
//! open and the data layer re-runs against a fresh snapshot immediately
//! before writing. The planner turns an accepted draft into the ordered
//! list of writes the executor applies sequentially, with no rollback on
//! partial failure. Steps carry no compensation today; the enum is the seam
//! where per-step rollback would go.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{MovementReason, MovementType, NewInventoryMovement, ProductBatch};
use crate::stock::StockSnapshot;

/// Low-stock warning floor used when no (product, store) relation is in
/// context; when a relation exists its `min_stock_level` applies instead.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// IN quantities above this warn (fat-finger guard) but never block
pub const LARGE_ENTRY_WARNING_THRESHOLD: i32 = 10_000;

/// Batches expiring within this many days produce a warning
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// A movement as drafted in the form, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDraft {
    pub movement_type: MovementType,
    pub product_id: i64,
    /// Set when the user picked a specific batch
    pub batch_id: Option<i64>,
    pub from_store_id: Option<i64>,
    pub to_store_id: Option<i64>,
    pub quantity: i32,
    pub reason: MovementReason,
    pub user_id: i64,
    pub notes: Option<String>,
}

/// Field-level errors plus non-blocking warnings
///
/// Keys are form field names; messages are the Spanish strings the dashboard
/// shows. Warnings never block submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub errors: HashMap<String, String>,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validate a movement draft against a stock snapshot
///
/// Rules are applied independently; a later rule still runs when an earlier
/// one rejected a different field. `selected_batch` is the batch the user
/// picked, if any; `today` is injected so the browser and the submission
/// path agree on the clock.
pub fn validate_movement(
    draft: &MovementDraft,
    snapshot: &StockSnapshot,
    selected_batch: Option<&ProductBatch>,
    today: NaiveDate,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if draft.user_id <= 0 {
        outcome.reject("user", "Usuario no válido. Vuelva a iniciar sesión.");
    }

    if draft.product_id <= 0 {
        outcome.reject("productId", "Seleccione un producto.");
    }

    if draft.quantity <= 0 {
        outcome.reject("quantity", "La cantidad debe ser un número entero positivo.");
    }

    if draft.movement_type == MovementType::Transfer {
        if draft.from_store_id.is_none() {
            outcome.reject("fromStoreId", "Seleccione la tienda de origen.");
        }
        if draft.to_store_id.is_none() {
            outcome.reject("toStoreId", "Seleccione la tienda de destino.");
        }
        if let (Some(from), Some(to)) = (draft.from_store_id, draft.to_store_id) {
            if from == to {
                outcome.reject(
                    "toStoreId",
                    "La tienda de destino debe ser distinta a la de origen.",
                );
            }
        }

        if let Some(batch) = selected_batch {
            if batch.store_id != draft.from_store_id {
                outcome.reject(
                    "batchId",
                    format!(
                        "El lote {} no se encuentra en la tienda de origen.",
                        batch.batch_code
                    ),
                );
            }
        }
    }

    let depletes = matches!(
        draft.movement_type,
        MovementType::Out | MovementType::Transfer
    );

    if depletes && draft.quantity > 0 {
        let available = snapshot.available_for(selected_batch);
        if draft.quantity > available {
            match selected_batch {
                Some(batch) => outcome.reject(
                    "quantity",
                    format!(
                        "Stock insuficiente en el lote {}: disponible {}.",
                        batch.batch_code, batch.current_quantity
                    ),
                ),
                None => outcome.reject(
                    "quantity",
                    format!("Stock insuficiente: disponible {}.", available),
                ),
            }
        }
    }

    if draft.movement_type == MovementType::In && draft.quantity > LARGE_ENTRY_WARNING_THRESHOLD {
        outcome.warn(format!(
            "Cantidad inusualmente alta ({}). Verifique el ingreso.",
            draft.quantity
        ));
    }

    if let Some(batch) = selected_batch {
        if batch.is_expired(today) {
            outcome.reject(
                "batchId",
                format!("El lote {} está vencido.", batch.batch_code),
            );
        } else if batch.expires_within(today, EXPIRY_WARNING_DAYS) {
            outcome.warn(format!(
                "El lote {} vence el {}.",
                batch.batch_code, batch.expiration_date
            ));
        }
    }

    if depletes && draft.quantity > 0 {
        let remaining = snapshot.store_stock - draft.quantity;
        if remaining == 0 {
            outcome.warn("El stock de la tienda quedará en cero.");
        } else if remaining > 0 && remaining <= snapshot.low_stock_threshold() {
            outcome.warn(format!(
                "Stock bajo tras el movimiento: quedarán {} unidades.",
                remaining
            ));
        }
    }

    outcome
}

impl From<&MovementDraft> for NewInventoryMovement {
    fn from(draft: &MovementDraft) -> Self {
        Self {
            movement_type: draft.movement_type,
            product_id: draft.product_id,
            batch_id: draft.batch_id,
            from_store_id: draft.from_store_id,
            to_store_id: draft.to_store_id,
            quantity: draft.quantity,
            reason: draft.reason,
            user_id: draft.user_id,
            notes: draft.notes.clone(),
        }
    }
}

/// One write in the movement execution sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MovementStep {
    /// POST the append-only audit record. Always first.
    CreateMovement { record: NewInventoryMovement },
    /// Find-or-create-or-update the destination ledger row, adding `quantity`
    IncrementStoreStock {
        product_id: i64,
        store_id: i64,
        quantity: i32,
    },
    /// Subtract `quantity` from the origin ledger row
    DecrementStoreStock {
        product_id: i64,
        store_id: i64,
        quantity: i32,
    },
    /// Add `delta` (possibly negative) to the product-level stock field
    AdjustGlobalStock { product_id: i64, delta: i32 },
    /// Take `quantity` out of a batch
    DecrementBatchQuantity { batch_id: i64, quantity: i32 },
    /// Move a batch to the destination store; its quantity is unchanged
    ReassignBatchStore { batch_id: i64, store_id: i64 },
}

/// Build the ordered write sequence for an accepted draft
///
/// The snapshot must have been taken for the draft's origin store (OUT,
/// TRANSFER) or destination (IN) — the planner uses its ledger row to decide
/// between a row decrement and a product-level fallback.
///
/// Invariants: the audit record is always first; a TRANSFER produces exactly
/// one increment at the destination and exactly one decrement at the origin
/// (the ledger row when one exists, the product-level field otherwise), and
/// no net product-level change when the origin row exists.
pub fn plan_movement(draft: &MovementDraft, snapshot: &StockSnapshot) -> Vec<MovementStep> {
    let mut steps = vec![MovementStep::CreateMovement {
        record: NewInventoryMovement::from(draft),
    }];

    match draft.movement_type {
        MovementType::In => {
            if let Some(store_id) = draft.to_store_id {
                steps.push(MovementStep::IncrementStoreStock {
                    product_id: draft.product_id,
                    store_id,
                    quantity: draft.quantity,
                });
            }
            steps.push(MovementStep::AdjustGlobalStock {
                product_id: draft.product_id,
                delta: draft.quantity,
            });
        }
        MovementType::Out => {
            if let Some(store_id) = draft.from_store_id {
                if snapshot.store_relation.is_some() {
                    steps.push(MovementStep::DecrementStoreStock {
                        product_id: draft.product_id,
                        store_id,
                        quantity: draft.quantity,
                    });
                }
            }
            if let Some(batch_id) = draft.batch_id {
                steps.push(MovementStep::DecrementBatchQuantity {
                    batch_id,
                    quantity: draft.quantity,
                });
            }
            steps.push(MovementStep::AdjustGlobalStock {
                product_id: draft.product_id,
                delta: -draft.quantity,
            });
        }
        MovementType::Transfer => {
            if let Some(store_id) = draft.to_store_id {
                steps.push(MovementStep::IncrementStoreStock {
                    product_id: draft.product_id,
                    store_id,
                    quantity: draft.quantity,
                });
            }
            match (draft.from_store_id, snapshot.store_relation.as_ref()) {
                (Some(store_id), Some(_)) => steps.push(MovementStep::DecrementStoreStock {
                    product_id: draft.product_id,
                    store_id,
                    quantity: draft.quantity,
                }),
                // Origin never had a ledger row: its stock was only tracked
                // at the product level.
                _ => steps.push(MovementStep::AdjustGlobalStock {
                    product_id: draft.product_id,
                    delta: -draft.quantity,
                }),
            }
            if let (Some(batch_id), Some(store_id)) = (draft.batch_id, draft.to_store_id) {
                steps.push(MovementStep::ReassignBatchStore { batch_id, store_id });
            }
        }
    }

    steps
}
