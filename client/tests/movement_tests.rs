//! Inventory movement workflow tests
//!
//! Covers the validator/planner contract end to end:
//! - rejection of over-stock OUT/TRANSFER drafts (with and without a batch)
//! - transfer store rules and batch-origin rules
//! - the execution plan's exactly-one-increment / exactly-one-decrement
//!   guarantee, exercised against an in-memory stock ledger

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::models::{
    MovementReason, MovementType, NewInventoryMovement, Product, ProductBatch, ProductStore,
};
use shared::movement::{plan_movement, validate_movement, MovementDraft, MovementStep};
use shared::stock::{assemble_snapshot, StockSnapshot};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
}

fn product(id: i64, global_stock: i32) -> Product {
    Product {
        id,
        name: format!("Producto {}", id),
        flavor: None,
        size: None,
        category_id: 1,
        production_cost: Decimal::from(2),
        wholesale_price: Decimal::from(4),
        retail_price: Decimal::from(6),
        global_stock,
        is_active: true,
    }
}

fn relation(product_id: i64, store_id: i64, stock: i32) -> ProductStore {
    ProductStore {
        id: product_id * 1000 + store_id,
        product_id,
        store_id,
        current_stock: stock,
        min_stock_level: 5,
    }
}

fn batch(id: i64, product_id: i64, store_id: Option<i64>, current: i32) -> ProductBatch {
    ProductBatch {
        id,
        batch_code: format!("CHOC-2026-{:04}", id),
        product_id,
        store_id,
        production_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        expiration_date: NaiveDate::from_ymd_opt(2027, 1, 10).unwrap(),
        initial_quantity: current.max(1),
        current_quantity: current,
        batch_cost: Decimal::from(75),
        is_active: true,
    }
}

fn draft(movement_type: MovementType, quantity: i32) -> MovementDraft {
    MovementDraft {
        movement_type,
        product_id: 1,
        batch_id: None,
        from_store_id: None,
        to_store_id: None,
        quantity,
        reason: MovementReason::Adjustment,
        user_id: 9,
        notes: None,
    }
}

// ============================================================================
// In-memory ledger: exercises the plan semantics without a backend
// ============================================================================

/// Stand-in for the backend's stock state. Mirrors the executor's apply
/// rules: increments find-or-create rows, decrements clamp at zero.
#[derive(Debug, Default)]
struct StockLedger {
    global: HashMap<i64, i32>,
    store_rows: HashMap<(i64, i64), i32>,
    batches: HashMap<i64, ProductBatch>,
    movements: Vec<NewInventoryMovement>,
}

impl StockLedger {
    fn with_global(mut self, product_id: i64, stock: i32) -> Self {
        self.global.insert(product_id, stock);
        self
    }

    fn with_row(mut self, product_id: i64, store_id: i64, stock: i32) -> Self {
        self.store_rows.insert((product_id, store_id), stock);
        self
    }

    fn apply(&mut self, step: &MovementStep) {
        match step {
            MovementStep::CreateMovement { record } => self.movements.push(record.clone()),
            MovementStep::IncrementStoreStock {
                product_id,
                store_id,
                quantity,
            } => {
                *self.store_rows.entry((*product_id, *store_id)).or_insert(0) += quantity;
            }
            MovementStep::DecrementStoreStock {
                product_id,
                store_id,
                quantity,
            } => {
                let row = self.store_rows.entry((*product_id, *store_id)).or_insert(0);
                *row = (*row - quantity).max(0);
            }
            MovementStep::AdjustGlobalStock { product_id, delta } => {
                let stock = self.global.entry(*product_id).or_insert(0);
                *stock = (*stock + delta).max(0);
            }
            MovementStep::DecrementBatchQuantity { batch_id, quantity } => {
                if let Some(b) = self.batches.get_mut(batch_id) {
                    b.current_quantity = (b.current_quantity - quantity).max(0);
                }
            }
            MovementStep::ReassignBatchStore { batch_id, store_id } => {
                if let Some(b) = self.batches.get_mut(batch_id) {
                    b.store_id = Some(*store_id);
                }
            }
        }
    }

    fn apply_plan(&mut self, plan: &[MovementStep]) {
        for step in plan {
            self.apply(step);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn snapshot(global: i32, relations: &[ProductStore], store_id: Option<i64>) -> StockSnapshot {
        assemble_snapshot(&product(1, global), &[], relations, store_id)
    }

    /// Property 1: OUT over the store stock rejects, citing availability
    #[test]
    fn test_out_over_store_stock_rejects() {
        let mut d = draft(MovementType::Out, 8);
        d.from_store_id = Some(2);
        let relations = [relation(1, 2, 7)];
        let outcome = validate_movement(&d, &snapshot(50, &relations, Some(2)), None, today());

        assert!(!outcome.is_valid());
        assert!(outcome.errors["quantity"].contains('7'));
    }

    /// Property 1 (no store context): the product-level stock applies
    #[test]
    fn test_out_without_store_checks_global() {
        let d = draft(MovementType::Out, 51);
        let outcome = validate_movement(&d, &snapshot(50, &[], None), None, today());
        assert!(!outcome.is_valid());

        let d_ok = draft(MovementType::Out, 50);
        let outcome_ok = validate_movement(&d_ok, &snapshot(50, &[], None), None, today());
        assert!(outcome_ok.is_valid());
    }

    /// Property 2: a specific batch caps the quantity and the message
    /// cites its code
    #[test]
    fn test_batch_cap_cites_code() {
        let mut d = draft(MovementType::Out, 31);
        d.batch_id = Some(4);
        let b = batch(4, 1, None, 30);
        let outcome = validate_movement(&d, &snapshot(50, &[], None), Some(&b), today());

        assert!(!outcome.is_valid());
        assert!(outcome.errors["quantity"].contains(&b.batch_code));
    }

    /// Property 3: transfer to the same store always rejects
    #[test]
    fn test_transfer_same_store_rejects() {
        let mut d = draft(MovementType::Transfer, 1);
        d.from_store_id = Some(2);
        d.to_store_id = Some(2);
        let relations = [relation(1, 2, 50)];
        let outcome = validate_movement(&d, &snapshot(50, &relations, Some(2)), None, today());
        assert!(!outcome.is_valid());
    }

    /// Property 4: a batch sitting elsewhere cannot be transferred from here
    #[test]
    fn test_transfer_batch_wrong_origin_rejects() {
        let mut d = draft(MovementType::Transfer, 1);
        d.from_store_id = Some(2);
        d.to_store_id = Some(3);
        d.batch_id = Some(4);
        let b = batch(4, 1, Some(9), 30);
        let relations = [relation(1, 2, 50)];
        let outcome = validate_movement(&d, &snapshot(50, &relations, Some(2)), Some(&b), today());
        assert!(outcome.errors.contains_key("batchId"));
    }

    /// Property 7: an expired batch is never usable for OUT/TRANSFER
    #[test]
    fn test_expired_batch_never_selectable() {
        let mut expired = batch(4, 1, Some(2), 30);
        expired.expiration_date = today().pred_opt().unwrap();
        let relations = [relation(1, 2, 50)];

        for movement_type in [MovementType::Out, MovementType::Transfer] {
            let mut d = draft(movement_type, 1);
            d.from_store_id = Some(2);
            d.to_store_id = Some(3);
            d.batch_id = Some(4);
            let outcome = validate_movement(
                &d,
                &snapshot(50, &relations, Some(2)),
                Some(&expired),
                today(),
            );
            assert!(outcome.errors.contains_key("batchId"));
        }
    }

    /// Property 11: an unresolved actor blocks everything else being valid
    #[test]
    fn test_unresolved_actor_rejects_all_types() {
        let relations = [relation(1, 2, 50)];
        for movement_type in [MovementType::In, MovementType::Out, MovementType::Transfer] {
            let mut d = draft(movement_type, 5);
            d.user_id = 0;
            d.from_store_id = Some(2);
            d.to_store_id = Some(3);
            let outcome = validate_movement(&d, &snapshot(50, &relations, Some(2)), None, today());
            assert!(outcome.errors.contains_key("user"));
        }
    }

    /// Property 10: transfer of the full row is accepted and lands whole at
    /// a destination with no prior row; one more unit is rejected before
    /// any write
    #[test]
    fn test_transfer_scenario_exact_stock() {
        let relations = [relation(1, 2, 5)];
        let snap = snapshot(50, &relations, Some(2));

        let mut d = draft(MovementType::Transfer, 5);
        d.from_store_id = Some(2);
        d.to_store_id = Some(3);
        let outcome = validate_movement(&d, &snap, None, today());
        assert!(outcome.is_valid());

        let mut ledger = StockLedger::default()
            .with_global(1, 50)
            .with_row(1, 2, 5);
        ledger.apply_plan(&plan_movement(&d, &snap));

        assert_eq!(ledger.store_rows[&(1, 3)], 5);
        assert_eq!(ledger.store_rows[&(1, 2)], 0);
        assert_eq!(ledger.global[&1], 50);
        assert_eq!(ledger.movements.len(), 1);

        // 6 units from the same 5-unit row: rejected, nothing to apply.
        let mut over = draft(MovementType::Transfer, 6);
        over.from_store_id = Some(2);
        over.to_store_id = Some(3);
        assert!(!validate_movement(&over, &snap, None, today()).is_valid());
    }

    /// Property 8: transferring N to a fresh (product, store) pair creates
    /// the row at N; doing it twice accumulates to 2N
    #[test]
    fn test_transfer_round_trip_accumulates() {
        let n = 4;
        let relations = [relation(1, 2, 20)];
        let snap = snapshot(100, &relations, Some(2));

        let mut d = draft(MovementType::Transfer, n);
        d.from_store_id = Some(2);
        d.to_store_id = Some(3);

        let mut ledger = StockLedger::default()
            .with_global(1, 100)
            .with_row(1, 2, 20);
        ledger.apply_plan(&plan_movement(&d, &snap));
        assert_eq!(ledger.store_rows[&(1, 3)], n);

        // Second transfer sees the updated origin row.
        let relations2 = [relation(1, 2, 20 - n)];
        let snap2 = snapshot(100, &relations2, Some(2));
        ledger.apply_plan(&plan_movement(&d, &snap2));
        assert_eq!(ledger.store_rows[&(1, 3)], 2 * n);
        assert_eq!(ledger.store_rows[&(1, 2)], 20 - 2 * n);
        assert_eq!(ledger.movements.len(), 2);
    }

    /// The plan for a transfer has exactly one destination increment and
    /// one origin decrement, and IN/OUT adjust the product level exactly once
    #[test]
    fn test_plan_step_counts() {
        let relations = [relation(1, 2, 20)];
        let snap = snapshot(100, &relations, Some(2));

        let mut transfer = draft(MovementType::Transfer, 3);
        transfer.from_store_id = Some(2);
        transfer.to_store_id = Some(3);
        let plan = plan_movement(&transfer, &snap);
        assert_eq!(
            plan.iter()
                .filter(|s| matches!(s, MovementStep::IncrementStoreStock { .. }))
                .count(),
            1
        );
        assert_eq!(
            plan.iter()
                .filter(|s| matches!(s, MovementStep::DecrementStoreStock { .. }))
                .count(),
            1
        );
        assert_eq!(
            plan.iter()
                .filter(|s| matches!(s, MovementStep::AdjustGlobalStock { .. }))
                .count(),
            0
        );

        let mut entry = draft(MovementType::In, 3);
        entry.to_store_id = Some(2);
        let plan_in = plan_movement(&entry, &snap);
        assert_eq!(
            plan_in
                .iter()
                .filter(|s| matches!(s, MovementStep::AdjustGlobalStock { delta: 3, .. }))
                .count(),
            1
        );
    }

    /// An OUT with a batch takes the units out of the batch exactly once
    #[test]
    fn test_out_with_batch_applies_once() {
        let relations = [relation(1, 2, 20)];
        let snap = snapshot(100, &relations, Some(2));

        let mut d = draft(MovementType::Out, 6);
        d.from_store_id = Some(2);
        d.batch_id = Some(4);

        let mut ledger = StockLedger::default()
            .with_global(1, 100)
            .with_row(1, 2, 20);
        ledger.batches.insert(4, batch(4, 1, Some(2), 15));
        ledger.apply_plan(&plan_movement(&d, &snap));

        assert_eq!(ledger.batches[&4].current_quantity, 9);
        assert_eq!(ledger.store_rows[&(1, 2)], 14);
        assert_eq!(ledger.global[&1], 94);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=500
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A depleting draft asking for more than the available stock is
        /// never accepted
        #[test]
        fn prop_never_accepts_over_stock(
            available in 0i32..200,
            extra in 1i32..200
        ) {
            let relations = [relation(1, 2, available)];
            let snap = assemble_snapshot(&product(1, 1000), &[], &relations, Some(2));

            let mut d = draft(MovementType::Out, available + extra);
            d.from_store_id = Some(2);
            let outcome = validate_movement(&d, &snap, None, today());
            prop_assert!(!outcome.is_valid());
        }

        /// An accepted transfer conserves total stock: destination gains
        /// exactly what the origin loses
        #[test]
        fn prop_transfer_conserves_units(
            origin_stock in 1i32..200,
            quantity in quantity_strategy()
        ) {
            prop_assume!(quantity <= origin_stock);
            let relations = [relation(1, 2, origin_stock)];
            let snap = assemble_snapshot(&product(1, 500), &[], &relations, Some(2));

            let mut d = draft(MovementType::Transfer, quantity);
            d.from_store_id = Some(2);
            d.to_store_id = Some(3);
            prop_assert!(validate_movement(&d, &snap, None, today()).is_valid());

            let mut ledger = StockLedger::default()
                .with_global(1, 500)
                .with_row(1, 2, origin_stock);
            let before: i32 = ledger.store_rows.values().sum();
            ledger.apply_plan(&plan_movement(&d, &snap));
            let after: i32 = ledger.store_rows.values().sum();

            prop_assert_eq!(before, after);
            prop_assert_eq!(ledger.store_rows[&(1, 3)], quantity);
            prop_assert_eq!(ledger.global[&1], 500);
        }

        /// An accepted OUT lowers the product-level stock by exactly the
        /// moved quantity
        #[test]
        fn prop_out_decrements_global_exactly(
            global in 1i32..500,
            quantity in quantity_strategy()
        ) {
            prop_assume!(quantity <= global);
            let snap = assemble_snapshot(&product(1, global), &[], &[], None);
            let d = draft(MovementType::Out, quantity);
            prop_assert!(validate_movement(&d, &snap, None, today()).is_valid());

            let mut ledger = StockLedger::default().with_global(1, global);
            ledger.apply_plan(&plan_movement(&d, &snap));
            prop_assert_eq!(ledger.global[&1], global - quantity);
        }

        /// IN never rejects on quantity, whatever the current stock
        #[test]
        fn prop_in_has_no_ceiling(
            global in 0i32..500,
            quantity in 1i32..50_000
        ) {
            let snap = assemble_snapshot(&product(1, global), &[], &[], None);
            let d = draft(MovementType::In, quantity);
            let outcome = validate_movement(&d, &snap, None, today());
            prop_assert!(outcome.is_valid());
        }
    }
}
