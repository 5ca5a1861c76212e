//! Inventory movement endpoints
//!
//! Movements are append-only; there is no update or delete.

use shared::models::{InventoryMovement, NewInventoryMovement};

use super::ApiClient;
use crate::error::AppResult;

impl ApiClient {
    pub async fn list_movements(&self) -> AppResult<Vec<InventoryMovement>> {
        self.get_json("inventory-movements").await
    }

    pub async fn list_movements_for_product(
        &self,
        product_id: i64,
    ) -> AppResult<Vec<InventoryMovement>> {
        self.get_json(&format!("inventory-movements?productId={}", product_id))
            .await
    }

    pub async fn create_movement(
        &self,
        input: &NewInventoryMovement,
    ) -> AppResult<InventoryMovement> {
        self.post_json("inventory-movements", input).await
    }
}
