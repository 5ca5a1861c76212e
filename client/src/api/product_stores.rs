//! Per-store stock ledger endpoints
//!
//! The backend exposes no upsert for (product, store) rows; writers search
//! with [`ApiClient::find_product_store`] first, then create or update.

use serde::{Deserialize, Serialize};

use shared::models::ProductStore;

use super::ApiClient;
use crate::error::AppResult;

/// Payload for creating a ledger row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductStoreInput {
    pub product_id: i64,
    pub store_id: i64,
    pub current_stock: i32,
    pub min_stock_level: i32,
}

/// Payload for updating a ledger row; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductStoreInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock_level: Option<i32>,
}

impl ApiClient {
    pub async fn list_product_stores(&self) -> AppResult<Vec<ProductStore>> {
        self.get_json("product-stores").await
    }

    /// Search for the row of a (product, store) pair. At most one exists.
    pub async fn find_product_store(
        &self,
        product_id: i64,
        store_id: i64,
    ) -> AppResult<Option<ProductStore>> {
        let rows: Vec<ProductStore> = self
            .get_json(&format!(
                "product-stores?productId={}&storeId={}",
                product_id, store_id
            ))
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create_product_store(
        &self,
        input: &NewProductStoreInput,
    ) -> AppResult<ProductStore> {
        self.post_json("product-stores", input).await
    }

    pub async fn update_product_store(
        &self,
        id: i64,
        input: &UpdateProductStoreInput,
    ) -> AppResult<ProductStore> {
        self.put_json(&format!("product-stores/{}", id), input).await
    }
}
