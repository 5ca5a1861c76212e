//! Production batch endpoints

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::ProductBatch;

use super::ApiClient;
use crate::error::AppResult;

/// Wire payload for creating a batch
///
/// Built by the batch service, which forces `current_quantity` equal to
/// `initial_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatchInput {
    pub batch_code: String,
    pub product_id: i64,
    pub store_id: Option<i64>,
    pub production_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub initial_quantity: i32,
    pub current_quantity: i32,
    pub batch_cost: Decimal,
}

/// Payload for updating a batch; `None` fields are left unchanged
///
/// `batch_code` and `product_id` are immutable and deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    pub async fn list_batches(&self) -> AppResult<Vec<ProductBatch>> {
        self.get_json("product-batches").await
    }

    pub async fn list_batches_for_product(&self, product_id: i64) -> AppResult<Vec<ProductBatch>> {
        self.get_json(&format!("product-batches?productId={}", product_id))
            .await
    }

    pub async fn get_batch(&self, id: i64) -> AppResult<ProductBatch> {
        self.get_json(&format!("product-batches/{}", id)).await
    }

    pub async fn create_batch(&self, input: &NewBatchInput) -> AppResult<ProductBatch> {
        self.post_json("product-batches", input).await
    }

    pub async fn update_batch(&self, id: i64, input: &UpdateBatchInput) -> AppResult<ProductBatch> {
        self.put_json(&format!("product-batches/{}", id), input).await
    }

    pub async fn delete_batch(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("product-batches/{}", id)).await
    }
}
