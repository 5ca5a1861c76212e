//! Store endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::Store;

use super::ApiClient;
use crate::error::{AppError, AppResult};

/// Payload for registering a store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub address: Option<String>,
    #[serde(rename = "typeStore")]
    pub store_type: String,
}

impl ApiClient {
    pub async fn list_stores(&self) -> AppResult<Vec<Store>> {
        self.get_json("stores").await
    }

    pub async fn get_store(&self, id: i64) -> AppResult<Store> {
        self.get_json(&format!("stores/{}", id)).await
    }

    pub async fn create_store(&self, input: &CreateStoreInput) -> AppResult<Store> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        self.post_json("stores", input).await
    }
}
