//! Client (customer) endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::Client;

use super::ApiClient;
use crate::error::{AppError, AppResult};

/// Payload for registering a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Payload for updating a client; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.get_json("clients").await
    }

    pub async fn get_client(&self, id: i64) -> AppResult<Client> {
        self.get_json(&format!("clients/{}", id)).await
    }

    pub async fn create_client(&self, input: &CreateClientInput) -> AppResult<Client> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        self.post_json("clients", input).await
    }

    pub async fn update_client(&self, id: i64, input: &UpdateClientInput) -> AppResult<Client> {
        self.put_json(&format!("clients/{}", id), input).await
    }
}
