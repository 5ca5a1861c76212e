//! Typed REST client for the external Chocorocks backend
//!
//! One module per entity; all share [`ApiClient`]. Wrappers stay thin:
//! composite read-modify-write operations live in the services, never here.
//! There is no automatic retry; timeouts are configured on the underlying
//! reqwest client.

mod batches;
mod clients;
mod movements;
mod product_stores;
mod products;
mod sales;
mod stores;
mod users;

pub use batches::{NewBatchInput, UpdateBatchInput};
pub use clients::{CreateClientInput, UpdateClientInput};
pub use product_stores::{NewProductStoreInput, UpdateProductStoreInput};
pub use products::{CreateProductInput, UpdateProductInput};
pub use stores::CreateStoreInput;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// REST client for the external backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default reqwest configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a client from configuration, honoring the request timeout
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn status_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return AppError::Unauthorized;
        }
        let body = response.text().await.unwrap_or_default();
        // The backend wraps errors as {"message": "..."}; fall back to the
        // raw body when it doesn't.
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);
        tracing::error!(status = status.as_u16(), %message, "API request failed");
        AppError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
