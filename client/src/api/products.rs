//! Product and category endpoints

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::{Category, Product};

use super::ApiClient;
use crate::error::{AppError, AppResult};

/// Payload for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub flavor: Option<String>,
    pub size: Option<String>,
    pub category_id: i64,
    pub production_cost: Decimal,
    pub wholesale_price: Decimal,
    pub retail_price: Decimal,
    #[serde(rename = "minStockLevel")]
    pub global_stock: i32,
}

/// Payload for updating a product; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wholesale_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<Decimal>,
    #[serde(rename = "minStockLevel", skip_serializing_if = "Option::is_none")]
    pub global_stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.get_json("products").await
    }

    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.get_json(&format!("products/{}", id)).await
    }

    pub async fn create_product(&self, input: &CreateProductInput) -> AppResult<Product> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        self.post_json("products", input).await
    }

    pub async fn update_product(&self, id: i64, input: &UpdateProductInput) -> AppResult<Product> {
        self.put_json(&format!("products/{}", id), input).await
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.get_json("categories").await
    }
}
