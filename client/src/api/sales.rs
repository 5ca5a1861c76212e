//! Sale endpoints

use shared::models::{NewSale, Sale};

use super::ApiClient;
use crate::error::AppResult;

impl ApiClient {
    pub async fn list_sales(&self) -> AppResult<Vec<Sale>> {
        self.get_json("sales").await
    }

    pub async fn get_sale(&self, id: i64) -> AppResult<Sale> {
        self.get_json(&format!("sales/{}", id)).await
    }

    pub async fn create_sale(&self, input: &NewSale) -> AppResult<Sale> {
        self.post_json("sales", input).await
    }

    pub async fn delete_sale(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("sales/{}", id)).await
    }
}
