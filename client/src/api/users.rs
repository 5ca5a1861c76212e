//! User endpoints
//!
//! Read-only here: account management belongs to the backend's own admin
//! surface, this side only resolves the acting user.

use shared::models::User;

use super::ApiClient;
use crate::error::AppResult;

impl ApiClient {
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.get_json("users").await
    }

    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.get_json(&format!("users/{}", id)).await
    }
}
