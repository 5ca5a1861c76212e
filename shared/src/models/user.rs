//! User model
//!
//! Authentication lives outside this workspace; the workflow only needs the
//! acting user's identity for the movement audit trail.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}
