//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A registered user. The password hash never leaves the db layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserAccount {
    pub username: String,
    pub created_at: DateTime<Utc>,
}
