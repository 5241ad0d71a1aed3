//! Database operations for the credential store.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, SqlErr};

use crate::entity::user::{self, Entity as User};
use crate::error::{AppError, AppResult};
use crate::models::UserAccount;

use super::DbPool;

impl DbPool {
    /// Insert a new user with an already-hashed password.
    ///
    /// Returns `DuplicateUsername` if the username is taken.
    pub async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<UserAccount> {
        let now = Utc::now();

        let model = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
        };

        match model.insert(self.connection()).await {
            Ok(inserted) => Ok(model_to_account(inserted)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::DuplicateUsername(username.to_string()))
                }
                _ => Err(AppError::Database(format!("Failed to insert user: {}", e))),
            },
        }
    }

    /// Find a user by username. Returns the stored password hash alongside
    /// the account so callers can verify credentials.
    pub async fn find_user(&self, username: &str) -> AppResult<Option<user::Model>> {
        let result = User::find_by_id(username.to_string())
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to look up user: {}", e)))?;

        Ok(result)
    }
}

fn model_to_account(m: user::Model) -> UserAccount {
    UserAccount {
        username: m.username,
        created_at: m.created_at,
    }
}
