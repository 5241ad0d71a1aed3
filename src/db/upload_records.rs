//! Database operations for the upload log.
//!
//! The log is append-only; rows are never updated or deleted within this
//! system's scope.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::upload_record::{self, Entity as UploadRecord};
use crate::error::{AppError, AppResult};
use crate::models::UploadEntry;

use super::DbPool;

impl DbPool {
    /// Append one immutable upload record.
    pub async fn insert_upload(
        &self,
        username: &str,
        filename: &str,
        upload_time: DateTime<Utc>,
    ) -> AppResult<UploadEntry> {
        let model = upload_record::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            filename: Set(filename.to_string()),
            upload_time: Set(upload_time),
        };

        let inserted = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to record upload: {}", e)))?;

        Ok(model_to_entry(inserted))
    }

    /// List all upload records for a user, most recent first.
    ///
    /// A user with no uploads gets an empty vec, not an error.
    pub async fn list_uploads(&self, username: &str) -> AppResult<Vec<UploadEntry>> {
        let rows = UploadRecord::find()
            .filter(upload_record::Column::Username.eq(username))
            .order_by_desc(upload_record::Column::UploadTime)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list uploads: {}", e)))?;

        Ok(rows.into_iter().map(model_to_entry).collect())
    }
}

fn model_to_entry(m: upload_record::Model) -> UploadEntry {
    UploadEntry {
        filename: m.filename,
        upload_time: m.upload_time,
    }
}
