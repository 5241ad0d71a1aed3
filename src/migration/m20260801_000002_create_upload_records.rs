//! Migration: Create upload_records table.
//!
//! Append-only upload log, retrieved newest-first per user.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE upload_records (
                    id TEXT PRIMARY KEY NOT NULL,
                    username TEXT NOT NULL REFERENCES users(username),
                    filename TEXT NOT NULL,
                    upload_time TEXT NOT NULL
                )
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_upload_records_user_time
                 ON upload_records(username, upload_time DESC)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_upload_records_user_time")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS upload_records")
            .await?;

        Ok(())
    }
}
