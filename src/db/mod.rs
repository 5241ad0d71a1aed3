//! Database module providing connection management, migrations, and queries.

pub mod upload_records;
pub mod users;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper around SeaORM.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to the database described by the configuration.
    ///
    /// Connect and acquire times are bounded by `db_timeout_secs` so a stuck
    /// database surfaces as a `Database` error instead of blocking a request
    /// indefinitely.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(&config.database_url, config.db_timeout_secs).await
    }

    /// Connect to an explicit database URL. Used directly by tests.
    pub async fn connect(database_url: &str, timeout_secs: u64) -> AppResult<Self> {
        // For file-backed SQLite, make sure the parent directory exists
        if let Some(path) = database_url
            .strip_prefix("sqlite://")
            .map(|rest| rest.split('?').next().unwrap_or(rest))
            .filter(|p| !p.is_empty() && *p != ":memory:")
        {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::Database(format!(
                            "Failed to create database directory: {}",
                            e
                        ))
                    })?;
                }
            }
        }

        let mut options = ConnectOptions::new(database_url.to_string());
        options
            .max_connections(5)
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Get the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
