//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// HTTP header name for session token authentication.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_DATABASE_URL: &str = "sqlite://data/salesboard.db?mode=rwc";
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_DATA_DIR: &str = "data/uploads";
    pub const DEV_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024; // 10MiB per CSV
    pub const DEV_SESSION_TTL_SECS: u64 = 8 * 60 * 60; // 8 hours
    pub const DEV_HISTORY_CACHE_TTL_SECS: u64 = 600; // 10 minutes
    pub const DEV_PREVIEW_ROWS: usize = 5;
    pub const DEV_DB_TIMEOUT_SECS: u64 = 5;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL (SQLite connection string)
    pub database_url: String,
    /// Directory where uploaded CSV blobs are stored, one subdirectory per user
    pub data_dir: PathBuf,
    /// Directory for static frontend assets (production only)
    pub static_dir: Option<PathBuf>,
    /// Maximum upload size in bytes (default: 10MiB)
    pub max_upload_size: usize,
    /// Session lifetime in seconds (default: 8 hours)
    pub session_ttl_secs: u64,
    /// Upload history cache TTL in seconds (default: 600)
    pub history_cache_ttl_secs: u64,
    /// Number of rows returned in upload previews (default: 5)
    pub preview_rows: usize,
    /// Bound on database connect/acquire time in seconds (default: 5)
    pub db_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) every variable has a
    /// sensible default; only RUST_ENV itself is required. In production
    /// mode the server refuses to start on development defaults.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `SBD_HOST`: Server host (default: 127.0.0.1)
    /// - `SBD_PORT`: Server port (default: 8080)
    /// - `DATABASE_URL`: SQLite connection string (required in production)
    /// - `SBD_DATA_DIR`: Upload blob directory (default: data/uploads)
    /// - `SBD_STATIC_DIR`: Static assets directory for production
    /// - `SBD_MAX_UPLOAD_SIZE`: Max upload size in bytes (default: 10MiB)
    /// - `SBD_SESSION_TTL_SECS`: Session lifetime in seconds (default: 28800)
    /// - `SBD_HISTORY_CACHE_TTL_SECS`: History cache TTL in seconds (default: 600)
    /// - `SBD_PREVIEW_ROWS`: Rows in upload previews (default: 5)
    /// - `SBD_DB_TIMEOUT_SECS`: DB connect/acquire timeout in seconds (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        // Load values with defaults
        let host = env::var("SBD_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("SBD_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("SBD_PORT must be a valid port number"))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DEV_DATABASE_URL.to_string());

        let data_dir = PathBuf::from(
            env::var("SBD_DATA_DIR").unwrap_or_else(|_| defaults::DEV_DATA_DIR.to_string()),
        );

        let max_upload_size = env::var("SBD_MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| defaults::DEV_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue("SBD_MAX_UPLOAD_SIZE must be a valid number"))?;

        let session_ttl_secs = env::var("SBD_SESSION_TTL_SECS")
            .unwrap_or_else(|_| defaults::DEV_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("SBD_SESSION_TTL_SECS must be a valid number")
            })?;

        let history_cache_ttl_secs = env::var("SBD_HISTORY_CACHE_TTL_SECS")
            .unwrap_or_else(|_| defaults::DEV_HISTORY_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("SBD_HISTORY_CACHE_TTL_SECS must be a valid number")
            })?;

        let preview_rows = env::var("SBD_PREVIEW_ROWS")
            .unwrap_or_else(|_| defaults::DEV_PREVIEW_ROWS.to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue("SBD_PREVIEW_ROWS must be a valid number"))?;

        let db_timeout_secs = env::var("SBD_DB_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults::DEV_DB_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("SBD_DB_TIMEOUT_SECS must be a valid number"))?;

        let static_dir = env::var("SBD_STATIC_DIR").ok().map(PathBuf::from);

        let config = Config {
            environment,
            host,
            port,
            database_url,
            data_dir,
            static_dir,
            max_upload_size,
            session_ttl_secs,
            history_cache_ttl_secs,
            preview_rows,
            db_timeout_secs,
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url == defaults::DEV_DATABASE_URL {
            errors.push(format!(
                "DATABASE_URL is using development default '{}'. Set a production database path.",
                defaults::DEV_DATABASE_URL
            ));
        }

        if self.data_dir == PathBuf::from(defaults::DEV_DATA_DIR) {
            errors.push(format!(
                "SBD_DATA_DIR is using development default '{}'. Set a production data directory.",
                defaults::DEV_DATA_DIR
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
