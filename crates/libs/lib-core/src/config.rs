//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is handed to the services and middleware that need it;
//! there is no global instance.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `mongodb://localhost:27017` |
//! | `DATABASE_NAME` | `todo_api` |
//! | `JWT_SECRET` | required, 32+ characters |
//! | `JWT_EXPIRATION_HOURS` | `24` |
//! | `DB_TIMEOUT_SECS` | `10` |

use std::fmt;
use std::time::Duration;

use lib_utils::{get_env, get_env_or, get_env_parse_or, validate_range};

use crate::error::{AppError, Result};

pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "todo_api";
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;
pub const DEFAULT_DB_TIMEOUT_SECS: u64 = 10;

/// Which persistence backend a `DATABASE_URL` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// MongoDB document store (`mongodb://`, `mongodb+srv://`)
    Mongo,
    /// Embedded SQLite file or memory database (`sqlite:`)
    Sqlite,
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Document store (or SQLite) connection URL
    pub database_url: String,

    /// Database name inside the document store
    pub database_name: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long**.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Upper bound on every persistence call, in seconds
    pub db_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        let database_name = get_env_or("DATABASE_NAME", DEFAULT_DATABASE_NAME);

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let jwt_expiration_hours =
            get_env_parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)
                .map_err(|e| AppError::Config(e.to_string()))?;

        let db_timeout_secs = get_env_parse_or("DB_TIMEOUT_SECS", DEFAULT_DB_TIMEOUT_SECS)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            database_name,
            jwt_secret,
            jwt_expiration_hours,
            db_timeout_secs,
        })
    }

    /// Validate configuration values against security and operational rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        validate_range(self.jwt_expiration_hours, 1, 720, "JWT_EXPIRATION_HOURS")
            .map_err(AppError::Config)?;
        validate_range(self.db_timeout_secs, 1, 300, "DB_TIMEOUT_SECS")
            .map_err(AppError::Config)?;

        if self.database_name.is_empty() {
            return Err(AppError::Config("DATABASE_NAME must not be empty".to_string()));
        }

        self.store_kind().map(|_| ())
    }

    /// Backend selected by the `DATABASE_URL` scheme.
    pub fn store_kind(&self) -> Result<StoreKind> {
        let url = self.database_url.as_str();
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            Ok(StoreKind::Mongo)
        } else if url.starts_with("sqlite:") {
            Ok(StoreKind::Sqlite)
        } else {
            Err(AppError::Config(
                "DATABASE_URL must start with mongodb://, mongodb+srv:// or sqlite:".to_string(),
            ))
        }
    }

    /// Lifetime of issued identity tokens.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt_expiration_hours)
    }

    /// Bound applied to each persistence call.
    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }
}

// The secret and any credentials embedded in the URL stay out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("store", &self.store_kind().ok())
            .field("database_name", &self.database_name)
            .field("jwt_secret", &"***REDACTED***")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("db_timeout_secs", &self.db_timeout_secs)
            .finish()
    }
}
