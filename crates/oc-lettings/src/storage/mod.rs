//! Relational storage shared by the lettings and profiles apps.
//!
//! SQLite enforces the integrity rules itself: one-to-one links are `UNIQUE`
//! foreign keys declared `ON DELETE CASCADE`, and field bounds are `CHECK`
//! constraints. Foreign keys are switched on for every pooled connection.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Handle to the connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens its own empty database, so the
        // pool must hold exactly one and never recycle it.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(url = %config.url, "connected to database");
        Ok(Self { pool })
    }

    /// Connects to a private in-memory database with the schema applied.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let database = Self::connect(&DatabaseConfig::in_memory()).await?;
        database.migrate().await?;
        Ok(database)
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        MIGRATOR.run(&self.pool).await?;
        debug!(migrations = MIGRATOR.iter().count(), "schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A field-level rule broken before anything reached the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks a text field's length in characters, the way the schema counts it.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let message = if min == max {
            format!("must be exactly {min} characters (got {len})")
        } else if min == 0 {
            format!("must be at most {max} characters (got {len})")
        } else {
            format!("must be between {min} and {max} characters (got {len})")
        };
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max} (got {value})"),
        ));
    }
    Ok(())
}

/// Failures surfaced by the repositories.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("database unavailable: {0}")]
    Database(#[source] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StorageError {
    fn from(value: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &value {
            if matches!(
                db.kind(),
                sqlx::error::ErrorKind::UniqueViolation
                    | sqlx::error::ErrorKind::ForeignKeyViolation
                    | sqlx::error::ErrorKind::CheckViolation
                    | sqlx::error::ErrorKind::NotNullViolation
            ) {
                return Self::Integrity(db.message().to_string());
            }
        }
        Self::Database(value)
    }
}

impl StorageError {
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}
