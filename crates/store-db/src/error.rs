//! # Storage and Service Errors
//!
//! `DbError` is what a repository returns. `FulfillmentError` is what a
//! service returns: a refused business rule or a storage failure.
//!
//! ```text
//! sqlx::Error ──► DbError ──────────┐
//!                                   ├──► FulfillmentError ──► ApiError (HTTP)
//! ValidationError ──► CoreError ────┘
//! ```

use store_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row matched the id (lookup, UPDATE or DELETE).
    #[error("{entity} not found with Id : {id}")]
    NotFound { entity: String, id: String },

    /// An INSERT reused a primary key.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A CHECK constraint refused the write, or the write lock was still
    /// held when `busy_timeout` ran out.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Repositories map absent rows themselves; this is the fallback.
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // "UNIQUE constraint failed: products.id"
                match msg.strip_prefix("UNIQUE constraint failed: ") {
                    Some(column) => DbError::UniqueViolation {
                        field: column.to_string(),
                        value: "unknown".to_string(),
                    },
                    None => DbError::QueryFailed(msg.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Fulfillment Error
// =============================================================================

/// Errors returned by the services in [`crate::service`].
///
/// Either a business rule said no (`Core`) or storage failed (`Db`). Any of
/// them rolls back the operation's transaction.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for FulfillmentError {
    fn from(err: sqlx::Error) -> Self {
        FulfillmentError::Db(err.into())
    }
}

impl From<ValidationError> for FulfillmentError {
    fn from(err: ValidationError) -> Self {
        FulfillmentError::Core(err.into())
    }
}

pub type FulfillmentResult<T> = Result<T, FulfillmentError>;
