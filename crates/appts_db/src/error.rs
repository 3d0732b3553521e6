//! Error types for the database client

use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),
}

// SQLSTATE for unique_violation, then SQLite's extended codes
// SQLITE_CONSTRAINT_UNIQUE (2067) and SQLITE_CONSTRAINT_PRIMARYKEY (1555)
const UNIQUE_VIOLATION_CODES: [&str; 3] = ["23505", "2067", "1555"];

impl DbError {
    /// True when the statement failed on a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::SqlxError(sqlx::Error::Database(db_err)) => {
                db_err.is_unique_violation()
                    || db_err
                        .code()
                        .is_some_and(|code| UNIQUE_VIOLATION_CODES.contains(&code.as_ref()))
            }
            _ => false,
        }
    }
}
