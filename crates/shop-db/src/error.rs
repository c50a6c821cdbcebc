//! Database error types.

use thiserror::Error;

/// Errors that can occur when using the database.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open the database.
    #[error("Failed to open database: {0}")]
    OpenError(String),

    /// Failed to execute a query.
    #[error("Query execution failed: {0}")]
    QueryError(String),

    /// Failed to deserialize a row.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),

    /// Type conversion error.
    #[error("Type conversion error: {0}")]
    TypeError(String),

    /// No rows returned when one was expected.
    #[error("No rows returned")]
    NotFound,

    /// A previous holder of the connection panicked.
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::DeserializeError(e.to_string())
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound,
            rusqlite::Error::FromSqlConversionFailure(_, _, err) => {
                DbError::TypeError(err.to_string())
            }
            rusqlite::Error::InvalidColumnType(idx, name, ty) => {
                DbError::TypeError(format!("column {idx} ({name}) has type {ty}"))
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}
