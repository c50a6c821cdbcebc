//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in catalog, cart and favorite operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Remote catalog call failed.
    #[error("Catalog request failed: {0}")]
    FetchError(String),

    /// Database error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A blocking store task was cancelled or panicked.
    #[error("Background task failed: {0}")]
    TaskError(String),
}

impl From<shop_data::FetchError> for CommerceError {
    fn from(e: shop_data::FetchError) -> Self {
        CommerceError::FetchError(e.to_string())
    }
}

impl From<shop_db::DbError> for CommerceError {
    fn from(e: shop_db::DbError) -> Self {
        CommerceError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<tokio::task::JoinError> for CommerceError {
    fn from(e: tokio::task::JoinError) -> Self {
        CommerceError::TaskError(e.to_string())
    }
}
