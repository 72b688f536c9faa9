//! Storage error types.

use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::traits::Collection;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique field already holds this value.
    #[error("duplicate {field} in {collection}")]
    DuplicateKey {
        collection: Collection,
        field: &'static str,
    },

    /// The document changed since it was read.
    #[error("version conflict on {collection}/{id} (expected version {expected})")]
    VersionConflict {
        collection: Collection,
        id: Uuid,
        expected: i64,
    },

    /// Document not found.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: Collection, id: Uuid },

    /// Database connection error.
    #[error("database connection error: {message}")]
    ConnectionError { message: String },

    /// Database query error.
    #[error("database query error: {message}")]
    QueryError { message: String },

    /// Serialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError {
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
