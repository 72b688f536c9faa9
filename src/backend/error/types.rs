/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * ## Request Errors (400)
 *
 * - `Validation` - one or more fields failed validation
 * - `InvalidCredentials` - login with an unknown email or a wrong password
 * - `AlreadyExists` - registration with an email already in use
 * - `BadRequest` - a valid request that does not apply (liking twice)
 *
 * ## Access Errors (401, 404, 409)
 *
 * - `Unauthorized` - missing or invalid token, or not the owner
 * - `NotFound` - the addressed resource does not exist
 * - `Conflict` - an update kept losing against concurrent writers
 *
 * ## Server Errors (500)
 *
 * - `Storage` - the document store failed
 * - `Internal` - anything else (hashing, token signing)
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StorageError;
use crate::shared::{FieldError, SharedError, ValidationErrors};

/// Body text used for every 500 response
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Body text used for a 409 after the update retries ran out
pub const CONFLICT_MESSAGE: &str = "Concurrent update, please retry";

/// Backend-specific error types
///
/// ```rust
/// use devconnect::backend::error::BackendError;
///
/// let err = BackendError::not_found("Post not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Field validation failed
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Unknown email or wrong password; the two are indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The resource being created already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Request is well-formed but cannot be applied
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication or ownership check failed
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The addressed resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// An update lost every retry against concurrent writers
    #[error("conflict: {0}")]
    Conflict(String),

    /// Document store failure
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// Other server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl BackendError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidCredentials
            | Self::AlreadyExists(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    ///
    /// Server errors never expose their detail; the `Display` output is
    /// meant for logs only.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(errors) => errors
                .0
                .first()
                .map(|e| e.msg.clone())
                .unwrap_or_else(|| "Invalid request".to_string()),
            Self::InvalidCredentials => "Invalid Credentials".to_string(),
            Self::AlreadyExists(message)
            | Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.clone(),
            Self::Storage(_) | Self::Internal(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    /// Field errors for the `errors` array form, `None` for the `msg` form
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::Validation(errors) => Some(errors.0.clone()),
            Self::InvalidCredentials | Self::AlreadyExists(_) => {
                Some(vec![FieldError::general(self.message())])
            }
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<StorageError> for BackendError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::VersionConflict { .. } => Self::Conflict(CONFLICT_MESSAGE.to_string()),
            other => Self::Storage(other),
        }
    }
}

impl From<ValidationErrors> for BackendError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        Self::Validation(ValidationErrors(vec![err.into()]))
    }
}
