//! Shared Error Types
//!
//! Errors produced while turning request payloads into domain values. They
//! carry the offending field so handlers can report them per field.
//!
//! # Usage
//!
//! ```rust
//! use devconnect::shared::error::{FieldError, SharedError};
//!
//! let error = SharedError::validation("email", "Please include a valid email");
//! let field: FieldError = error.into();
//! assert_eq!(field.param.as_deref(), Some("email"));
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-level failures raised by shared parsing helpers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A required value is missing or malformed
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A date could not be parsed
    #[error("Invalid date in field '{field}': {value}")]
    InvalidDate {
        /// The field holding the date
        field: String,
        /// The raw input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new date error
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the field this error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } | Self::InvalidDate { field, .. } => field,
        }
    }
}

/// One entry of the `errors` array returned with a 400 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }

    /// An error not tied to a single field (e.g. "Invalid Credentials")
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

impl From<SharedError> for FieldError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => FieldError::new(field, message),
            SharedError::InvalidDate { field, value } => {
                FieldError::new(field, format!("'{}' is not a valid date", value))
            }
        }
    }
}

/// The full set of failures found while validating one request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} validation error(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
