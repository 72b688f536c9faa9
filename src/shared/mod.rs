//! Shared Module
//!
//! Types used on both sides of the HTTP boundary: the document models,
//! field-level error types and the application configuration.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Document models (users, profiles, posts)
pub mod models;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{FieldError, SharedError, ValidationErrors};
