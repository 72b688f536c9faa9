//! devconnect - Main Library
//!
//! Backend for a developer social network: user registration and login,
//! developer profiles (experience, education, social links) and posts with
//! likes and comments, served as a JSON API over Axum.
//!
//! # Module Structure
//!
//! - **`shared`** - Document models, field-level errors, configuration
//! - **`backend`** - Axum server, handlers, auth middleware, document store
//!
//! # Usage
//!
//! ```rust,no_run
//! use devconnect::backend::server::init::create_app;
//! use devconnect::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Storage
//!
//! Documents live behind the `DocumentStore` trait. Without `DATABASE_URL`
//! the server runs on the in-memory store; with it, documents are kept as
//! JSONB rows in PostgreSQL.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
