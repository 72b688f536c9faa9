//! Backend Module
//!
//! All server-side code: an Axum HTTP server exposing the users, auth,
//! profile and posts endpoints over a document store.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, store loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, passwords, JWT tokens
//! - **`profile`** - Profile handlers
//! - **`posts`** - Post, like and comment handlers
//! - **`middleware`** - Token authentication
//! - **`extract`** - JSON body extractor with validation-style rejections
//! - **`validation`** - Request field validation
//! - **`store`** - Document store trait, in-memory and PostgreSQL stores
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── profile/        - Profiles
//! ├── posts/          - Posts
//! ├── middleware/     - Request middleware
//! ├── extract.rs      - JSON body extractor
//! ├── validation.rs   - Field validation
//! ├── store/          - Persistence
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the token keys and the repositories.
//! Nothing mutable lives in process memory except the in-memory store, so
//! requests are independent. Concurrent writes to one document are
//! resolved by the store's version check.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error converts into a
//! JSON response with the right status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Developer profiles
pub mod profile;

/// Posts, likes and comments
pub mod posts;

/// Middleware for request processing
pub mod middleware;

/// Request body extraction
pub mod extract;

/// Request validation
pub mod validation;

/// Document persistence
pub mod store;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
