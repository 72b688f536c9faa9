//! Authentication Handlers Module
//!
//! HTTP handlers for the user and auth endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! └── me.rs        - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/users - User registration
//! - **`login`** - POST /api/auth - User authentication
//! - **`get_me`** - GET /api/auth - Get current user info

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;


pub use types::{LoginRequest, RegisterRequest, TokenResponse};

pub use login::login;
pub use me::get_me;
pub use register::register;
