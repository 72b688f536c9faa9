//! Authentication Module
//!
//! This module handles user registration, login and session tokens.
//!
//! # Architecture
//!
//! - **`users`** - User lookups and gravatar avatars
//! - **`passwords`** - bcrypt hashing and verification
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User lookups and avatars
//! ├── passwords.rs    - Password hashing
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user stored → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Get Me**: token → user record without the password hash
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Tokens are HS256 JWTs naming the user id, 100 hours by default
//! - Unknown email and wrong password give the same response

/// User lookups
pub mod users;

/// Password hashing
pub mod passwords;

/// Session token management
pub mod sessions;

/// HTTP handlers
pub mod handlers;

pub use handlers::{get_me, login, register};
pub use sessions::{SessionError, Sessions};
