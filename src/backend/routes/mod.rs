//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers and fallback
//! └── api_routes.rs   - /api route families
//! ```
//!
//! # Route Organization
//!
//! 1. **`GET /`** - liveness string
//! 2. **API Routes** - users, auth, profile, posts under `/api`
//! 3. **Fallback Handler** - JSON 404

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
