//! Profile Module
//!
//! Developer profiles: the free-form fields, skills, social links and the
//! experience and education lists.
//!
//! - **`types`** - Request bodies and their validation
//! - **`handlers`** - HTTP handlers for /api/profile

/// Request types
pub mod types;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    add_education, add_experience, delete_profile, get_my_profile, get_profile_by_user,
    list_profiles, remove_education, remove_experience, upsert_profile,
};
