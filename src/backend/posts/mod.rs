//! Posts Module
//!
//! Posts with likes and comments.
//!
//! - **`types`** - Request bodies and their validation
//! - **`handlers`** - HTTP handlers for /api/posts

/// Request types
pub mod types;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    add_comment, create_post, delete_comment, delete_post, get_post, like_post, list_posts,
    unlike_post,
};
