//! Domain Models
//!
//! The three document types kept in the store: users, profiles and posts.
//! They serialize with the `_id` key the JSON clients of this API expect.

use chrono::{DateTime, NaiveDate};

use crate::shared::error::SharedError;

/// User identity record
pub mod user;

/// Profile with experience, education and social links
pub mod profile;

/// Posts with likes and comments
pub mod post;

pub use post::{Comment, Like, Post};
pub use profile::{
    Education, Experience, PopulatedProfile, Profile, ProfilePatch, Social,
};
pub use user::{PublicUser, User, UserSummary};

/// Parse a calendar date supplied by a client
///
/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (the date part is kept).
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, SharedError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| SharedError::invalid_date(field, raw))
}
