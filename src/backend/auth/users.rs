/**
 * User Lookups and Avatars
 *
 * Helpers over the user repository shared by the auth and profile handlers.
 */

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::backend::store::{Repository, StorageResult};
use crate::shared::models::user::normalize_email;
use crate::shared::models::{User, UserSummary};

/// Gravatar URL for an email address
///
/// Size 200, PG rating, "mystery person" fallback. The email is hashed after
/// trimming and lower-casing.
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!("//www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm", digest)
}

/// Get user by email (normalized before lookup)
pub async fn get_user_by_email(users: &Repository<User>, email: &str) -> StorageResult<Option<User>> {
    users.find_one_by("email", &normalize_email(email)).await
}

/// Name and avatar of a user, `None` if the user no longer exists
pub async fn get_user_summary(
    users: &Repository<User>,
    user_id: Uuid,
) -> StorageResult<Option<UserSummary>> {
    Ok(users
        .find_by_id(user_id)
        .await?
        .map(|user| UserSummary::from(&user)))
}
