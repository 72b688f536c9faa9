/**
 * Get Current User Handler
 *
 * GET /api/auth returns the authenticated user's record without the
 * password hash.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::Database;
use crate::shared::models::PublicUser;

/// # Errors
///
/// * `401 Unauthorized` - token missing or invalid
/// * `404 Not Found` - the token names a user that no longer exists
pub async fn get_me(
    auth: AuthUser,
    State(db): State<Database>,
) -> Result<Json<PublicUser>, BackendError> {
    let user = db.users.find_by_id(auth.id()).await?.ok_or_else(|| {
        tracing::warn!("Token for deleted user: {}", auth.id());
        BackendError::not_found("User not found")
    })?;

    Ok(Json(PublicUser::from(user)))
}
