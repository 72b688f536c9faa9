/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth.
 *
 * # Authentication Process
 *
 * 1. Validate email format and that a password is present
 * 2. Look up user by email
 * 3. Verify password using bcrypt
 * 4. Return a JWT token
 *
 * An unknown email and a wrong password produce the same response.
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::server::state::AppState;
use crate::backend::validation::Validator;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    Validator::new()
        .email("email", request.email.as_deref(), "Please include a valid email")
        .required("password", request.password.as_deref(), "Password is required")
        .finish()
        .inspect_err(|e| tracing::warn!("Login rejected: {}", e))?;

    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let user = get_user_by_email(&state.db.users, &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login rejected: no user with that email");
            BackendError::InvalidCredentials
        })?;

    if !verify_password(&password, &user.password).await {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::InvalidCredentials);
    }

    let token = state.sessions.create_token(user.id).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token signing failed")
    })?;

    tracing::info!("User logged in successfully: {}", user.id);

    Ok(Json(TokenResponse { token }))
}
