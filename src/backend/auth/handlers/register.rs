/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/users.
 *
 * # Registration Process
 *
 * 1. Validate name, email format and password length
 * 2. Check if a user with this email already exists
 * 3. Derive the gravatar avatar from the email
 * 4. Hash password using bcrypt
 * 5. Store the user
 * 6. Return a JWT token
 *
 * The store enforces email uniqueness itself, so two concurrent
 * registrations with the same email still yield a single user.
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{RegisterRequest, TokenResponse};
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::{get_user_by_email, gravatar_url};
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::server::state::AppState;
use crate::backend::store::StorageError;
use crate::backend::validation::Validator;
use crate::shared::models::user::normalize_email;
use crate::shared::models::User;

pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - validation failure, or the email is taken
/// * `500 Internal Server Error` - hashing, storage or token signing failed
///
/// # Example Request
///
/// ```http
/// POST /api/users HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Alice", "email": "alice@example.com", "password": "secret123" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    Validator::new()
        .required("name", request.name.as_deref(), "Name is required")
        .email("email", request.email.as_deref(), "Please include a valid email")
        .min_len(
            "password",
            request.password.as_deref(),
            6,
            "Please enter a password with 6 or more characters",
        )
        .finish()
        .inspect_err(|e| tracing::warn!("Registration rejected: {}", e))?;

    let name = request.name.unwrap_or_default().trim().to_string();
    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    let password = request.password.unwrap_or_default();

    if get_user_by_email(&state.db.users, &email).await?.is_some() {
        tracing::warn!("Registration rejected: email already registered");
        return Err(BackendError::AlreadyExists(USER_EXISTS_MESSAGE.to_string()));
    }

    let password_hash = hash_password(&password, state.config.bcrypt_cost)
        .await
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::internal("password hashing failed")
        })?;

    let avatar = gravatar_url(&email);
    let user = state
        .db
        .users
        .create(User::new(name, email, password_hash, avatar))
        .await
        .map_err(|e| match e {
            StorageError::DuplicateKey { .. } => {
                tracing::warn!("Email registered concurrently");
                BackendError::AlreadyExists(USER_EXISTS_MESSAGE.to_string())
            }
            other => other.into(),
        })?;

    let token = state.sessions.create_token(user.id).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token signing failed")
    })?;

    tracing::info!("User created successfully: {}", user.id);

    Ok(Json(TokenResponse { token }))
}
