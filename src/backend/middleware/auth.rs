/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It reads the token from the `x-auth-token` header
 * (or `Authorization: Bearer <token>`), verifies it and provides the user
 * ID to handlers.
 *
 * Two entry points share the same checks:
 * - `auth_middleware`, layered over routers where every route is private
 * - `AuthUser`, an extractor for individual private routes; it reuses an
 *   identity attached by the layer when there is one
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::Sessions;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Header the token is read from first
pub const TOKEN_HEADER: &str = "x-auth-token";

pub const NO_TOKEN_MESSAGE: &str = "No token, authorization denied";
pub const INVALID_TOKEN_MESSAGE: &str = "Token is not valid";

/// Authenticated user data extracted from the token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Raw token from the request headers, if any
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
        })?
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Verify the request's token
pub fn authenticate(sessions: &Sessions, headers: &HeaderMap) -> Result<AuthenticatedUser, BackendError> {
    let token = token_from_headers(headers).ok_or_else(|| {
        tracing::warn!("Missing auth token");
        BackendError::unauthorized(NO_TOKEN_MESSAGE)
    })?;

    let user_id = sessions.verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        BackendError::unauthorized(INVALID_TOKEN_MESSAGE)
    })?;

    Ok(AuthenticatedUser { user_id })
}

/// Authentication middleware
///
/// Rejects the request with 401 before it reaches the handler when the
/// token is missing or invalid; otherwise attaches `AuthenticatedUser` to
/// the request extensions.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(&app_state.sessions, request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(*user));
        }
        let user = authenticate(&state.sessions, &parts.headers)?;
        parts.extensions.insert(user);
        Ok(AuthUser(user))
    }
}
