/**
 * JSON Extractor
 *
 * `Json<T>` wraps `axum::Json` so that an unreadable body (wrong content
 * type, malformed JSON, a field of the wrong type) is rejected as a
 * validation failure: 400 with `{"errors":[{"msg":"Invalid request body"}]}`.
 * The serde detail only goes to the log.
 *
 * As a response it serializes exactly like `axum::Json`.
 */

use std::ops::{Deref, DerefMut};

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::backend::error::BackendError;
use crate::shared::{FieldError, ValidationErrors};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// JSON request body or response
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(
            status = %rejection.status(),
            "Unreadable request body: {}",
            rejection.body_text()
        );
        BackendError::Validation(ValidationErrors(vec![FieldError::general(
            INVALID_BODY_MESSAGE,
        )]))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}
