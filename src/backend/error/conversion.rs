/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * Validation-style errors carry an array:
 * ```json
 * { "errors": [ { "msg": "Please include a valid email", "param": "email" } ] }
 * ```
 *
 * Everything else carries a single message:
 * ```json
 * { "msg": "Post not found" }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed with server error");
        }

        let body = match self.field_errors() {
            Some(errors) => json!({ "errors": errors }),
            None => json!({ "msg": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}
