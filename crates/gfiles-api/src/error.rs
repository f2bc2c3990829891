//! Maps domain `AppError` to HTTP responses.
//!
//! `AppError` lives in `gfiles-core`, which knows nothing about HTTP, so
//! the API layer wraps it in [`ApiError`] to implement Axum's
//! `IntoResponse`. Handlers return `Result<_, ApiError>` and `?` converts
//! through the `From` impl.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gfiles_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around the domain error.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code, safe_message) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", None),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN", None),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", None),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", None)
            }
            // Upstream and internal detail is logged server-side, never
            // returned to the client verbatim.
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::ExternalService
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    Some("An internal error occurred".to_string()),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: safe_message.unwrap_or(err.message),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::authentication("x"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("x"), StatusCode::FORBIDDEN),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = AppError::database("connection string postgres://user:secret@db failed");
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body carries only the generic message; detail stays in the log.
    }
}
