//! Application error type and its HTTP status mapping.
//!
//! Three kinds of failure reach the client: validation problems as 400 with a
//! descriptive message, missing rows as 404, and everything else collapsed to
//! a per-route generic message with 500. The original cause is logged, never
//! returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("insufficient stock for some items")]
    OutOfStock(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{public}")]
    Backend {
        public: &'static str,
        #[source]
        source: BackendError,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Wraps a backend failure with the generic message the client will see.
    pub fn backend(public: &'static str) -> impl FnOnce(BackendError) -> AppError {
        move |source| AppError::Backend { public, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::OutOfStock(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Insufficient stock for some items",
                    "details": details,
                })),
            )
                .into_response(),
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            AppError::Backend { public, source } => {
                tracing::error!(error = %source, "{public}");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": public })))
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("no").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        let backend = AppError::backend("Checkout failed")(BackendError::MissingRow);
        assert_eq!(backend.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_backend_error_hides_cause() {
        let err = AppError::backend("Failed to fetch cart")(BackendError::Service {
            status: 503,
            message: "connection pool exhausted".into(),
        });
        assert_eq!(err.to_string(), "Failed to fetch cart");
    }
}
