//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use verse_core::VerseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Incomplete answer: {0}")]
    IncompleteAnswer(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<VerseError> for ApiError {
    fn from(err: VerseError) -> Self {
        match err {
            VerseError::VerseNotFound(_) | VerseError::NoMatchingVerse => {
                ApiError::NotFound(err.to_string())
            }
            VerseError::EmptyVerse(_) | VerseError::InvalidExercise(_) => {
                ApiError::BadRequest(err.to_string())
            }
            VerseError::InvalidSettings(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::IncompleteAnswer(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "incomplete_answer")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
