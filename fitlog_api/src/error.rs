//! HTTP error payloads and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating
//! [`fitlog_core::Error`] into responses here. The original service
//! answered every failure with `{"error": <text>}` and HTTP 200; this
//! implementation keeps the body shape but maps the error taxonomy to
//! distinct status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use fitlog_core::Error as CoreError;
use serde::Serialize;

/// Standard error envelope: `{"error": <text>}`
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Transport-level error carrying a status code and a client-safe message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

/// Convenience alias for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Missing or malformed client input (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Unknown user id (404)
    pub fn user_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "User not found".into(),
        }
    }

    /// Storage or serialization failure (500); the real cause is logged,
    /// the client only sees a generic message.
    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".into(),
        }
    }

    /// Client-facing message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => Self::validation(message),
            CoreError::InvalidUserId(id) => {
                Self::validation(format!("invalid user id: {}", id))
            }
            CoreError::Io(_)
            | CoreError::Json(_)
            | CoreError::Toml(_)
            | CoreError::Config(_)
            | CoreError::Storage(_) => {
                tracing::error!("storage failure: {}", err);
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorBody {
            error: &self.message,
        })
    }
}
