// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::collections::HashMap;

use crate::database::repository::RepositoryError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Internal failure detail is kept on the variant for logging but never
/// reaches the wire; all 500s share one generic message.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal(InternalReason),
}

/// Why a request collapsed to a 500. Logged, never exposed.
#[derive(Debug)]
pub enum InternalReason {
    /// A write matched or affected no rows where one was expected.
    NoRowsAffected(&'static str),
    /// Datastore constraint violation (unique, foreign key, ...).
    Constraint(String),
    /// Connection/pool level failure.
    Transport(String),
    /// Any other datastore failure.
    Query(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation { .. } => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal(_) => "internal server error",
        }
    }

    pub fn validation(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        ApiError::Validation {
            message: message.into(),
            field_errors: Some(field_errors),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Validation { message: message.into(), field_errors: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// A write the handler expected to touch a row touched none.
    pub fn write_failed(operation: &'static str) -> Self {
        ApiError::Internal(InternalReason::NoRowsAffected(operation))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Constraint(msg) => ApiError::Internal(InternalReason::Constraint(msg)),
            RepositoryError::Transport(msg) => ApiError::Internal(InternalReason::Transport(msg)),
            RepositoryError::Query(msg) => ApiError::Internal(InternalReason::Query(msg)),
            RepositoryError::NoRowsAffected(op) => {
                ApiError::Internal(InternalReason::NoRowsAffected(op))
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Log the real reason before it collapses to the generic wire message
        if let ApiError::Internal(reason) = &self {
            match reason {
                InternalReason::NoRowsAffected(op) => {
                    tracing::warn!("{} affected no rows", op);
                }
                InternalReason::Constraint(msg) => {
                    tracing::error!("constraint violation: {}", msg);
                }
                InternalReason::Transport(msg) => {
                    tracing::error!("database transport error: {}", msg);
                }
                InternalReason::Query(msg) => {
                    tracing::error!("database query error: {}", msg);
                }
            }
        }

        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({
            "status": false,
            "statusCode": self.status_code(),
            "message": self.message(),
        });

        if let ApiError::Validation { field_errors: Some(errors), .. } = &self {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}
