use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, ValidationFailures};

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// Per-field breakdown for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Relational call failed; `operation` names the offending statement for
    /// diagnostics.
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        source: DbErr,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(ValidationFailures),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Wraps a `DbErr` with the name of the operation that produced it.
    /// Usage: `.map_err(ServiceError::db("create customer"))`.
    pub fn db(operation: &'static str) -> impl FnOnce(DbErr) -> ServiceError {
        move |source| ServiceError::Database { operation, source }
    }

    pub fn validation(failures: ValidationFailures) -> Self {
        ServiceError::Validation(failures)
    }

    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Database { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message suitable for HTTP responses. Persistence failures return a
    /// generic message so statement context stays in the logs.
    pub fn response_message(&self) -> String {
        match self {
            Self::Database { .. } => "Database error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    fn details(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::Validation(failures) => Some(failures.0.clone()),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Validation(err.into())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: self.details(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}
