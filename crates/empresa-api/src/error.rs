//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps `empresa-core` errors to HTTP status codes and returns JSON error
//! bodies with a code, a message, and (for rejected forms) the full
//! validation result.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use empresa_core::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// The `details` field carries the [`ValidationResult`] for rejected forms
/// and is omitted for every other error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "FORM_REJECTED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for rejected forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// One or more form fields were rejected by a rule set (422).
    #[error("{} field(s) rejected", .0.errors.len())]
    Rejected(ValidationResult),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Rejected(_) => (StatusCode::UNPROCESSABLE_ENTITY, "FORM_REJECTED"),
        }
    }

    /// Construct a not-found error (404).
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        let details = match &self {
            Self::Rejected(result) => serde_json::to_value(result).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert rule-set errors to API errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownRuleSet(name) => {
                Self::NotFound(format!("rule set \"{name}\" not found"))
            }
            ValidationError::Rejected(result) => Self::Rejected(result),
        }
    }
}
