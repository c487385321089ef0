//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! and validate JSON and url-encoded bodies in handlers.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::{Form, Json};
use empresa_core::ValidationResult;

use crate::error::AppError;

/// Request types that run a rule set over their fields after
/// deserialization.
pub trait Validate {
    /// Validate the submitted values. An invalid result is rejected with
    /// [`AppError::Rejected`].
    fn validate(&self) -> ValidationResult;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
///     // use req...
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().into_result()?;
    Ok(value)
}

/// Extract a url-encoded form body, mapping decode errors to
/// [`AppError::BadRequest`].
pub fn extract_form<T>(result: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    result
        .map(|Form(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
