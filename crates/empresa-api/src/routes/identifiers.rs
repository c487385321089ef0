//! # Identifier Validation API
//!
//! - `POST /v1/identifiers/cpf/validate`: validate a CPF
//! - `POST /v1/identifiers/cnpj/validate`: validate a CNPJ
//!
//! Both answer 200 with the [`ValidationResult`]; an invalid identifier is
//! a successful query with `valid: false`, not a request error.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use empresa_core::{validate_cnpj, validate_cpf, ValidationResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// An identifier to check, exactly as typed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IdentifierRequest {
    #[schema(example = "529.982.247-25")]
    pub value: String,
}

/// Build the identifiers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/identifiers/cpf/validate", post(check_cpf))
        .route("/v1/identifiers/cnpj/validate", post(check_cnpj))
}

/// POST /v1/identifiers/cpf/validate: Validate a CPF.
#[utoipa::path(
    post,
    path = "/v1/identifiers/cpf/validate",
    request_body = IdentifierRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 422, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "identifiers"
)]
pub(crate) async fn check_cpf(
    body: Result<Json<IdentifierRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(validate_cpf(&req.value)))
}

/// POST /v1/identifiers/cnpj/validate: Validate a CNPJ.
#[utoipa::path(
    post,
    path = "/v1/identifiers/cnpj/validate",
    request_body = IdentifierRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 422, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "identifiers"
)]
pub(crate) async fn check_cnpj(
    body: Result<Json<IdentifierRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(validate_cnpj(&req.value)))
}
