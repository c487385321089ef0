//! # Registration Validation API
//!
//! Server-side checks for each step of the company registration wizard.
//! A step posts its fields as a flat JSON object and receives the
//! [`ValidationResult`].
//!
//! ## Endpoints
//!
//! - `GET /v1/registration`: list rule sets and the fields they inspect
//! - `POST /v1/registration/:rule_set`: validate one step

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use empresa_core::{FormValues, RuleSetName, ValidationResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// A rule set and the fields it inspects, in evaluation order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RuleSetSummary {
    pub name: String,
    pub fields: Vec<String>,
}

/// Build the registration router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/registration", get(list_rule_sets))
        .route("/v1/registration/:rule_set", post(validate_step))
}

/// GET /v1/registration: List the available rule sets.
#[utoipa::path(
    get,
    path = "/v1/registration",
    responses((status = 200, description = "Rule sets", body = Vec<RuleSetSummary>)),
    tag = "registration"
)]
pub(crate) async fn list_rule_sets() -> Json<Vec<RuleSetSummary>> {
    let summaries = RuleSetName::ALL
        .iter()
        .map(|name| RuleSetSummary {
            name: name.as_str().to_string(),
            fields: name
                .rule_set()
                .fields()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();
    Json(summaries)
}

/// POST /v1/registration/:rule_set: Validate a registration step.
///
/// Answers 200 when every field passes and 422 otherwise; the body is the
/// validation result in both cases.
#[utoipa::path(
    post,
    path = "/v1/registration/{rule_set}",
    params(("rule_set" = String, Path, description = "company, representative, representative-contact or profile-edit")),
    request_body = FormValues,
    responses(
        (status = 200, description = "All fields accepted", body = ValidationResult),
        (status = 422, description = "Some fields rejected", body = ValidationResult),
        (status = 404, description = "Unknown rule set", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
pub(crate) async fn validate_step(
    Path(rule_set): Path<String>,
    body: Result<Json<FormValues>, JsonRejection>,
) -> Result<(StatusCode, Json<ValidationResult>), AppError> {
    let name: RuleSetName = rule_set.parse()?;
    let form = extract_json(body)?;
    let result = name.rule_set().validate(&form);
    let status = if result.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    tracing::debug!(rule_set = %name, valid = result.is_valid(), "registration step validated");
    Ok((status, Json(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        router().with_state(AppState::new())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn lists_every_rule_set() {
        let resp = test_app()
            .oneshot(Request::get("/v1/registration").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["company", "representative", "representative-contact", "profile-edit"]
        );
        assert_eq!(body[0]["fields"][0], "razao_social");
    }

    #[tokio::test]
    async fn valid_representative_returns_200() {
        let resp = test_app()
            .oneshot(post_json(
                "/v1/registration/representative",
                serde_json::json!({
                    "nomeCompleto": "João da Silva",
                    "email": "joao@natura.com.br",
                    "cpf": "529.982.247-25",
                    "telefone": "(11) 91234-5678",
                    "senha": "segredo123",
                    "confirmarSenha": "segredo123"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["errors"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn password_mismatch_is_reported_on_confirmation() {
        let resp = test_app()
            .oneshot(post_json(
                "/v1/registration/representative",
                serde_json::json!({
                    "nomeCompleto": "João da Silva",
                    "email": "joao@natura.com.br",
                    "cpf": "529.982.247-25",
                    "telefone": "(11) 91234-5678",
                    "senha": "segredo123",
                    "confirmarSenha": "segredo124"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"][0]["field"], "confirmarSenha");
        assert_eq!(body["errors"][0]["message"], "Senhas não coincidem");
    }

    #[tokio::test]
    async fn company_checksum_failure_is_classified() {
        let resp = test_app()
            .oneshot(post_json(
                "/v1/registration/company",
                serde_json::json!({
                    "razao_social": "Natura Cosméticos S.A.",
                    "nome_fantasia": "Natura",
                    "cnpj": "11.222.333/0001-80",
                    "telefone": "(11) 1234-5678",
                    "logradouro": "Avenida Alexandre Colares, 1188",
                    "cidade": "São Paulo",
                    "estado": "SP"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["field"], "cnpj");
        assert_eq!(body["errors"][0]["kind"], "ChecksumError");
    }

    #[tokio::test]
    async fn unknown_rule_set_returns_404() {
        let resp = test_app()
            .oneshot(post_json("/v1/registration/socios", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn non_string_values_are_bad_requests() {
        let resp = test_app()
            .oneshot(post_json(
                "/v1/registration/company",
                serde_json::json!({ "cnpj": 11222333000181u64 }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
}
