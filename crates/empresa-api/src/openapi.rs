//! # OpenAPI Document Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Empresa API",
        version = "0.1.0",
        description = "Company profile pages, registration-step validation, and CPF/CNPJ validation.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Pages
        crate::routes::pages::landing,
        crate::routes::pages::profile_page,
        crate::routes::pages::edit_page,
        crate::routes::pages::submit_edit,
        // Profiles
        crate::routes::profiles::list_profiles,
        crate::routes::profiles::create_profile,
        crate::routes::profiles::get_profile,
        crate::routes::profiles::update_profile,
        // Registration
        crate::routes::registration::list_rule_sets,
        crate::routes::registration::validate_step,
        // Identifiers
        crate::routes::identifiers::check_cpf,
        crate::routes::identifiers::check_cnpj,
    ),
    components(schemas(
        // State record types
        crate::state::CompanyProfile,
        crate::state::SocialLinks,
        // Validation types
        empresa_core::ValidationResult,
        empresa_core::FieldError,
        empresa_core::ErrorKind,
        empresa_core::FormValues,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Page view models
        crate::routes::pages::LandingPage,
        crate::routes::pages::PageLink,
        crate::routes::pages::ProfilePage,
        crate::routes::pages::EditProfilePage,
        // DTOs
        crate::routes::profiles::ProfileForm,
        crate::routes::registration::RuleSetSummary,
        crate::routes::identifiers::IdentifierRequest,
    )),
    tags(
        (name = "pages", description = "Company pages and profile edit form"),
        (name = "profiles", description = "Company profile API"),
        (name = "registration", description = "Registration step validation"),
        (name = "identifiers", description = "CPF and CNPJ validation"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in [
            "/empresa",
            "/empresa/perfilempresa",
            "/empresa/editprofileempresa",
            "/empresa/editar",
            "/v1/profiles",
            "/v1/profiles/{id}",
            "/v1/registration",
            "/v1/registration/{rule_set}",
            "/v1/identifiers/cpf/validate",
            "/v1/identifiers/cnpj/validate",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }

    #[test]
    fn openapi_document_serializes() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(json["info"]["title"], "Empresa API");
        assert!(json["components"]["schemas"]["CompanyProfile"].is_object());
    }
}
