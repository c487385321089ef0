//! # Company Profiles API
//!
//! JSON access to company profiles. Writes go through the `profile-edit`
//! rule set, the same one the HTML edit form uses.
//!
//! ## Endpoints
//!
//! - `GET /v1/profiles`: list profiles
//! - `POST /v1/profiles`: create profile
//! - `GET /v1/profiles/:id`: get profile
//! - `PUT /v1/profiles/:id`: replace editable fields

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use empresa_core::{FormValues, RuleSetName, ValidationResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, CompanyProfile, SocialLinks};

// ── Request DTOs ────────────────────────────────────────────────────

/// Editable profile fields, as submitted by the edit form.
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileForm {
    pub nome: String,
    pub descricao: String,
    pub emailempresa: String,
    pub siteempresa: String,
    #[serde(rename = "type")]
    pub company_type: String,
    pub area: String,
    pub instagram: String,
    pub facebook: String,
    pub linkedin: String,
}

impl ProfileForm {
    /// Pre-fill the form from a stored profile.
    pub fn from_profile(profile: &CompanyProfile) -> Self {
        Self {
            nome: profile.nome.clone(),
            descricao: profile.descricao.clone(),
            emailempresa: profile.emailempresa.clone(),
            siteempresa: profile.siteempresa.clone(),
            company_type: profile.company_type.clone(),
            area: profile.area.clone(),
            instagram: profile.redes_sociais.instagram.clone(),
            facebook: profile.redes_sociais.facebook.clone(),
            linkedin: profile.redes_sociais.linkedin.clone(),
        }
    }

    /// The raw field map the rule set inspects.
    pub fn form_values(&self) -> FormValues {
        [
            ("nome", &self.nome),
            ("descricao", &self.descricao),
            ("emailempresa", &self.emailempresa),
            ("siteempresa", &self.siteempresa),
            ("type", &self.company_type),
            ("area", &self.area),
            ("instagram", &self.instagram),
            ("facebook", &self.facebook),
            ("linkedin", &self.linkedin),
        ]
        .into_iter()
        .map(|(field, value)| (field, value.as_str()))
        .collect()
    }

    /// Copy the submitted values (trimmed) onto `profile`.
    pub fn apply_to(&self, profile: &mut CompanyProfile) {
        profile.nome = self.nome.trim().to_string();
        profile.descricao = self.descricao.trim().to_string();
        profile.emailempresa = self.emailempresa.trim().to_string();
        profile.siteempresa = self.siteempresa.trim().to_string();
        profile.company_type = self.company_type.trim().to_string();
        profile.area = self.area.trim().to_string();
        profile.redes_sociais = SocialLinks {
            instagram: self.instagram.trim().to_string(),
            facebook: self.facebook.trim().to_string(),
            linkedin: self.linkedin.trim().to_string(),
        };
        profile.updated_at = Utc::now();
    }

    /// Build a fresh profile from the submitted values.
    pub fn to_profile(&self) -> CompanyProfile {
        let now = Utc::now();
        let mut profile = CompanyProfile {
            id: Uuid::new_v4(),
            nome: String::new(),
            descricao: String::new(),
            profilepicture: String::new(),
            emailempresa: String::new(),
            company_type: String::new(),
            area: String::new(),
            siteempresa: String::new(),
            redes_sociais: SocialLinks::default(),
            created_at: now,
            updated_at: now,
        };
        self.apply_to(&mut profile);
        profile
    }
}

impl Validate for ProfileForm {
    fn validate(&self) -> ValidationResult {
        RuleSetName::ProfileEdit
            .rule_set()
            .validate(&self.form_values())
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the profiles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/profiles", get(list_profiles).post(create_profile))
        .route("/v1/profiles/:id", get(get_profile).put(update_profile))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /v1/profiles: List all profiles.
#[utoipa::path(
    get,
    path = "/v1/profiles",
    responses(
        (status = 200, description = "List of profiles", body = Vec<CompanyProfile>),
    ),
    tag = "profiles"
)]
pub(crate) async fn list_profiles(State(state): State<AppState>) -> Json<Vec<CompanyProfile>> {
    Json(state.profiles.list())
}

/// POST /v1/profiles: Create a profile.
#[utoipa::path(
    post,
    path = "/v1/profiles",
    request_body = ProfileForm,
    responses(
        (status = 201, description = "Profile created", body = CompanyProfile),
        (status = 422, description = "Rejected fields", body = crate::error::ErrorBody),
    ),
    tag = "profiles"
)]
pub(crate) async fn create_profile(
    State(state): State<AppState>,
    body: Result<Json<ProfileForm>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyProfile>), AppError> {
    let form = extract_validated_json(body)?;
    let profile = form.to_profile();
    state.profiles.insert(profile.clone());
    tracing::info!(profile_id = %profile.id, "profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /v1/profiles/:id: Get a single profile.
#[utoipa::path(
    get,
    path = "/v1/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile found", body = CompanyProfile),
        (status = 404, description = "Profile not found", body = crate::error::ErrorBody),
    ),
    tag = "profiles"
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyProfile>, AppError> {
    state
        .profiles
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("profile {id} not found")))
}

/// PUT /v1/profiles/:id: Replace a profile's editable fields.
#[utoipa::path(
    put,
    path = "/v1/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = ProfileForm,
    responses(
        (status = 200, description = "Profile updated", body = CompanyProfile),
        (status = 404, description = "Profile not found", body = crate::error::ErrorBody),
        (status = 422, description = "Rejected fields", body = crate::error::ErrorBody),
    ),
    tag = "profiles"
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ProfileForm>, JsonRejection>,
) -> Result<Json<CompanyProfile>, AppError> {
    let form = extract_validated_json(body)?;
    let profile = state
        .profiles
        .update(&id, |profile| form.apply_to(profile))
        .ok_or_else(|| AppError::not_found(format!("profile {id} not found")))?;
    tracing::info!(profile_id = %id, "profile updated");
    Ok(Json(profile))
}
