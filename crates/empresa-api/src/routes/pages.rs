//! # Company Pages
//!
//! The `/empresa` pages and the profile edit form. Pages are served as
//! JSON view models; a front end renders them.
//!
//! ## Endpoints
//!
//! - `GET /empresa`: landing page
//! - `GET /empresa/perfilempresa`: default profile
//! - `GET /empresa/editprofileempresa`: edit form, pre-filled
//! - `POST /empresa/editar`: submit the edit form (url-encoded)
//!
//! A rejected submission answers 422 with the messages (`erros`) and the
//! submitted values (`empresa`) so the form can be re-rendered as typed.
//! An accepted one updates the default profile and redirects (303) to the
//! profile page.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use empresa_core::FieldError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_form, Validate};
use crate::routes::profiles::ProfileForm;
use crate::state::{AppState, CompanyProfile};

/// Where a successful edit lands.
pub const PROFILE_PAGE: &str = "/empresa/perfilempresa";
/// The edit form page.
pub const EDIT_PAGE: &str = "/empresa/editprofileempresa";

// ── View Models ─────────────────────────────────────────────────────

/// A navigation link on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageLink {
    pub rel: String,
    pub href: String,
}

/// Landing page model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LandingPage {
    pub title: String,
    pub links: Vec<PageLink>,
}

/// Profile page model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfilePage {
    pub empresa: CompanyProfile,
}

/// Edit form model: the values to show and the messages next to them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EditProfilePage {
    pub erros: Vec<FieldError>,
    pub empresa: ProfileForm,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/empresa", get(landing))
        .route(PROFILE_PAGE, get(profile_page))
        .route(EDIT_PAGE, get(edit_page))
        .route("/empresa/editar", post(submit_edit))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /empresa: Landing page.
#[utoipa::path(
    get,
    path = "/empresa",
    responses((status = 200, description = "Landing page", body = LandingPage)),
    tag = "pages"
)]
pub(crate) async fn landing() -> Json<LandingPage> {
    Json(LandingPage {
        title: "Empresa".to_string(),
        links: vec![
            PageLink {
                rel: "perfil".to_string(),
                href: PROFILE_PAGE.to_string(),
            },
            PageLink {
                rel: "editar".to_string(),
                href: EDIT_PAGE.to_string(),
            },
        ],
    })
}

/// GET /empresa/perfilempresa: The default company profile.
#[utoipa::path(
    get,
    path = "/empresa/perfilempresa",
    responses(
        (status = 200, description = "Default profile", body = ProfilePage),
        (status = 404, description = "No profile exists yet", body = crate::error::ErrorBody),
    ),
    tag = "pages"
)]
pub(crate) async fn profile_page(
    State(state): State<AppState>,
) -> Result<Json<ProfilePage>, AppError> {
    let empresa = default_profile(&state)?;
    Ok(Json(ProfilePage { empresa }))
}

/// GET /empresa/editprofileempresa: Edit form pre-filled with the default profile.
#[utoipa::path(
    get,
    path = "/empresa/editprofileempresa",
    responses(
        (status = 200, description = "Edit form", body = EditProfilePage),
        (status = 404, description = "No profile exists yet", body = crate::error::ErrorBody),
    ),
    tag = "pages"
)]
pub(crate) async fn edit_page(
    State(state): State<AppState>,
) -> Result<Json<EditProfilePage>, AppError> {
    let profile = default_profile(&state)?;
    Ok(Json(EditProfilePage {
        erros: Vec::new(),
        empresa: ProfileForm::from_profile(&profile),
    }))
}

/// POST /empresa/editar: Submit the profile edit form.
///
/// With no default profile yet, an accepted submission creates it.
#[utoipa::path(
    post,
    path = "/empresa/editar",
    request_body(content = ProfileForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved; redirect to the profile page"),
        (status = 422, description = "Rejected; form re-rendered with messages", body = EditProfilePage),
    ),
    tag = "pages"
)]
pub(crate) async fn submit_edit(
    State(state): State<AppState>,
    body: Result<Form<ProfileForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = extract_form(body)?;
    let outcome = form.validate();
    if !outcome.is_valid() {
        tracing::debug!(fields = ?outcome.fields(), "profile edit rejected");
        let page = EditProfilePage {
            erros: outcome.errors,
            empresa: form,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response());
    }

    let (profile, created) = state
        .profiles
        .upsert_default(|| form.to_profile(), |profile| form.apply_to(profile));
    if created {
        tracing::info!(profile_id = %profile.id, "default profile created");
    } else {
        tracing::info!(profile_id = %profile.id, "default profile updated");
    }

    Ok(Redirect::to(PROFILE_PAGE).into_response())
}

fn default_profile(state: &AppState) -> Result<CompanyProfile, AppError> {
    state
        .profiles
        .default_profile()
        .ok_or_else(|| AppError::not_found("no company profile has been created"))
}
