//! # empresa-api: Axum API Services for the Empresa Stack
//!
//! Serves the company profile pages and edit form, per-step validation
//! for the registration wizard, and standalone CPF/CNPJ checks. All
//! validation is delegated to `empresa-core`.
//!
//! ## API Surface
//!
//! | Prefix                 | Module                       | Domain                   |
//! |------------------------|------------------------------|--------------------------|
//! | `/empresa/*`           | [`routes::pages`]            | Profile pages, edit form |
//! | `/v1/profiles/*`       | [`routes::profiles`]         | Profile JSON API         |
//! | `/v1/registration/*`   | [`routes::registration`]     | Registration steps       |
//! | `/v1/identifiers/*`    | [`routes::identifiers`]      | CPF / CNPJ               |
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros, served at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Form and JSON bodies are small; anything larger is refused.
const BODY_LIMIT: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::pages::router())
        .merge(routes::profiles::router())
        .merge(routes::registration::router())
        .merge(routes::identifiers::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
