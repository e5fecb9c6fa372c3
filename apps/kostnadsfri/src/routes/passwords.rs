//! Password lookups for the admin panel. Always deterministic: `PW` is a
//! CLI convenience and is never served over HTTP.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credentials::{Credentials, Slug};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SlugQuery {
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PasswordResponse {
    pub success: bool,
    pub slug: Slug,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsResponse {
    pub success: bool,
    pub company: String,
    pub slug: Slug,
    pub password: String,
    pub kostnadsfri_url: String,
    pub studio_url: String,
}

/// GET /api/password-generator?slug=xxx
pub async fn handle_password_for_slug(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
) -> Result<Json<PasswordResponse>, AppError> {
    let slug = Slug::parse(query.slug.as_deref().unwrap_or_default())?;
    let seed = state.seed.as_ref().ok_or(AppError::SeedNotConfigured)?;

    debug!(slug = %slug, "Password lookup");
    let Credentials { slug, password } = Credentials::for_slug(slug, seed);

    Ok(Json(PasswordResponse {
        success: true,
        slug,
        password,
    }))
}

/// GET /api/credentials?company=Name
pub async fn handle_credentials_for_company(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<CredentialsResponse>, AppError> {
    let company = query.company.unwrap_or_default();
    let slug = Slug::from_company_name(&company)?;
    let seed = state.seed.as_ref().ok_or(AppError::SeedNotConfigured)?;

    let Credentials { slug, password } = Credentials::for_slug(slug, seed);

    Ok(Json(CredentialsResponse {
        success: true,
        kostnadsfri_url: state.links.kostnadsfri_url(slug.as_str()),
        studio_url: state.links.studio_url(slug.as_str()),
        company: company.trim().to_string(),
        slug,
        password,
    }))
}
