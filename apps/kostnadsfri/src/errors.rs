use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::credentials::CredentialError;

/// HTTP-facing error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Seed not configured")]
    SeedNotConfigured,
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SeedNotConfigured => {
                tracing::error!("Password requested but no seed is configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SEED_NOT_CONFIGURED",
                    "Set KOSTNADSFRI_PASSWORD_SEED or KOSTNADSFRI_API_KEY in environment"
                        .to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
