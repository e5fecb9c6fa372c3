pub mod health;
pub mod passwords;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/password-generator",
            get(passwords::handle_password_for_slug),
        )
        .route(
            "/api/credentials",
            get(passwords::handle_credentials_for_company),
        )
        .with_state(state)
}
