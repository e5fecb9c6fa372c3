use crate::credentials::PasswordSeed;
use crate::links::LinkTargets;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when neither seed variable is set; password routes then answer 503.
    pub seed: Option<PasswordSeed>,
    pub links: LinkTargets,
}
