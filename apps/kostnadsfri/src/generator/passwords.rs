//! Which password a generated link gets.

use crate::config::{Config, ConfigError};
use crate::credentials::{derive_password, PasswordSeed, Slug};

/// Password source, in priority order: explicit `--password`, the fixed `PW`
/// password (unless `--seed` forces deterministic mode), then the derived one.
#[derive(Debug, Clone)]
pub enum PasswordSource {
    Explicit(String),
    Fixed(String),
    Derived(PasswordSeed),
}

/// Command-line inputs that influence password selection.
#[derive(Debug, Clone, Default)]
pub struct PasswordArgs {
    pub explicit: Option<String>,
    pub seed: Option<String>,
    pub insecure_test_seed: bool,
}

impl PasswordSource {
    pub fn resolve(args: &PasswordArgs, config: &Config) -> Result<Self, ConfigError> {
        if let Some(explicit) = args
            .explicit
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            return Ok(Self::Explicit(explicit.to_string()));
        }

        let force_deterministic = args.seed.is_some();
        if let Some(fixed) = config.fixed_password.as_deref() {
            if !force_deterministic {
                return Ok(Self::Fixed(fixed.to_string()));
            }
        }

        Self::deterministic(args, config)
    }

    /// Always the derived password, ignoring `--password` and `PW`.
    pub fn deterministic(args: &PasswordArgs, config: &Config) -> Result<Self, ConfigError> {
        config
            .resolve_seed(args.seed.as_deref(), args.insecure_test_seed)
            .map(Self::Derived)
    }

    pub fn password_for(&self, slug: &Slug) -> String {
        match self {
            Self::Explicit(password) | Self::Fixed(password) => password.clone(),
            Self::Derived(seed) => derive_password(slug.as_str(), seed.expose()),
        }
    }

    /// One-line description for banners. Never shows a secret in full.
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(_) => "Password: explicit (--password)".to_string(),
            Self::Fixed(_) => "Fixed password: PW (env)".to_string(),
            Self::Derived(seed) => format!("Seed: {}", seed.masked()),
        }
    }
}
