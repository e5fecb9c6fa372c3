use anyhow::{Context, Result};
use thiserror::Error;
use tracing::warn;

use crate::credentials::PasswordSeed;

pub const DEFAULT_SAJTMASKIN_BASE_URL: &str = "https://sajtmaskin.vercel.app";
pub const DEFAULT_SAJTSTUDIO_BASE_URL: &str = "https://www.sajtstudio.se";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "No password seed configured. Set KOSTNADSFRI_PASSWORD_SEED (or KOSTNADSFRI_API_KEY), \
         pass --seed, or enable insecure test mode explicitly"
    )]
    MissingSeed,

    #[error("KOSTNADSFRI_API_KEY environment variable is required")]
    MissingApiKey,
}

/// Application configuration loaded from environment variables.
/// Everything is optional at load time; commands ask for what they need.
#[derive(Clone)]
pub struct Config {
    pub password_seed: Option<String>,
    pub api_key: Option<String>,
    pub sajtmaskin_base_url: String,
    pub sajtstudio_base_url: String,
    /// `PW`: one password for every slug.
    pub fixed_password: Option<String>,
    pub allow_insecure_seed: bool,
    /// Raw `PORT`; only `serve` parses it, see [`Config::port`].
    pub port: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            password_seed: non_blank("KOSTNADSFRI_PASSWORD_SEED"),
            api_key: non_blank("KOSTNADSFRI_API_KEY"),
            sajtmaskin_base_url: base_url(
                non_blank("SAJTMASKIN_BASE_URL"),
                DEFAULT_SAJTMASKIN_BASE_URL,
            ),
            sajtstudio_base_url: base_url(
                non_blank("SAJTSTUDIO_BASE_URL"),
                DEFAULT_SAJTSTUDIO_BASE_URL,
            ),
            fixed_password: non_blank("PW").map(|v| v.trim().to_string()),
            allow_insecure_seed: non_blank("KOSTNADSFRI_ALLOW_INSECURE_SEED")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            port: non_blank("PORT").unwrap_or_else(|| "8080".to_string()),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn port(&self) -> Result<u16> {
        self.port
            .trim()
            .parse::<u16>()
            .context("PORT must be a valid port number")
    }

    /// Resolves the password seed: CLI override, then `KOSTNADSFRI_PASSWORD_SEED`,
    /// then `KOSTNADSFRI_API_KEY`. The well-known test seed is only used when
    /// insecure mode is on (env or `insecure_flag`).
    pub fn resolve_seed(
        &self,
        cli_override: Option<&str>,
        insecure_flag: bool,
    ) -> Result<PasswordSeed, ConfigError> {
        let configured = cli_override
            .filter(|s| !s.trim().is_empty())
            .or(self.password_seed.as_deref())
            .or(self.api_key.as_deref());

        if let Some(seed) = configured {
            return PasswordSeed::new(seed).map_err(|_| ConfigError::MissingSeed);
        }

        if insecure_flag || self.allow_insecure_seed {
            warn!("No password seed configured; using the insecure test seed. Passwords are guessable.");
            return Ok(PasswordSeed::insecure_test_seed());
        }

        Err(ConfigError::MissingSeed)
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("password_seed", &self.password_seed.as_ref().map(|_| "<set>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("sajtmaskin_base_url", &self.sajtmaskin_base_url)
            .field("sajtstudio_base_url", &self.sajtstudio_base_url)
            .field("fixed_password", &self.fixed_password.as_ref().map(|_| "<set>"))
            .field("allow_insecure_seed", &self.allow_insecure_seed)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .as_deref()
        .unwrap_or(default)
        .trim()
        .trim_end_matches('/')
        .to_string()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.sajtmaskin_base_url, DEFAULT_SAJTMASKIN_BASE_URL);
        assert_eq!(config.sajtstudio_base_url, DEFAULT_SAJTSTUDIO_BASE_URL);
        assert_eq!(config.port().unwrap(), 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.password_seed.is_none());
        assert!(config.fixed_password.is_none());
        assert!(!config.allow_insecure_seed);
    }

    #[test]
    fn test_base_urls_lose_trailing_slash() {
        let config = config_from(&[
            ("SAJTMASKIN_BASE_URL", "http://localhost:3000/"),
            ("SAJTSTUDIO_BASE_URL", "https://studio.example//"),
        ]);
        assert_eq!(config.sajtmaskin_base_url, "http://localhost:3000");
        assert_eq!(config.sajtstudio_base_url, "https://studio.example");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert!(config.port().is_err());
    }

    #[test]
    fn test_invalid_port_does_not_block_seed_resolution() {
        let config = config_from(&[("PORT", "abc"), ("KOSTNADSFRI_PASSWORD_SEED", "test-seed-123")]);
        assert_eq!(config.resolve_seed(None, false).unwrap().expose(), "test-seed-123");
        assert!(config.port().is_err());
    }

    #[test]
    fn test_blank_fixed_password_is_unset() {
        assert!(config_from(&[("PW", "   ")]).fixed_password.is_none());
        assert_eq!(
            config_from(&[("PW", " hemligt ")]).fixed_password.as_deref(),
            Some("hemligt")
        );
    }

    #[test]
    fn test_seed_resolution_order() {
        let config = config_from(&[
            ("KOSTNADSFRI_PASSWORD_SEED", "from-seed"),
            ("KOSTNADSFRI_API_KEY", "from-key"),
        ]);
        assert_eq!(config.resolve_seed(Some("cli"), false).unwrap().expose(), "cli");
        assert_eq!(config.resolve_seed(None, false).unwrap().expose(), "from-seed");
        assert_eq!(config.resolve_seed(Some("  "), false).unwrap().expose(), "from-seed");

        let key_only = config_from(&[("KOSTNADSFRI_API_KEY", "from-key")]);
        assert_eq!(key_only.resolve_seed(None, false).unwrap().expose(), "from-key");
    }

    #[test]
    fn test_missing_seed_is_a_config_error() {
        let config = config_from(&[("KOSTNADSFRI_PASSWORD_SEED", "")]);
        assert!(matches!(
            config.resolve_seed(None, false),
            Err(ConfigError::MissingSeed)
        ));
    }

    #[test]
    fn test_insecure_seed_requires_opt_in() {
        let config = config_from(&[]);
        let seed = config.resolve_seed(None, true).unwrap();
        assert!(seed.is_insecure_test_seed());

        let config = config_from(&[("KOSTNADSFRI_ALLOW_INSECURE_SEED", "yes")]);
        assert!(config.resolve_seed(None, false).unwrap().is_insecure_test_seed());

        let config = config_from(&[("KOSTNADSFRI_ALLOW_INSECURE_SEED", "0")]);
        assert!(config.resolve_seed(None, false).is_err());
    }

    #[test]
    fn test_require_api_key() {
        assert!(matches!(
            config_from(&[]).require_api_key(),
            Err(ConfigError::MissingApiKey)
        ));
        assert_eq!(
            config_from(&[("KOSTNADSFRI_API_KEY", "k")]).require_api_key().unwrap(),
            "k"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = config_from(&[
            ("KOSTNADSFRI_PASSWORD_SEED", "very-secret"),
            ("PW", "hemligt"),
        ]);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("hemligt"));
    }
}
