//! Slug and password derivation for kostnadsfri / Sajtstudio links.
//!
//! Pure functions only: no I/O, no shared state, safe to call from any thread.

pub mod display;
pub mod password;
pub mod slug;

use serde::Serialize;
use thiserror::Error;

pub use display::{looks_like_slug, slug_to_display};
pub use password::{derive_password, PasswordSeed};
pub use slug::Slug;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Company name is empty")]
    EmptyCompanyName,

    #[error("Company name '{name}' does not produce a usable slug")]
    EmptySlug { name: String },

    #[error("Invalid slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    #[error("Password seed is empty")]
    EmptySeed,
}

/// Slug plus the password derived for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub slug: Slug,
    pub password: String,
}

impl Credentials {
    pub fn for_slug(slug: Slug, seed: &PasswordSeed) -> Self {
        let password = derive_password(slug.as_str(), seed.expose());
        Self { slug, password }
    }
}

/// Company name → validated slug → deterministic password.
pub fn derive_credentials(name: &str, seed: &PasswordSeed) -> Result<Credentials, CredentialError> {
    let slug = Slug::from_company_name(name)?;
    Ok(Credentials::for_slug(slug, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> PasswordSeed {
        PasswordSeed::new("test-seed-123").unwrap()
    }

    #[test]
    fn test_derive_credentials_known_vector() {
        let creds = derive_credentials("IKEA AB", &seed()).unwrap();
        assert_eq!(creds.slug.as_str(), "ikea-ab");
        assert_eq!(creds.password, "zxeDPvUb");
    }

    #[test]
    fn test_same_slug_same_password() {
        let a = derive_credentials("  IKEA   AB!! ", &seed()).unwrap();
        let b = derive_credentials("ikea ab", &seed()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_credentials_rejects_empty_slug() {
        assert!(matches!(
            derive_credentials("", &seed()),
            Err(CredentialError::EmptyCompanyName)
        ));
        assert!(matches!(
            derive_credentials("???", &seed()),
            Err(CredentialError::EmptySlug { .. })
        ));
    }

    #[test]
    fn test_credentials_serialize_flat() {
        let creds = derive_credentials("Café Södermalm", &seed()).unwrap();
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["slug"], "cafe-sodermalm");
        assert_eq!(json["password"], "G7R4qxSN");
    }
}
