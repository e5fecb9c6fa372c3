//! Company name → URL slug.
//!
//! The normalisation must stay byte-compatible with the backend's
//! `generateSlug`, otherwise the derived passwords stop matching.

use std::fmt;

use serde::Serialize;

use crate::credentials::CredentialError;

/// Maximum length accepted for a slug typed in by a user or passed to the API.
pub const MAX_SLUG_LENGTH: usize = 100;

/// The only non-ASCII letters that are folded. Anything else outside
/// `[a-z0-9]` becomes a separator.
const ACCENT_FOLDS: &[(char, char)] = &[('å', 'a'), ('ä', 'a'), ('ö', 'o'), ('é', 'e'), ('ü', 'u')];

/// Derives the slug for a company name.
///
/// Lowercases and trims, folds the accents in [`ACCENT_FOLDS`], turns every run
/// of characters outside `[a-z0-9]` into a single hyphen, and drops leading and
/// trailing hyphens. May return an empty string; use
/// [`Slug::from_company_name`] where an empty slug must be rejected.
pub fn derive_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    // Single pass: a separator is only written once the next kept character
    // shows up, so leading, trailing and repeated hyphens never appear.
    for ch in lowered.trim().chars().map(fold_accent) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    slug
}

fn fold_accent(ch: char) -> char {
    ACCENT_FOLDS
        .iter()
        .find(|(accented, _)| *accented == ch)
        .map(|(_, plain)| *plain)
        .unwrap_or(ch)
}

/// A validated, non-empty slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derives a slug from a company name, rejecting names that are blank or
    /// normalise to nothing (e.g. `"!!!"` or `"東京"`).
    pub fn from_company_name(name: &str) -> Result<Self, CredentialError> {
        if name.trim().is_empty() {
            return Err(CredentialError::EmptyCompanyName);
        }

        let slug = derive_slug(name);
        if slug.is_empty() {
            return Err(CredentialError::EmptySlug {
                name: name.to_string(),
            });
        }

        Ok(Self(slug))
    }

    /// Accepts a slug entered directly (interactive mode, HTTP query).
    ///
    /// Trimmed and lowercased; allows `[a-z0-9_-]` up to [`MAX_SLUG_LENGTH`]
    /// characters. Underscores are tolerated because older embed slugs use them.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let slug = raw.trim().to_lowercase();

        if slug.is_empty() {
            return Err(CredentialError::InvalidSlug {
                slug,
                reason: "slug is required".to_string(),
            });
        }

        if slug.chars().count() > MAX_SLUG_LENGTH {
            return Err(CredentialError::InvalidSlug {
                slug,
                reason: format!("slug must be at most {MAX_SLUG_LENGTH} characters"),
            });
        }

        let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_';
        if !slug.chars().all(allowed) {
            return Err(CredentialError::InvalidSlug {
                slug,
                reason: "slug must contain only letters, numbers, hyphens and underscores"
                    .to_string(),
            });
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
