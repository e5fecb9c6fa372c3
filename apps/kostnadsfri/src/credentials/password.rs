//! Deterministic password derivation.
//!
//! `HMAC-SHA256(seed, slug)` → first 12 hex chars (48 bits) → 8 base-54
//! symbols, least significant first. Every step is part of the compatibility
//! contract with the backend's `generatePassword`; changing any of them
//! invalidates every password already handed out.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::credentials::CredentialError;

type HmacSha256 = Hmac<Sha256>;

/// 54 symbols: no `i`, `l`, `o`, `I`, `O`, `0` or `1`.
pub const PASSWORD_ALPHABET: &[u8; 54] =
    b"abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ23456789";

pub const PASSWORD_LENGTH: usize = 8;

/// Number of leading digest bytes used (12 hex characters).
const DIGEST_PREFIX_BYTES: usize = 6;

/// Seed used only when insecure test mode is switched on explicitly.
pub const INSECURE_TEST_SEED: &str = "default-seed";

/// Secret key for password derivation. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordSeed(String);

impl PasswordSeed {
    pub fn new(seed: impl Into<String>) -> Result<Self, CredentialError> {
        let seed = seed.into();
        if seed.is_empty() {
            return Err(CredentialError::EmptySeed);
        }
        Ok(Self(seed))
    }

    /// The well-known fallback seed. Passwords derived from it are guessable.
    pub fn insecure_test_seed() -> Self {
        Self(INSECURE_TEST_SEED.to_string())
    }

    pub fn is_insecure_test_seed(&self) -> bool {
        self.0 == INSECURE_TEST_SEED
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Seed rendering for banners: long seeds show head and tail only.
    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }
}

impl fmt::Debug for PasswordSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordSeed").field(&self.masked()).finish()
    }
}

/// `abcdefgh...wxyz` for secrets longer than 12 chars, `abcdefgh...` for
/// 9..=12 chars, and the value itself when shorter.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let head: String = chars.iter().take(8).collect();
    match chars.len() {
        n if n > 12 => {
            let tail: String = chars[n - 4..].iter().collect();
            format!("{head}...{tail}")
        }
        n if n > 8 => format!("{head}..."),
        _ => secret.to_string(),
    }
}

/// Derives the 8-character password for `slug` under `seed`.
///
/// Pure and deterministic. An empty seed is accepted here; policy checks live
/// in [`PasswordSeed`].
pub fn derive_password(slug: &str, seed: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(seed.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(slug.as_bytes());
    let digest = mac.finalize().into_bytes();

    // First 12 hex chars of the hex digest == first 6 bytes, big-endian.
    let value = digest
        .iter()
        .take(DIGEST_PREFIX_BYTES)
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    encode_base54_lsd_first(value)
}

/// Emits exactly [`PASSWORD_LENGTH`] symbols in remainder order. Once the value
/// is exhausted the remaining positions are `a` (index 0).
fn encode_base54_lsd_first(mut value: u64) -> String {
    let base = PASSWORD_ALPHABET.len() as u64;
    let mut password = String::with_capacity(PASSWORD_LENGTH);
    for _ in 0..PASSWORD_LENGTH {
        password.push(char::from(PASSWORD_ALPHABET[(value % base) as usize]));
        value /= base;
    }
    password
}
