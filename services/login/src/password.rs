//! Password hashing.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::LoginServiceError;

/// Hash a password with Argon2id and a fresh random salt, producing a PHC
/// string safe to persist. Parameters come from `Argon2::default()` (OWASP
/// recommended m=19456, t=2, p=1).
pub fn hash_password(plaintext: &str) -> Result<String, LoginServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| LoginServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC digest.
///
/// Returns `false` for a malformed digest rather than erroring; the
/// comparison itself is constant-time inside argon2.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
