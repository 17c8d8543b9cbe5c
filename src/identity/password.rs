//! Password hashing and verification.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::error::IdentityError;

/// Hash a plaintext password into a PHC-encoded Argon2id string.
///
/// A fresh random salt is drawn on every call, so hashing the same password
/// twice yields two different stored forms. The work factor travels inside
/// the encoded string.
///
/// # Errors
///
/// Returns [`IdentityError::Hashing`] if the hasher rejects the input.
pub fn hash(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| IdentityError::Hashing)
}

/// Verify a plaintext password against a stored form.
///
/// Mismatches and malformed stored values both verify as `false`; this never
/// errors on bad input.
#[must_use]
pub fn verify(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
