//! Password hashing.
//!
//! Hashes are PBKDF2-HMAC-SHA256 PHC strings, so the parameters travel with
//! each stored value and can be raised without invalidating old hashes.

use pbkdf2::{
    Algorithm, Params, Pbkdf2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const SALT_BYTES: usize = 16;

#[cfg(not(test))]
const ROUNDS: u32 = 260_000;

#[cfg(test)]
const ROUNDS: u32 = 1_000;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(pbkdf2::password_hash::Error),
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns an error if the salt cannot be encoded or hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0_u8; SALT_BYTES];

    OsRng.fill_bytes(&mut salt);

    let salt = SaltString::encode_b64(&salt).map_err(PasswordError::Hash)?;

    let hash = Pbkdf2
        .hash_password_customized(
            password.as_bytes(),
            Some(Algorithm::Pbkdf2Sha256.ident()),
            None,
            Params {
                rounds: ROUNDS,
                output_length: 32,
            },
            &salt,
        )
        .map_err(PasswordError::Hash)?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash. Malformed hashes never match.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}

#[must_use]
pub fn is_acceptable_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}
