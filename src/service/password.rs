//! Salted one-way password hashing (Argon2id, PHC string format).

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::warn;

use crate::error::SnipboxError;

/// Stand-in hash verified against when the username is unknown, so a failed
/// login costs the same Argon2 work whether or not the account exists.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash("snipbox-dummy-password").unwrap_or_default());

/// Hash `password` with a fresh random salt.
pub fn hash(password: &str) -> Result<String, SnipboxError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| SnipboxError::PasswordHash(e.to_string()))
}

/// True iff `password` matches `hash`. A malformed hash never verifies.
pub fn verify(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Run one verification against [`DUMMY_HASH`]. Always false.
pub fn verify_dummy(password: &str) -> bool {
    verify(password, &DUMMY_HASH);
    false
}
