//! Password hashing with Argon2id.
//!
//! Hashes are salted PHC strings; verification is constant-time inside the
//! argon2 crate. Plaintext passwords never touch the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{AppError, AppResult};

/// Hash a plaintext password into a PHC string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Database(format!("Password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored PHC string.
///
/// A non-matching password is `Ok(false)`; only a corrupt stored hash is an
/// error.
pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Database(format!("Invalid stored password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Database(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
