//! Password hashing and verification for CORKBOARD.
//!
//! Uses Argon2id for secure password hashing. The original board this
//! replaces compared plaintext passwords; storage here is always a
//! salted one-way hash.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and
/// parameters.
///
/// # Examples
///
/// ```
/// use corkboard::hash_password;
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches, or an error if it doesn't.
///
/// # Examples
///
/// ```
/// use corkboard::{hash_password, verify_password};
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(verify_password("my_secure_password", &hash).is_ok());
/// assert!(verify_password("wrong_password", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // The parameters are taken from the parsed hash
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter2hunter2", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("correct").unwrap();
        let err = verify_password("incorrect", &hash).unwrap_err();
        assert!(matches!(err, PasswordError::VerificationFailed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_hash_format() {
        let err = verify_password("anything", "not-a-phc-hash").unwrap_err();
        assert!(matches!(err, PasswordError::InvalidHash));
    }

    #[test]
    fn test_empty_password_roundtrip() {
        // The board accepts any password; even empty ones hash cleanly.
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).is_ok());
        assert!(verify_password("x", &hash).is_err());
    }
}
