//! # Password Hashing
//!
//! Passwords are only ever stored as Argon2id PHC strings.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use super::errors::{AuthError, AuthResult};

/// Hash a password using Argon2id with a fresh random salt
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Verify a password against its hash
///
/// Comparison is constant-time inside the argon2 crate.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::WrongCredentials)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();

        assert_ne!(hash, "s3cret");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("same").unwrap();
        let hash2 = hash_password("same").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("same", &hash1).unwrap());
        assert!(verify_password("same", &hash2).unwrap());
    }

    #[test]
    fn test_garbage_hash_rejected() {
        assert_eq!(
            verify_password("pw", "not-a-phc-string"),
            Err(AuthError::WrongCredentials)
        );
    }
}
