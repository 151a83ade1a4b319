//! Argon2 password hashing for student and admin accounts.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

use crate::error::{AlertError, Result};

/// Hash a plaintext password into a PHC string, e.g. `$argon2id$v=19$…`.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AlertError::Password(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a candidate password against a stored PHC string.
pub fn verify_password(stored: &str, candidate: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| AlertError::Password(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "hunter2").unwrap());
        assert!(!verify_password(&hash, "hunter3").unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        match verify_password("not-a-phc-string", "hunter2") {
            Err(AlertError::Password(_)) => {}
            other => panic!("expected Password error, got {:?}", other),
        }
    }
}
