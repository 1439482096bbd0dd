/// Credential hashing and verification using Argon2id
use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a credential using Argon2id with a random per-credential salt.
///
/// Returns a PHC-formatted hash string safe for database storage; the
/// clear-text credential is never retained.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Query(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a credential against its stored PHC hash.
///
/// `false` means mismatch; an `Err` means the stored hash is unreadable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Query(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Query(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = "Santi2025ucc";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(verify_password(password, &hash).expect("should verify successfully"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correcta").expect("should hash password successfully");
        assert!(!verify_password("incorrecta", &hash).expect("verification should succeed"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("repetida").expect("should hash successfully");
        let hash2 = hash_password("repetida").expect("should hash successfully");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }
}
