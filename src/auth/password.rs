use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a candidate password against a stored bcrypt verifier.
///
/// bcrypt compares digests in constant time. A stored value that is not a
/// bcrypt hash can never match, so a verification error is logged and
/// treated as a mismatch; the login route then answers exactly as it would
/// for a wrong password.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or_else(|e| {
        log::error!("Failed to verify password: {}", e);
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_plaintext_verifier_never_matches() {
        // A verifier stored as plaintext must not be accepted by equality.
        assert!(!verify_password("hunter2", "hunter2"));
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        assert!(!verify_password("test_password123", "invalidhashformat"));
    }
}
