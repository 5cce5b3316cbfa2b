//! Credential hashing.
//!
//! The rest of the workspace only sees the [`CredentialHasher`] capability.
//! Production wiring uses [`BcryptHasher`]; tests can substitute a cheap fake.

use bcrypt::DEFAULT_COST;
use std::env;

use crate::errors::AppError;

pub trait CredentialHasher: Send + Sync {
    /// Produces an opaque digest for `password`.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Checks `password` against a digest produced by [`CredentialHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Reads the work factor from `BCRYPT_COST`, falling back to bcrypt's default.
    pub fn from_env() -> Self {
        let cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_COST);

        Self::new(cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the suite fast.
    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hasher().hash("pw1").unwrap();
        assert!(!hash.is_empty());
        assert_ne!(hash, "pw1");
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hasher().hash("correctpassword").unwrap();
        assert!(hasher().verify("correctpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_incorrect_password() {
        let hash = hasher().hash("correctpassword").unwrap();
        assert!(!hasher().verify("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(hasher().verify("pw", "not_a_valid_bcrypt_hash").is_err());
    }

    #[test]
    fn test_hash_generates_unique_salts() {
        let h1 = hasher().hash("samepassword").unwrap();
        let h2 = hasher().hash("samepassword").unwrap();

        assert_ne!(h1, h2);
        assert!(hasher().verify("samepassword", &h1).unwrap());
        assert!(hasher().verify("samepassword", &h2).unwrap());
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(BcryptHasher::default().cost(), DEFAULT_COST);
    }
}
