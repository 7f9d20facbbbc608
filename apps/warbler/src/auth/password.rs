//! Password hashing using bcrypt

use std::fmt::Debug;

use tracing::warn;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Scheme marker every hash produced by [`BcryptHasher`] starts with.
pub const BCRYPT_MARKER: &str = "$2b$";

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Derive a salted one-way hash of `password`.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check `password` against a stored hash. Unparsable hashes verify as false.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// bcrypt-based password hasher with a tunable cost factor
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Hashing,
                format!("Failed to hash password: {e}"),
            )
        })
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::directory::MIN_BCRYPT_COST;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(MIN_BCRYPT_COST)
    }

    #[test]
    fn test_hash_has_scheme_marker_and_hides_input() {
        let hash = hasher().hash("password").unwrap();
        assert_ne!(hash, "password");
        assert!(hash.starts_with(BCRYPT_MARKER));
        assert!(hash.starts_with("$2b$04$"));
    }

    #[test]
    fn test_hash_is_salted() {
        let h = hasher();
        let hash1 = h.hash("password").unwrap();
        let hash2 = h.hash("password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(h.verify("password", &hash1));
        assert!(h.verify("password", &hash2));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let h = hasher();
        assert!(!h.verify("password", "HASHED_PASSWORD"));
        assert!(!h.verify("password", ""));
    }

    #[test]
    fn test_invalid_cost_is_infra_error() {
        let err = BcryptHasher::new(2).hash("password").unwrap_err();
        assert!(matches!(err, DomainError::Infra(InfraErrorKind::Hashing, _)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_hash_verifies_only_its_own_password(
            password in "[ -~]{0,40}",
            other in "[ -~]{0,40}",
        ) {
            let h = hasher();
            let hash = h.hash(&password).unwrap();
            prop_assert!(hash.starts_with(BCRYPT_MARKER));
            prop_assert!(h.verify(&password, &hash));
            if other != password {
                prop_assert!(!h.verify(&other, &hash));
            }
        }
    }
}
