//! Password hashing utilities

use bcrypt::DEFAULT_COST;

use crate::shared::errors::{DomainResult, InfraError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerification {
    Success,
    Failed,
}

/// One-way password hashing for admin accounts.
///
/// A wrong password is `Ok(Failed)`; only an unreadable stored digest is an
/// error.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, raw_password: &str, identity: &str) -> DomainResult<String>;

    fn verify(
        &self,
        identity: &str,
        stored_digest: &str,
        supplied_password: &str,
    ) -> DomainResult<PasswordVerification>;
}

/// bcrypt with a per-digest random salt. The salt lives inside the digest,
/// so `identity` plays no part in the computation.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, raw_password: &str, _identity: &str) -> DomainResult<String> {
        Ok(bcrypt::hash(raw_password, self.cost).map_err(InfraError::from)?)
    }

    fn verify(
        &self,
        _identity: &str,
        stored_digest: &str,
        supplied_password: &str,
    ) -> DomainResult<PasswordVerification> {
        let matched = bcrypt::verify(supplied_password, stored_digest).map_err(InfraError::from)?;
        Ok(if matched {
            PasswordVerification::Success
        } else {
            PasswordVerification::Failed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::DomainError;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn correct_password_verifies() {
        let h = hasher();
        let digest = h.hash("correct-pw", "admin1").unwrap();
        assert_ne!(digest, "correct-pw");
        assert_eq!(
            h.verify("admin1", &digest, "correct-pw").unwrap(),
            PasswordVerification::Success
        );
    }

    #[test]
    fn wrong_password_fails_without_error() {
        let h = hasher();
        let digest = h.hash("correct-pw", "admin1").unwrap();
        assert_eq!(
            h.verify("admin1", &digest, "wrong-pw").unwrap(),
            PasswordVerification::Failed
        );
    }

    #[test]
    fn equal_passwords_get_distinct_digests() {
        let h = hasher();
        assert_ne!(h.hash("same", "a").unwrap(), h.hash("same", "a").unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        let err = hasher().verify("admin1", "not-a-bcrypt-hash", "pw").unwrap_err();
        assert!(matches!(err, DomainError::Crypto(_)));
    }
}
