use std::fmt;

use thiserror::Error;

/// Reason an authentication attempt was rejected.
///
/// Login keeps the three failure causes apart in its messages; token
/// failures are folded into `InvalidOrExpiredToken` so a caller cannot tell
/// an expired token from a revoked or unknown one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UserNotFound,
    AccountDisabled,
    InvalidCredentials,
    InvalidOrExpiredToken,
    MissingToken,
    InvalidAccessToken,
    ExpiredAccessToken,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserNotFound => write!(f, "User not found"),
            Self::AccountDisabled => write!(f, "Account is deactivated"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::InvalidOrExpiredToken => write!(f, "Invalid or expired refresh token"),
            Self::MissingToken => write!(f, "Missing authentication token"),
            Self::InvalidAccessToken => write!(f, "Invalid token"),
            Self::ExpiredAccessToken => write!(f, "Token has expired"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(AuthFailure),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid or expired refresh token")]
    InvalidToken,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Persistence(_))
    }

    /// Failures that must not leak their detail to an API caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Persistence(_) | DomainError::Crypto(_))
    }
}

impl From<AuthFailure> for DomainError {
    fn from(reason: AuthFailure) -> Self {
        DomainError::Unauthorized(reason)
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        match e {
            InfraError::Database(e) => DomainError::Persistence(e.to_string()),
            InfraError::Token(e) => DomainError::Crypto(e.to_string()),
            InfraError::Hash(e) => DomainError::Crypto(e.to_string()),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_render_distinct_login_messages() {
        let not_found = DomainError::from(AuthFailure::UserNotFound).to_string();
        let disabled = DomainError::from(AuthFailure::AccountDisabled).to_string();
        let bad_pw = DomainError::from(AuthFailure::InvalidCredentials).to_string();

        assert_eq!(not_found, "Unauthorized: User not found");
        assert_ne!(not_found, disabled);
        assert_ne!(disabled, bad_pw);
    }

    #[test]
    fn database_errors_become_internal_persistence_failures() {
        let err: DomainError =
            InfraError::Database(sea_orm::DbErr::Custom("connection reset".into())).into();

        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(err.is_transient());
        assert!(err.is_internal());
        assert!(!DomainError::Validation("x".into()).is_internal());
    }
}
