use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RefreshToken;
use crate::domain::repositories::{DomainResult, QueryGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenRelation {
    AdminUser,
}

#[derive(Debug, Clone, Default)]
pub struct RefreshTokenFilter {
    pub id: Option<i32>,
    pub token: Option<String>,
    pub admin_user_id: Option<i32>,
}

impl RefreshTokenFilter {
    pub fn by_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn by_owner(admin_user_id: i32) -> Self {
        Self {
            admin_user_id: Some(admin_user_id),
            ..Default::default()
        }
    }
}

/// Result of a revocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// This call wrote the revocation timestamp
    Revoked { at: DateTime<Utc> },
    /// An earlier call already did; `at` is the original timestamp
    AlreadyRevoked { at: DateTime<Utc> },
    NotFound,
}

/// Refresh Token Store.
///
/// Unlike the staged gateway writes, `persist` and `revoke` hit the store
/// immediately.
#[async_trait]
pub trait RefreshTokenRepository:
    QueryGateway<Entity = RefreshToken, Filter = RefreshTokenFilter, Relation = RefreshTokenRelation>
{
    /// Insert a new token and return it with its id. A token string that
    /// already exists is a persistence error.
    async fn persist(&self, token: RefreshToken) -> DomainResult<RefreshToken>;

    /// Raw lookup regardless of state.
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>>;

    /// The token with its owner loaded, only if it is active at `now`.
    async fn get_valid(&self, token: &str, now: DateTime<Utc>)
        -> DomainResult<Option<RefreshToken>>;

    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> DomainResult<RevokeOutcome>;
}
