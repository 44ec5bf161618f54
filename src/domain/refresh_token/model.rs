use chrono::{DateTime, Duration, Utc};

use crate::domain::admin_user::AdminUser;

/// Access token lifetime
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;
/// Refresh token lifetime
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Revocation state of a refresh token.
///
/// Stored as a nullable `revoked_at` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Active,
    Revoked { at: DateTime<Utc> },
}

impl TokenState {
    pub fn from_revoked_at(revoked_at: Option<DateTime<Utc>>) -> Self {
        match revoked_at {
            Some(at) => TokenState::Revoked { at },
            None => TokenState::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshToken {
    pub id: i32,
    /// Opaque lookup key, unique across all tokens ever issued
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub state: TokenState,
    pub admin_user_id: i32,
    pub admin_user: Option<Box<AdminUser>>,
}

impl RefreshToken {
    pub fn new(token: impl Into<String>, admin_user_id: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            token: token.into(),
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            created_at: now,
            state: TokenState::Active,
            admin_user_id,
            admin_user: None,
        }
    }

    /// Not revoked and expiry strictly after `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        matches!(self.state, TokenState::Active) && self.expires_at > now
    }

    pub fn revoked_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            TokenState::Revoked { at } => Some(at),
            TokenState::Active => None,
        }
    }
}
