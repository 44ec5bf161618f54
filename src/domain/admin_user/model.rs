use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::refresh_token::RefreshToken;

/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 50;

/// Administrative role carried in the access token's role claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Employee,
}

impl AdminRole {
    pub const ALL: [AdminRole; 3] = [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "SuperAdmin",
            AdminRole::Admin => "Admin",
            AdminRole::Employee => "Employee",
        }
    }
}

impl Default for AdminRole {
    fn default() -> Self {
        Self::Admin
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminRole::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// Administrative account
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    /// bcrypt digest; plaintext is never stored
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub role: AdminRole,
    /// Loaded only when `AdminUserRelation::RefreshTokens` is requested
    pub refresh_tokens: Option<Vec<RefreshToken>>,
}

impl AdminUser {
    /// A new, active account that has not been persisted yet.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: AdminRole,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            username: username.into(),
            password_hash: password_hash.into(),
            created_at,
            last_login_at: None,
            is_active: true,
            role,
            refresh_tokens: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_claim_string() {
        for role in AdminRole::ALL {
            assert_eq!(role.as_str().parse::<AdminRole>().unwrap(), role);
        }
        assert_eq!("superadmin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert!("root".parse::<AdminRole>().is_err());
    }

    #[test]
    fn new_account_is_active_and_unsaved() {
        let user = AdminUser::new("admin1", "$2b$04$x", AdminRole::Employee, Utc::now());
        assert_eq!(user.id, 0);
        assert!(user.is_active);
        assert!(user.last_login_at.is_none());
    }
}
