use chrono::{DateTime, Utc};

use super::AdminUser;
use crate::domain::repositories::QueryGateway;

/// Relations of an admin account that can be eager-loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminUserRelation {
    RefreshTokens,
}

#[derive(Debug, Clone, Default)]
pub struct AdminUserFilter {
    pub id: Option<i32>,
    /// Exact match
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

impl AdminUserFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }
}

pub trait AdminUserRepository:
    QueryGateway<Entity = AdminUser, Filter = AdminUserFilter, Relation = AdminUserRelation>
{
    /// Stage a write of `last_login_at` alone. Other columns keep whatever
    /// the store holds at commit time.
    fn stamp_last_login(&self, id: i32, at: DateTime<Utc>);
}
