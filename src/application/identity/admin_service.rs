//! Admin account management
//!
//! Role checks happen at the HTTP boundary; this service assumes the caller
//! is allowed to perform the operation.

use std::sync::Arc;

use tracing::info;

use crate::domain::admin_user::{AdminUserFilter, USERNAME_MAX_LEN};
use crate::domain::repositories::{QueryGateway, UnitOfWork, UnitOfWorkFactory};
use crate::domain::{AdminRole, AdminUser, DomainError, DomainResult};
use crate::infrastructure::crypto::CredentialHasher;
use crate::shared::{Clock, SharedClock};

/// Partial update of an admin account
#[derive(Debug, Clone, Default)]
pub struct AdminUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct AdminService {
    uow: Arc<dyn UnitOfWorkFactory>,
    hasher: Arc<dyn CredentialHasher>,
    clock: SharedClock,
}

fn validate_username(username: &str) -> DomainResult<()> {
    if username.trim().is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "Username must be 1-{} characters",
            USERNAME_MAX_LEN
        )));
    }
    Ok(())
}

fn not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity: "AdminUser",
        field: "id",
        value: id.to_string(),
    }
}

impl AdminService {
    pub fn new(
        uow: Arc<dyn UnitOfWorkFactory>,
        hasher: Arc<dyn CredentialHasher>,
        clock: SharedClock,
    ) -> Self {
        Self { uow, hasher, clock }
    }

    async fn load(&self, uow: &dyn UnitOfWork, id: i32) -> DomainResult<AdminUser> {
        uow.admin_users()
            .get_one(&AdminUserFilter::by_id(id), &[])
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create an active account. Usernames are unique across active and
    /// inactive accounts.
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
        role: AdminRole,
    ) -> DomainResult<AdminUser> {
        validate_username(username)?;
        if password.is_empty() {
            return Err(DomainError::Validation("Password is required".into()));
        }

        let uow = self.uow.begin();
        let existing = uow
            .admin_users()
            .get_one(&AdminUserFilter::by_username(username), &[])
            .await?;
        if existing.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }

        let hash = self.hasher.hash(password, username)?;
        uow.admin_users()
            .add(AdminUser::new(username, hash, role, self.clock.now()));
        uow.commit().await?;

        let user = uow
            .admin_users()
            .get_one(&AdminUserFilter::by_username(username), &[])
            .await?
            .ok_or_else(|| {
                DomainError::Persistence("Admin created but could not be retrieved".into())
            })?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "Admin account created");
        Ok(user)
    }

    /// Active accounts only.
    pub async fn list_admins(&self) -> DomainResult<Vec<AdminUser>> {
        self.uow
            .begin()
            .admin_users()
            .get_all(Some(&AdminUserFilter::active()), &[])
            .await
    }

    pub async fn get_admin(&self, id: i32) -> DomainResult<AdminUser> {
        let uow = self.uow.begin();
        self.load(uow.as_ref(), id).await
    }

    pub async fn update_admin(&self, id: i32, update: AdminUpdate) -> DomainResult<AdminUser> {
        let uow = self.uow.begin();
        let mut user = self.load(uow.as_ref(), id).await?;

        if let Some(username) = update.username {
            validate_username(&username)?;
            if username != user.username {
                let taken = uow
                    .admin_users()
                    .get_one(&AdminUserFilter::by_username(username.as_str()), &[])
                    .await?;
                if taken.is_some() {
                    return Err(DomainError::Conflict("Username already exists".into()));
                }
                user.username = username;
            }
        }

        if let Some(password) = update.password {
            if password.is_empty() {
                return Err(DomainError::Validation("Password must not be empty".into()));
            }
            user.password_hash = self.hasher.hash(&password, &user.username)?;
        }

        uow.admin_users().update(user.clone());
        uow.commit().await?;

        info!(user_id = user.id, "Admin account updated");
        Ok(user)
    }

    /// Hard delete; the account's refresh tokens go with it.
    pub async fn delete_admin(&self, id: i32) -> DomainResult<()> {
        let uow = self.uow.begin();
        let user = self.load(uow.as_ref(), id).await?;
        uow.admin_users().remove(user);
        uow.commit().await?;

        info!(user_id = id, "Admin account deleted");
        Ok(())
    }

    pub async fn set_active(&self, id: i32, active: bool) -> DomainResult<AdminUser> {
        let uow = self.uow.begin();
        let mut user = self.load(uow.as_ref(), id).await?;
        if user.is_active != active {
            user.is_active = active;
            uow.admin_users().update(user.clone());
            uow.commit().await?;
            info!(user_id = id, active, "Admin account activation changed");
        }
        Ok(user)
    }

    /// Create the configured SuperAdmin when no admin account exists yet.
    /// Returns `true` when an account was created.
    pub async fn ensure_bootstrap_admin(&self, username: &str, password: &str) -> DomainResult<bool> {
        let uow = self.uow.begin();
        let any = uow.admin_users().get_one(&AdminUserFilter::default(), &[]).await?;
        if any.is_some() {
            return Ok(false);
        }

        self.create_admin(username, password, AdminRole::SuperAdmin).await?;
        info!(username, "Bootstrap SuperAdmin created");
        Ok(true)
    }
}
