//! Auth session workflow: login, refresh, logout
//!
//! A session is created by a successful login (one new refresh token row),
//! renewed by refresh (new access token, same refresh token) and ended by
//! logout (refresh token revoked). Revocation is terminal.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::admin_user::{AdminUser, AdminUserFilter, AdminUserRepository};
use crate::domain::refresh_token::{RefreshTokenRepository, RevokeOutcome};
use crate::domain::repositories::{QueryGateway, UnitOfWork, UnitOfWorkFactory};
use crate::domain::{AuthFailure, DomainError, DomainResult, RefreshToken};
use crate::infrastructure::crypto::{
    CredentialHasher, IssuedAccessToken, PasswordVerification, TokenIssuer,
};
use crate::shared::{Clock, SharedClock};

/// Tokens and account returned after a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: IssuedAccessToken,
    pub refresh_token: RefreshToken,
    pub user: AdminUser,
}

#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub access_token: IssuedAccessToken,
    /// The presented refresh token, unchanged
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct LogoutResult {
    pub revoked_token: String,
    pub revoked_at: chrono::DateTime<chrono::Utc>,
}

fn record(name: &'static str, outcome: &'static str) {
    metrics::counter!(name, "outcome" => outcome).increment(1);
}

pub struct AuthSessionService {
    uow: Arc<dyn UnitOfWorkFactory>,
    hasher: Arc<dyn CredentialHasher>,
    issuer: TokenIssuer,
    clock: SharedClock,
}

impl AuthSessionService {
    pub fn new(
        uow: Arc<dyn UnitOfWorkFactory>,
        hasher: Arc<dyn CredentialHasher>,
        issuer: TokenIssuer,
        clock: SharedClock,
    ) -> Self {
        Self {
            uow,
            hasher,
            issuer,
            clock,
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    // ── Login ───────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResult> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Username and password are required".into(),
            ));
        }

        let uow = self.uow.begin();
        let user = uow
            .admin_users()
            .get_one(&AdminUserFilter::by_username(username), &[])
            .await?;

        let Some(mut user) = user else {
            record("auth_login_total", "user_not_found");
            info!(username, "Login rejected: unknown user");
            return Err(AuthFailure::UserNotFound.into());
        };

        if !user.is_active {
            record("auth_login_total", "disabled");
            info!(user_id = user.id, "Login rejected: account disabled");
            return Err(AuthFailure::AccountDisabled.into());
        }

        if self
            .hasher
            .verify(&user.username, &user.password_hash, password)?
            == PasswordVerification::Failed
        {
            record("auth_login_total", "bad_credentials");
            info!(user_id = user.id, "Login rejected: bad password");
            return Err(AuthFailure::InvalidCredentials.into());
        }

        let now = self.clock.now();
        let access_token = self
            .issuer
            .issue_access_token(user.id, &user.username, user.role, now)?;
        let issued = self.issuer.issue_refresh_token(user.id, now);
        let token = issued.token.clone();

        // Token row and last-login stamp land together or not at all.
        uow.refresh_tokens().add(issued);
        uow.admin_users().stamp_last_login(user.id, now);
        uow.commit().await.map_err(|e| match e {
            DomainError::Conflict(msg) => {
                DomainError::Persistence(format!("refresh token collision: {}", msg))
            }
            other => other,
        })?;

        let refresh_token = uow
            .refresh_tokens()
            .find_by_token(&token)
            .await?
            .ok_or_else(|| DomainError::Persistence("issued refresh token was not stored".into()))?;
        user.last_login_at = Some(now);

        record("auth_login_total", "success");
        info!(user_id = user.id, username = %user.username, role = %user.role, "Admin logged in");

        Ok(LoginResult {
            access_token,
            refresh_token,
            user,
        })
    }

    // ── Refresh ─────────────────────────────────────────────────

    /// Mint a new access token for the owner of an active refresh token.
    /// The refresh token itself is not rotated. An empty token is rejected
    /// like any other unknown one.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<RefreshResult> {
        if refresh_token.is_empty() {
            record("auth_refresh_total", "rejected");
            return Err(AuthFailure::InvalidOrExpiredToken.into());
        }

        let now = self.clock.now();
        let uow = self.uow.begin();
        let stored = uow.refresh_tokens().get_valid(refresh_token, now).await?;

        let Some((stored, owner)) = stored.and_then(|t| {
            let owner = t.admin_user.clone()?;
            Some((t, owner))
        }) else {
            record("auth_refresh_total", "rejected");
            return Err(AuthFailure::InvalidOrExpiredToken.into());
        };

        let access_token = self
            .issuer
            .issue_access_token(owner.id, &owner.username, owner.role, now)?;

        record("auth_refresh_total", "success");
        info!(user_id = owner.id, token_id = stored.id, "Access token refreshed");

        Ok(RefreshResult {
            access_token,
            refresh_token: stored.token,
        })
    }

    // ── Logout ──────────────────────────────────────────────────

    pub async fn logout(&self, refresh_token: &str) -> DomainResult<LogoutResult> {
        if refresh_token.is_empty() {
            return Err(DomainError::Validation("Refresh token is required".into()));
        }

        let now = self.clock.now();
        let uow = self.uow.begin();
        let Some(stored) = uow.refresh_tokens().get_valid(refresh_token, now).await? else {
            record("auth_logout_total", "not_found");
            return Err(DomainError::InvalidToken);
        };

        let revoked_at = match uow.refresh_tokens().revoke(&stored.token, now).await? {
            RevokeOutcome::Revoked { at } => at,
            RevokeOutcome::AlreadyRevoked { at } => {
                warn!(token_id = stored.id, "Refresh token revoked concurrently");
                at
            }
            RevokeOutcome::NotFound => {
                record("auth_logout_total", "not_found");
                return Err(DomainError::InvalidToken);
            }
        };

        record("auth_logout_total", "success");
        info!(user_id = stored.admin_user_id, token_id = stored.id, "Admin logged out");

        Ok(LogoutResult {
            revoked_token: stored.token,
            revoked_at,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The account behind an access token's subject.
    pub async fn current_user(&self, user_id: i32) -> DomainResult<AdminUser> {
        self.uow
            .begin()
            .admin_users()
            .get_one(&AdminUserFilter::by_id(user_id), &[])
            .await?
            .ok_or(DomainError::NotFound {
                entity: "AdminUser",
                field: "id",
                value: user_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;
    use crate::domain::address::AddressRepository;
    use crate::domain::billboard::BillboardRepository;
    use crate::domain::booking::BookingRepository;
    use crate::domain::client::ClientRepository;
    use crate::domain::contact::ContactInquiryRepository;
    use crate::application::identity::testing::{fixture, Fixture};
    use crate::application::identity::AdminService;
    use crate::domain::refresh_token::RefreshTokenFilter;
    use crate::domain::AdminRole;

    async fn service_with_admin() -> (Fixture, AuthSessionService) {
        let f = fixture().await;
        let admins = AdminService::new(f.uow.clone(), f.hasher.clone(), f.clock.clone());
        admins
            .create_admin("admin1", "correct-pw", AdminRole::Admin)
            .await
            .unwrap();

        let svc = AuthSessionService::new(
            f.uow.clone(),
            f.hasher.clone(),
            f.issuer.clone(),
            f.clock.clone(),
        );
        (f, svc)
    }

    async fn token_rows(f: &Fixture) -> Vec<RefreshToken> {
        f.uow.begin().refresh_tokens().get_all(None, &[]).await.unwrap()
    }

    #[tokio::test]
    async fn login_issues_one_seven_day_refresh_token() {
        let (f, svc) = service_with_admin().await;
        let now = f.clock.now();

        let result = svc.login("admin1", "correct-pw").await.unwrap();
        assert_eq!(result.user.username, "admin1");
        assert_eq!(result.user.last_login_at, Some(now));
        assert_eq!(result.access_token.expires_at, now + Duration::minutes(30));

        let rows = token_rows(&f).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].token, result.refresh_token.token);
        assert_eq!(rows[0].expires_at, now + Duration::days(7));
        assert_eq!(rows[0].revoked_at(), None);

        let stored = svc.current_user(result.user.id).await.unwrap();
        assert_eq!(stored.last_login_at, Some(now));
    }

    #[tokio::test]
    async fn login_failures_are_distinguished_and_leave_no_token() {
        let (f, svc) = service_with_admin().await;

        let err = svc.login("ghost", "whatever").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(AuthFailure::UserNotFound)));

        let err = svc.login("admin1", "wrong-pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(AuthFailure::InvalidCredentials)));

        let admins = AdminService::new(f.uow.clone(), f.hasher.clone(), f.clock.clone());
        let user = svc.current_user(1).await.unwrap();
        admins.set_active(user.id, false).await.unwrap();
        let err = svc.login("admin1", "correct-pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(AuthFailure::AccountDisabled)));

        assert!(token_rows(&f).await.is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let (_f, svc) = service_with_admin().await;
        assert!(matches!(
            svc.login("", "pw").await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.logout("").await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn empty_refresh_token_is_unauthorized() {
        let (_f, svc) = service_with_admin().await;
        assert!(matches!(
            svc.refresh("").await.unwrap_err(),
            DomainError::Unauthorized(AuthFailure::InvalidOrExpiredToken)
        ));
    }

    /// Unit of work whose commit always fails after dropping its writes.
    struct LockedUnitOfWork(Box<dyn UnitOfWork>);

    #[async_trait]
    impl UnitOfWork for LockedUnitOfWork {
        fn admin_users(&self) -> &dyn AdminUserRepository {
            self.0.admin_users()
        }
        fn refresh_tokens(&self) -> &dyn RefreshTokenRepository {
            self.0.refresh_tokens()
        }
        fn billboards(&self) -> &dyn BillboardRepository {
            self.0.billboards()
        }
        fn addresses(&self) -> &dyn AddressRepository {
            self.0.addresses()
        }
        fn clients(&self) -> &dyn ClientRepository {
            self.0.clients()
        }
        fn bookings(&self) -> &dyn BookingRepository {
            self.0.bookings()
        }
        fn contacts(&self) -> &dyn ContactInquiryRepository {
            self.0.contacts()
        }
        fn pending_writes(&self) -> usize {
            self.0.pending_writes()
        }
        async fn commit(&self) -> DomainResult<usize> {
            self.0.discard();
            Err(DomainError::Persistence("database is locked".into()))
        }
        fn discard(&self) {
            self.0.discard()
        }
    }

    struct LockedFactory(Arc<dyn UnitOfWorkFactory>);

    impl UnitOfWorkFactory for LockedFactory {
        fn begin(&self) -> Box<dyn UnitOfWork> {
            Box::new(LockedUnitOfWork(self.0.begin()))
        }
    }

    #[tokio::test]
    async fn failed_login_commit_stores_no_token() {
        let (f, _) = service_with_admin().await;
        let svc = AuthSessionService::new(
            Arc::new(LockedFactory(f.uow.clone())),
            f.hasher.clone(),
            f.issuer.clone(),
            f.clock.clone(),
        );

        let err = svc.login("admin1", "correct-pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));

        assert!(token_rows(&f).await.is_empty());
        let user = svc.current_user(1).await.unwrap();
        assert_eq!(user.last_login_at, None);
    }

    #[tokio::test]
    async fn refresh_reuses_token_and_mints_new_access_token() {
        let (f, svc) = service_with_admin().await;
        let login = svc.login("admin1", "correct-pw").await.unwrap();

        f.clock.advance(Duration::minutes(10));
        let refreshed = svc.refresh(&login.refresh_token.token).await.unwrap();
        assert_eq!(refreshed.refresh_token, login.refresh_token.token);
        assert_ne!(refreshed.access_token.token, login.access_token.token);

        let claims = svc
            .issuer()
            .verify_access_token(&refreshed.access_token.token, f.clock.now())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.name, "admin1");
        assert_eq!(token_rows(&f).await.len(), 1);
    }

    #[tokio::test]
    async fn refresh_after_expiry_or_revocation_fails() {
        let (f, svc) = service_with_admin().await;
        let login = svc.login("admin1", "correct-pw").await.unwrap();
        let token = login.refresh_token.token.clone();

        f.clock.advance(Duration::days(7));
        let err = svc.refresh(&token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(AuthFailure::InvalidOrExpiredToken)));

        f.clock.set(login.refresh_token.created_at);
        let second = svc.login("admin1", "correct-pw").await.unwrap();
        svc.logout(&second.refresh_token.token).await.unwrap();
        f.clock.advance(Duration::seconds(1));
        let err = svc.refresh(&second.refresh_token.token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(AuthFailure::InvalidOrExpiredToken)));

        let err = svc.refresh("never-issued").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(AuthFailure::InvalidOrExpiredToken)));
    }

    #[tokio::test]
    async fn long_lived_token_still_refreshes() {
        let (f, svc) = service_with_admin().await;
        let login = svc.login("admin1", "correct-pw").await.unwrap();

        let uow = f.uow.begin();
        let mut row = uow
            .refresh_tokens()
            .get_one(&RefreshTokenFilter::by_token(&login.refresh_token.token), &[])
            .await
            .unwrap()
            .unwrap();
        row.expires_at = f.clock.now() + Duration::days(3650);
        uow.refresh_tokens().update(row);
        uow.commit().await.unwrap();

        f.clock.advance(Duration::days(30));
        let refreshed = svc.refresh(&login.refresh_token.token).await.unwrap();
        assert_eq!(refreshed.access_token.expires_at, f.clock.now() + Duration::minutes(30));
    }

    #[tokio::test]
    async fn logout_revokes_once_and_rejects_unknown_tokens() {
        let (f, svc) = service_with_admin().await;
        let login = svc.login("admin1", "correct-pw").await.unwrap();
        let logout_at = f.clock.now();

        let out = svc.logout(&login.refresh_token.token).await.unwrap();
        assert_eq!(out.revoked_token, login.refresh_token.token);
        assert_eq!(out.revoked_at, logout_at);

        f.clock.advance(Duration::minutes(1));
        assert!(matches!(
            svc.logout(&login.refresh_token.token).await.unwrap_err(),
            DomainError::InvalidToken
        ));
        assert!(matches!(
            svc.logout("never-issued").await.unwrap_err(),
            DomainError::InvalidToken
        ));

        let rows = token_rows(&f).await;
        assert_eq!(rows[0].revoked_at(), Some(logout_at));
    }

    #[tokio::test]
    async fn concurrent_logins_open_independent_sessions() {
        let (f, svc) = service_with_admin().await;
        let a = svc.login("admin1", "correct-pw").await.unwrap();
        let b = svc.login("admin1", "correct-pw").await.unwrap();
        assert_ne!(a.refresh_token.token, b.refresh_token.token);

        svc.logout(&a.refresh_token.token).await.unwrap();
        assert!(svc.refresh(&b.refresh_token.token).await.is_ok());
        assert_eq!(token_rows(&f).await.len(), 2);
    }
}
