//! Identity module: admin sessions & account management
//!
//! `AuthSessionService` drives login, refresh and logout.
//! `AdminService` manages admin accounts.

pub mod admin_service;
pub mod service;

pub use admin_service::{AdminService, AdminUpdate};
pub use service::{AuthSessionService, LoginResult, LogoutResult, RefreshResult};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::crypto::{BcryptHasher, JwtConfig, TokenIssuer};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::SeaOrmUnitOfWorkFactory;
    use crate::shared::FixedClock;

    pub struct Fixture {
        pub uow: Arc<SeaOrmUnitOfWorkFactory>,
        pub hasher: Arc<BcryptHasher>,
        pub issuer: TokenIssuer,
        pub clock: Arc<FixedClock>,
    }

    pub async fn fixture() -> Fixture {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        Fixture {
            uow: Arc::new(SeaOrmUnitOfWorkFactory::new(db)),
            hasher: Arc::new(BcryptHasher::new(4)),
            issuer: TokenIssuer::new(JwtConfig {
                secret: "test-signing-key-0123456789abcdef".into(),
                issuer: "billboard-api".into(),
                audience: "billboard-admin".into(),
            }),
            clock: Arc::new(FixedClock::new(
                Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap(),
            )),
        }
    }
}
