//! SeaORM implementation of UnitOfWork

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use tracing::{debug, warn};

use crate::domain::address::AddressRepository;
use crate::domain::admin_user::AdminUserRepository;
use crate::domain::billboard::BillboardRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::client::ClientRepository;
use crate::domain::contact::ContactInquiryRepository;
use crate::domain::refresh_token::RefreshTokenRepository;
use crate::domain::repositories::{UnitOfWork, UnitOfWorkFactory};
use crate::domain::{DomainError, DomainResult};

use super::address_repository::SeaOrmAddressRepository;
use super::admin_user_repository::SeaOrmAdminUserRepository;
use super::billboard_repository::SeaOrmBillboardRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::client_repository::SeaOrmClientRepository;
use super::contact_inquiry_repository::SeaOrmContactInquiryRepository;
use super::db_err;
use super::refresh_token_repository::SeaOrmRefreshTokenRepository;
use super::staging::Staging;

/// One unit of work backed by a shared connection pool.
///
/// ```ignore
/// let uow = SeaOrmUnitOfWork::new(db.clone());
/// let user = uow.admin_users().get_one(&AdminUserFilter::by_id(1), &[]).await?;
/// uow.admin_users().update(user);
/// uow.commit().await?;
/// ```
pub struct SeaOrmUnitOfWork {
    db: DatabaseConnection,
    staging: Staging,
    admin_users: SeaOrmAdminUserRepository,
    refresh_tokens: SeaOrmRefreshTokenRepository,
    billboards: SeaOrmBillboardRepository,
    addresses: SeaOrmAddressRepository,
    clients: SeaOrmClientRepository,
    bookings: SeaOrmBookingRepository,
    contacts: SeaOrmContactInquiryRepository,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        let staging = Staging::default();
        Self {
            admin_users: SeaOrmAdminUserRepository::new(db.clone(), staging.clone()),
            refresh_tokens: SeaOrmRefreshTokenRepository::new(db.clone(), staging.clone()),
            billboards: SeaOrmBillboardRepository::new(db.clone(), staging.clone()),
            addresses: SeaOrmAddressRepository::new(db.clone(), staging.clone()),
            clients: SeaOrmClientRepository::new(db.clone(), staging.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone(), staging.clone()),
            contacts: SeaOrmContactInquiryRepository::new(db.clone(), staging.clone()),
            db,
            staging,
        }
    }
}

fn commit_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::Validation(format!("Referenced record does not exist: {}", msg))
        }
        _ => match e {
            DbErr::RecordNotFound(msg) => DomainError::NotFound {
                entity: "record",
                field: "id",
                value: msg,
            },
            other => db_err(other),
        },
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn admin_users(&self) -> &dyn AdminUserRepository {
        &self.admin_users
    }

    fn refresh_tokens(&self) -> &dyn RefreshTokenRepository {
        &self.refresh_tokens
    }

    fn billboards(&self) -> &dyn BillboardRepository {
        &self.billboards
    }

    fn addresses(&self) -> &dyn AddressRepository {
        &self.addresses
    }

    fn clients(&self) -> &dyn ClientRepository {
        &self.clients
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn contacts(&self) -> &dyn ContactInquiryRepository {
        &self.contacts
    }

    fn pending_writes(&self) -> usize {
        self.staging.len()
    }

    async fn commit(&self) -> DomainResult<usize> {
        let writes = self.staging.take();
        if writes.is_empty() {
            return Ok(0);
        }
        let count = writes.len();

        let txn = self.db.begin().await.map_err(db_err)?;
        for write in writes {
            if let Err(e) = write.apply(&txn).await {
                warn!(error = %e, "Unit of work rolled back");
                txn.rollback().await.map_err(db_err)?;
                return Err(commit_err(e));
            }
        }
        txn.commit().await.map_err(db_err)?;

        debug!(writes = count, "Unit of work committed");
        Ok(count)
    }

    fn discard(&self) {
        self.staging.clear();
    }
}

/// Begins a fresh `SeaOrmUnitOfWork` per request.
#[derive(Clone)]
pub struct SeaOrmUnitOfWorkFactory {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UnitOfWorkFactory for SeaOrmUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(SeaOrmUnitOfWork::new(self.db.clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::address::{Address, AddressFilter, AddressRelation};
    use crate::domain::billboard::{Billboard, BillboardFilter, BillboardRelation};
    use crate::domain::booking::{Booking, BookingFilter, BookingRelation};
    use crate::domain::client::{Client, ClientFilter, ClientRelation};
    use crate::domain::contact::{ContactInquiry, ContactInquiryFilter, ContactStatus};
    use crate::domain::repositories::QueryGateway;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::shared::PaginationParams;

    async fn uow() -> SeaOrmUnitOfWork {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmUnitOfWork::new(db)
    }

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
    }

    /// Address 1 with billboard 1, one client with one booking on it.
    async fn seed(uow: &SeaOrmUnitOfWork) {
        uow.addresses().add(Address::new("Ring road km 12"));
        uow.clients().add(Client::new("Acme", t0()));
        uow.commit().await.unwrap();

        uow.billboards().add(Billboard {
            code: Some("BB-001".into()),
            description: Some("Ring road north face".into()),
            start_booking: t0() - Duration::days(1),
            is_available: Some(true),
            address_id: Some(1),
            ..Default::default()
        });
        uow.commit().await.unwrap();

        uow.bookings().add(Booking::new(1, 1, t0()));
        uow.commit().await.unwrap();
    }

    #[tokio::test]
    async fn writes_are_invisible_until_commit() {
        let uow = uow().await;
        uow.addresses().add(Address::new("Airport road"));
        uow.clients().add(Client::new("Acme", t0()));
        assert_eq!(uow.pending_writes(), 2);
        assert!(uow.addresses().get_all(None, &[]).await.unwrap().is_empty());

        assert_eq!(uow.commit().await.unwrap(), 2);
        assert_eq!(uow.pending_writes(), 0);
        assert_eq!(uow.addresses().get_all(None, &[]).await.unwrap().len(), 1);
        assert_eq!(uow.clients().get_all(None, &[]).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn discard_drops_staged_writes() {
        let uow = uow().await;
        uow.addresses().add(Address::new("Airport road"));
        uow.discard();

        assert_eq!(uow.commit().await.unwrap(), 0);
        assert!(uow.addresses().get_all(None, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_commit_applies_nothing() {
        let uow = uow().await;
        seed(&uow).await;

        // Second billboard on the same address violates the one-per-address rule.
        uow.clients().add(Client::new("Globex", t0()));
        uow.billboards().add(Billboard {
            code: Some("BB-002".into()),
            start_booking: t0(),
            address_id: Some(1),
            ..Default::default()
        });
        assert!(uow.commit().await.is_err());

        assert_eq!(uow.clients().get_all(None, &[]).await.unwrap().len(), 1);
        assert_eq!(uow.pending_writes(), 0);
    }

    #[tokio::test]
    async fn relations_load_only_when_requested() {
        let uow = uow().await;
        seed(&uow).await;

        let filter = BillboardFilter::by_id(1);
        let bare = uow.billboards().get_one(&filter, &[]).await.unwrap().unwrap();
        assert!(bare.address.is_none());
        assert!(bare.bookings.is_none());

        let full = uow
            .billboards()
            .get_one(&filter, &[BillboardRelation::Address, BillboardRelation::Bookings])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(full.address.unwrap().name, "Ring road km 12");
        assert_eq!(full.bookings.unwrap().len(), 1);

        let address = uow
            .addresses()
            .get_one(&AddressFilter::by_id(1), &[AddressRelation::Billboard])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(address.billboard.unwrap().code.as_deref(), Some("BB-001"));

        let client = uow
            .clients()
            .get_one(&ClientFilter::by_id(1), &[ClientRelation::Bookings])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(client.bookings.unwrap().len(), 1);

        let booking = uow
            .bookings()
            .get_one(
                &BookingFilter::by_id(1),
                &[BookingRelation::Client, BookingRelation::BillboardAddress],
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.client.unwrap().name.as_deref(), Some("Acme"));
        let board = booking.billboard.unwrap();
        assert_eq!(board.address.unwrap().name, "Ring road km 12");
    }

    #[tokio::test]
    async fn available_filter_respects_flag_and_window() {
        let uow = uow().await;
        seed(&uow).await;
        uow.billboards().add(Billboard {
            code: Some("BB-OFF".into()),
            start_booking: t0() - Duration::days(1),
            is_available: Some(false),
            ..Default::default()
        });
        uow.billboards().add(Billboard {
            code: Some("BB-ENDED".into()),
            start_booking: t0() - Duration::days(10),
            end_booking: Some(t0() - Duration::days(2)),
            is_available: Some(true),
            ..Default::default()
        });
        uow.billboards().add(Billboard {
            code: Some("BB-LATER".into()),
            start_booking: t0() + Duration::days(3),
            is_available: Some(true),
            ..Default::default()
        });
        uow.commit().await.unwrap();

        let available = uow
            .billboards()
            .get_all(Some(&BillboardFilter::available_at(t0())), &[])
            .await
            .unwrap();
        let codes: Vec<_> = available.iter().filter_map(|b| b.code.as_deref()).collect();
        assert_eq!(codes, vec!["BB-001"]);
    }

    #[tokio::test]
    async fn pages_are_bounded_and_counted() {
        let uow = uow().await;
        for i in 0..25 {
            uow.addresses().add(Address::new(format!("Street {}", i)));
        }
        uow.commit().await.unwrap();

        let page = uow
            .addresses()
            .get_page(None, &[], PaginationParams::new(Some(3), Some(10)))
            .await
            .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].name, "Street 20");
    }

    #[tokio::test]
    async fn update_and_remove_many() {
        let uow = uow().await;
        seed(&uow).await;
        uow.contacts().add(ContactInquiry {
            name: Some("Jane".into()),
            message: Some("Is BB-001 free in August?".into()),
            submitted_at: t0(),
            billboard_id: Some(1),
            ..Default::default()
        });
        uow.commit().await.unwrap();

        let filter = ContactInquiryFilter {
            status: Some(ContactStatus::Pending),
            ..Default::default()
        };
        let mut inquiry = uow.contacts().get_one(&filter, &[]).await.unwrap().unwrap();
        inquiry.status = ContactStatus::Resolved;
        uow.contacts().update(inquiry);
        uow.commit().await.unwrap();
        assert!(uow.contacts().get_one(&filter, &[]).await.unwrap().is_none());

        // Deleting the billboard cascades its bookings and clears the inquiry link.
        let boards = uow.billboards().get_all(None, &[]).await.unwrap();
        uow.billboards().remove_many(boards);
        uow.commit().await.unwrap();

        assert!(uow.bookings().get_all(None, &[]).await.unwrap().is_empty());
        let inquiry = uow.contacts().get_all(None, &[]).await.unwrap().remove(0);
        assert_eq!(inquiry.billboard_id, None);
    }
}
