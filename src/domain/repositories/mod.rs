//! Repository traits for the domain layer
//!
//! Contains:
//! - `QueryGateway`: the capability set every entity repository offers
//!   (filtered / paginated / relation-including reads, staged writes)
//! - `UnitOfWork`: owns one set of staged writes and exposes the
//!   per-entity repositories that stage into it
//! - `UnitOfWorkFactory`: begins a fresh unit of work per request
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::address::AddressRepository;
use super::admin_user::AdminUserRepository;
use super::billboard::BillboardRepository;
use super::booking::BookingRepository;
use super::client::ClientRepository;
use super::contact::ContactInquiryRepository;
use super::refresh_token::RefreshTokenRepository;
use crate::shared::{PaginatedResult, PaginationParams};

pub use crate::shared::errors::DomainResult;

// ── QueryGateway ────────────────────────────────────────────────

/// Generic read/write access to one entity type.
///
/// Reads hit the store immediately. `add`, `update` and `remove` only stage
/// the write in the owning [`UnitOfWork`]; nothing reaches the store until
/// [`UnitOfWork::commit`].
///
/// Relations to eager-load are named with the entity's typed `Relation`
/// enum; an empty slice loads none.
#[async_trait]
pub trait QueryGateway: Send + Sync {
    type Entity: Send + Sync + 'static;
    type Filter: Send + Sync;
    type Relation: Send + Sync + Copy + 'static;

    async fn get_all(
        &self,
        filter: Option<&Self::Filter>,
        include: &[Self::Relation],
    ) -> DomainResult<Vec<Self::Entity>>;

    async fn get_page(
        &self,
        filter: Option<&Self::Filter>,
        include: &[Self::Relation],
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Self::Entity>>;

    async fn get_one(
        &self,
        filter: &Self::Filter,
        include: &[Self::Relation],
    ) -> DomainResult<Option<Self::Entity>>;

    fn add(&self, entity: Self::Entity);

    fn update(&self, entity: Self::Entity);

    fn remove(&self, entity: Self::Entity);

    fn remove_many(&self, entities: Vec<Self::Entity>);
}

// ── UnitOfWork ──────────────────────────────────────────────────

/// A batch of staged writes plus the repositories that stage them.
///
/// ```ignore
/// let uow = factory.begin();
/// uow.addresses().add(Address::new("Airport road, exit 4"));
/// uow.clients().add(Client::new("Acme"));
/// uow.commit().await?; // both rows or neither
/// ```
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn admin_users(&self) -> &dyn AdminUserRepository;
    fn refresh_tokens(&self) -> &dyn RefreshTokenRepository;
    fn billboards(&self) -> &dyn BillboardRepository;
    fn addresses(&self) -> &dyn AddressRepository;
    fn clients(&self) -> &dyn ClientRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn contacts(&self) -> &dyn ContactInquiryRepository;

    /// Number of writes staged and not yet committed.
    fn pending_writes(&self) -> usize;

    /// Apply every staged write in a single transaction and return how many
    /// were applied. On error nothing is applied and the staged writes are
    /// dropped.
    async fn commit(&self) -> DomainResult<usize>;

    /// Drop staged writes without touching the store.
    fn discard(&self);
}

pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Box<dyn UnitOfWork>;
}
