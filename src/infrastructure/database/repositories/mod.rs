//! Database repository implementations
//!
//! Per-entity SeaORM repositories sharing one write log, tied together by
//! `SeaOrmUnitOfWork`.

pub mod address_repository;
pub mod admin_user_repository;
pub mod billboard_repository;
pub mod booking_repository;
pub mod client_repository;
pub mod contact_inquiry_repository;
pub mod refresh_token_repository;
pub mod staging;
pub mod unit_of_work;

pub use unit_of_work::{SeaOrmUnitOfWork, SeaOrmUnitOfWorkFactory};

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}
