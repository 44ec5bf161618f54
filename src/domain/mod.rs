//! Core business entities, typed filters and repository traits.

pub mod address;
pub mod admin_user;
pub mod billboard;
pub mod booking;
pub mod client;
pub mod contact;
pub mod refresh_token;
pub mod repositories;

// Re-export commonly used types
pub use address::Address;
pub use admin_user::{AdminRole, AdminUser};
pub use billboard::Billboard;
pub use booking::Booking;
pub use client::Client;
pub use contact::{ContactInquiry, ContactStatus};
pub use refresh_token::{RefreshToken, RevokeOutcome, TokenState};
pub use repositories::{DomainResult, QueryGateway, UnitOfWork, UnitOfWorkFactory};

pub use crate::shared::errors::{AuthFailure, DomainError};
