//! Admin account aggregate
//!
//! Contains the AdminUser entity, its role enumeration, and repository interface.

pub mod model;
pub mod repository;

pub use model::{AdminRole, AdminUser, USERNAME_MAX_LEN};
pub use repository::{AdminUserFilter, AdminUserRelation, AdminUserRepository};
