//! Infrastructure layer: crypto primitives and persistence

pub mod crypto;
pub mod database;

pub use crypto::{BcryptHasher, JwtConfig, TokenIssuer};
pub use database::{init_database, DatabaseConfig, SeaOrmUnitOfWork, SeaOrmUnitOfWorkFactory};
