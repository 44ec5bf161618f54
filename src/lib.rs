//! # Billboard Advertising Management API
//!
//! Administrative backend for a billboard inventory: admin sessions,
//! billboards, addresses, clients, bookings and contact inquiries.
//!
//! ## Architecture
//!
//! - **domain**: entities, typed filters and relations, repository traits
//! - **application**: auth session workflow and admin account management
//! - **infrastructure**: bcrypt hashing, JWT issuing, SeaORM persistence
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error taxonomy, pagination, clock, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::{create_api_router, ApiContext};
