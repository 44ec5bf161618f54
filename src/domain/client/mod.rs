//! Advertiser accounts

pub mod model;
pub mod repository;

pub use model::Client;
pub use repository::{ClientFilter, ClientRelation, ClientRepository};
