pub mod model;
pub mod repository;

pub use model::Address;
pub use repository::{AddressFilter, AddressRelation, AddressRepository};
