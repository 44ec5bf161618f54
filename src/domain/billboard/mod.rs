//! Billboard aggregate

pub mod model;
pub mod repository;

pub use model::Billboard;
pub use repository::{BillboardFilter, BillboardRelation, BillboardRepository};
