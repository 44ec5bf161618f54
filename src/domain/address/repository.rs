use super::Address;
use crate::domain::repositories::QueryGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRelation {
    Billboard,
}

#[derive(Debug, Clone, Default)]
pub struct AddressFilter {
    pub id: Option<i32>,
    /// Exact match
    pub name: Option<String>,
}

impl AddressFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

pub trait AddressRepository:
    QueryGateway<Entity = Address, Filter = AddressFilter, Relation = AddressRelation>
{
}
