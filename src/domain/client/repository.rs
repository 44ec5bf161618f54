use super::Client;
use crate::domain::repositories::QueryGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRelation {
    Bookings,
}

#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub id: Option<i32>,
    /// Substring match
    pub name_contains: Option<String>,
}

impl ClientFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

pub trait ClientRepository:
    QueryGateway<Entity = Client, Filter = ClientFilter, Relation = ClientRelation>
{
}
