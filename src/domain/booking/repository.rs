use super::Booking;
use crate::domain::repositories::QueryGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRelation {
    Client,
    Billboard,
    /// The billboard together with its address; implies `Billboard`
    BillboardAddress,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub id: Option<i32>,
    pub client_id: Option<i32>,
    pub billboard_id: Option<i32>,
}

impl BookingFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_client(client_id: i32) -> Self {
        Self {
            client_id: Some(client_id),
            ..Default::default()
        }
    }
}

pub trait BookingRepository:
    QueryGateway<Entity = Booking, Filter = BookingFilter, Relation = BookingRelation>
{
}
