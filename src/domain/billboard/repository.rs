use chrono::{DateTime, Utc};

use super::Billboard;
use crate::domain::repositories::QueryGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillboardRelation {
    Address,
    Bookings,
}

#[derive(Debug, Clone, Default)]
pub struct BillboardFilter {
    pub id: Option<i32>,
    pub code: Option<String>,
    pub address_id: Option<i32>,
    pub highway: Option<String>,
    pub kind: Option<String>,
    /// Substring match on code or description
    pub search: Option<String>,
    /// Only billboards available at this instant
    pub available_at: Option<DateTime<Utc>>,
}

impl BillboardFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn available_at(at: DateTime<Utc>) -> Self {
        Self {
            available_at: Some(at),
            ..Default::default()
        }
    }
}

pub trait BillboardRepository:
    QueryGateway<Entity = Billboard, Filter = BillboardFilter, Relation = BillboardRelation>
{
}
