use super::{ContactInquiry, ContactStatus};
use crate::domain::repositories::QueryGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactInquiryRelation {
    Billboard,
}

#[derive(Debug, Clone, Default)]
pub struct ContactInquiryFilter {
    pub id: Option<i32>,
    pub status: Option<ContactStatus>,
    pub billboard_id: Option<i32>,
}

pub trait ContactInquiryRepository:
    QueryGateway<
    Entity = ContactInquiry,
    Filter = ContactInquiryFilter,
    Relation = ContactInquiryRelation,
>
{
}
