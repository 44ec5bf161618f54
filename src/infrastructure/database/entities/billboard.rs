//! Billboard entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "billboards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub sub_description: Option<String>,
    pub image_path: Option<String>,
    pub size: Option<String>,
    pub highway: Option<String>,
    pub start_booking: DateTime<Utc>,
    pub end_booking: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
    pub number_of_faces: Option<i32>,
    /// Display type ("Type" in the admin UI)
    pub kind: Option<String>,
    pub location_url: Option<String>,
    /// Unique: one billboard per address
    #[sea_orm(unique)]
    pub address_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::Id",
        on_delete = "SetNull"
    )]
    Address,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::contact_inquiry::Entity")]
    ContactInquiries,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::contact_inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactInquiries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
