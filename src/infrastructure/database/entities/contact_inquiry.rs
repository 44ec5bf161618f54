//! Contact inquiry entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ContactStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Resolved")]
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_inquiries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub billboard_id: Option<i32>,
    pub status: ContactStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::billboard::Entity",
        from = "Column::BillboardId",
        to = "super::billboard::Column::Id",
        on_delete = "SetNull"
    )]
    Billboard,
}

impl Related<super::billboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Billboard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
