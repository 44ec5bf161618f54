use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::billboard::Entity")]
    Billboard,
}

impl Related<super::billboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Billboard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
