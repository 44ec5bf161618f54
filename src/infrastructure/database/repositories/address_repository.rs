use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::billboard_repository::billboard_from_model;
use super::staging::{impl_query_gateway, Staging};
use super::db_err;
use crate::domain::address::{Address, AddressFilter, AddressRelation, AddressRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{address, billboard};

pub struct SeaOrmAddressRepository {
    db: DatabaseConnection,
    staging: Staging,
}

impl SeaOrmAddressRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&AddressFilter>) -> Select<address::Entity> {
        let mut query = address::Entity::find().order_by_asc(address::Column::Id);
        if let Some(f) = filter {
            if let Some(id) = f.id {
                query = query.filter(address::Column::Id.eq(id));
            }
            if let Some(ref name) = f.name {
                query = query.filter(address::Column::Name.eq(name.as_str()));
            }
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<address::Model>,
        include: &[AddressRelation],
    ) -> DomainResult<Vec<Address>> {
        let billboards = if include.contains(&AddressRelation::Billboard) {
            models
                .load_one(billboard::Entity, &self.db)
                .await
                .map_err(db_err)?
        } else {
            vec![None; models.len()]
        };

        Ok(models
            .into_iter()
            .zip(billboards)
            .map(|(model, b)| {
                let mut a = address_from_model(model);
                a.billboard = b.map(|b| Box::new(billboard_from_model(b)));
                a
            })
            .collect())
    }

    fn to_active(a: &Address) -> address::ActiveModel {
        address::ActiveModel {
            id: Set(a.id),
            name: Set(a.name.clone()),
        }
    }
}

pub(crate) fn address_from_model(model: address::Model) -> Address {
    Address {
        id: model.id,
        name: model.name,
        billboard: None,
    }
}

impl_query_gateway!(
    SeaOrmAddressRepository,
    Address,
    AddressFilter,
    AddressRelation,
    Address
);

impl AddressRepository for SeaOrmAddressRepository {}
