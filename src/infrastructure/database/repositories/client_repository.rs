use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::booking_repository::booking_from_model;
use super::staging::{impl_query_gateway, Staging};
use super::db_err;
use crate::domain::client::{Client, ClientFilter, ClientRelation, ClientRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{booking, client};

pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
    staging: Staging,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&ClientFilter>) -> Select<client::Entity> {
        let mut query = client::Entity::find().order_by_asc(client::Column::Id);
        if let Some(f) = filter {
            if let Some(id) = f.id {
                query = query.filter(client::Column::Id.eq(id));
            }
            if let Some(ref name) = f.name_contains {
                query = query.filter(client::Column::Name.contains(name));
            }
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<client::Model>,
        include: &[ClientRelation],
    ) -> DomainResult<Vec<Client>> {
        let bookings = if include.contains(&ClientRelation::Bookings) {
            let loaded = models
                .load_many(booking::Entity, &self.db)
                .await
                .map_err(db_err)?;
            loaded.into_iter().map(Some).collect()
        } else {
            vec![None; models.len()]
        };

        Ok(models
            .into_iter()
            .zip(bookings)
            .map(|(model, bookings)| {
                let mut c = client_from_model(model);
                c.bookings = bookings.map(|list| list.into_iter().map(booking_from_model).collect());
                c
            })
            .collect())
    }

    fn to_active(c: &Client) -> client::ActiveModel {
        client::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
            created_at: Set(c.created_at),
            logo_path: Set(c.logo_path.clone()),
        }
    }
}

pub(crate) fn client_from_model(model: client::Model) -> Client {
    Client {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        logo_path: model.logo_path,
        bookings: None,
    }
}

impl_query_gateway!(SeaOrmClientRepository, Client, ClientFilter, ClientRelation, Client);

impl ClientRepository for SeaOrmClientRepository {}
