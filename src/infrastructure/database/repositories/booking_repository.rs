use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::address_repository::address_from_model;
use super::billboard_repository::billboard_from_model;
use super::client_repository::client_from_model;
use super::staging::{impl_query_gateway, Staging};
use super::db_err;
use crate::domain::booking::{Booking, BookingFilter, BookingRelation, BookingRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{address, billboard, booking, client};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
    staging: Staging,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&BookingFilter>) -> Select<booking::Entity> {
        let mut query = booking::Entity::find().order_by_asc(booking::Column::Id);
        if let Some(f) = filter {
            if let Some(id) = f.id {
                query = query.filter(booking::Column::Id.eq(id));
            }
            if let Some(client_id) = f.client_id {
                query = query.filter(booking::Column::ClientId.eq(client_id));
            }
            if let Some(billboard_id) = f.billboard_id {
                query = query.filter(booking::Column::BillboardId.eq(billboard_id));
            }
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<booking::Model>,
        include: &[BookingRelation],
    ) -> DomainResult<Vec<Booking>> {
        let clients = if include.contains(&BookingRelation::Client) {
            models
                .load_one(client::Entity, &self.db)
                .await
                .map_err(db_err)?
        } else {
            vec![None; models.len()]
        };

        let with_address = include.contains(&BookingRelation::BillboardAddress);
        let billboards = if with_address || include.contains(&BookingRelation::Billboard) {
            models
                .load_one(billboard::Entity, &self.db)
                .await
                .map_err(db_err)?
        } else {
            vec![None; models.len()]
        };

        // billboard id -> address
        let mut addresses: HashMap<i32, address::Model> = HashMap::new();
        if with_address {
            let present: Vec<billboard::Model> = billboards.iter().flatten().cloned().collect();
            let loaded = present
                .load_one(address::Entity, &self.db)
                .await
                .map_err(db_err)?;
            for (b, a) in present.iter().zip(loaded) {
                if let Some(a) = a {
                    addresses.insert(b.id, a);
                }
            }
        }

        Ok(models
            .into_iter()
            .zip(clients)
            .zip(billboards)
            .map(|((model, client), board)| {
                let mut booking = booking_from_model(model);
                booking.client = client.map(|c| Box::new(client_from_model(c)));
                booking.billboard = board.map(|b| {
                    let address = addresses.get(&b.id).cloned();
                    let mut b = billboard_from_model(b);
                    b.address = address.map(|a| Box::new(address_from_model(a)));
                    Box::new(b)
                });
                booking
            })
            .collect())
    }

    fn to_active(b: &Booking) -> booking::ActiveModel {
        booking::ActiveModel {
            id: Set(b.id),
            client_id: Set(b.client_id),
            billboard_id: Set(b.billboard_id),
            start_date: Set(b.start_date),
            end_date: Set(b.end_date),
        }
    }
}

pub(crate) fn booking_from_model(model: booking::Model) -> Booking {
    Booking {
        id: model.id,
        client_id: model.client_id,
        billboard_id: model.billboard_id,
        start_date: model.start_date,
        end_date: model.end_date,
        client: None,
        billboard: None,
    }
}

impl_query_gateway!(SeaOrmBookingRepository, Booking, BookingFilter, BookingRelation, Booking);

impl BookingRepository for SeaOrmBookingRepository {}
