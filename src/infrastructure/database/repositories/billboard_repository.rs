use sea_orm::sea_query::Condition;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::address_repository::address_from_model;
use super::booking_repository::booking_from_model;
use super::staging::{impl_query_gateway, Staging};
use super::db_err;
use crate::domain::billboard::{Billboard, BillboardFilter, BillboardRelation, BillboardRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{address, billboard, booking};

pub struct SeaOrmBillboardRepository {
    db: DatabaseConnection,
    staging: Staging,
}

impl SeaOrmBillboardRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&BillboardFilter>) -> Select<billboard::Entity> {
        let mut query = billboard::Entity::find().order_by_asc(billboard::Column::Id);
        let Some(f) = filter else {
            return query;
        };
        if let Some(id) = f.id {
            query = query.filter(billboard::Column::Id.eq(id));
        }
        if let Some(ref code) = f.code {
            query = query.filter(billboard::Column::Code.eq(code.as_str()));
        }
        if let Some(address_id) = f.address_id {
            query = query.filter(billboard::Column::AddressId.eq(address_id));
        }
        if let Some(ref highway) = f.highway {
            query = query.filter(billboard::Column::Highway.eq(highway.as_str()));
        }
        if let Some(ref kind) = f.kind {
            query = query.filter(billboard::Column::Kind.eq(kind.as_str()));
        }
        if let Some(ref search) = f.search {
            query = query.filter(
                billboard::Column::Code
                    .contains(search)
                    .or(billboard::Column::Description.contains(search)),
            );
        }
        if let Some(at) = f.available_at {
            query = query
                .filter(billboard::Column::IsAvailable.eq(true))
                .filter(billboard::Column::StartBooking.lte(at))
                .filter(
                    Condition::any()
                        .add(billboard::Column::EndBooking.is_null())
                        .add(billboard::Column::EndBooking.gte(at)),
                );
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<billboard::Model>,
        include: &[BillboardRelation],
    ) -> DomainResult<Vec<Billboard>> {
        let addresses = if include.contains(&BillboardRelation::Address) {
            models
                .load_one(address::Entity, &self.db)
                .await
                .map_err(db_err)?
        } else {
            vec![None; models.len()]
        };
        let bookings = if include.contains(&BillboardRelation::Bookings) {
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
            .zip(addresses)
            .zip(bookings)
            .map(|((model, address), bookings)| {
                let mut b = billboard_from_model(model);
                b.address = address.map(|a| Box::new(address_from_model(a)));
                b.bookings = bookings.map(|list| list.into_iter().map(booking_from_model).collect());
                b
            })
            .collect())
    }

    fn to_active(b: &Billboard) -> billboard::ActiveModel {
        billboard::ActiveModel {
            id: Set(b.id),
            code: Set(b.code.clone()),
            description: Set(b.description.clone()),
            sub_description: Set(b.sub_description.clone()),
            image_path: Set(b.image_path.clone()),
            size: Set(b.size.clone()),
            highway: Set(b.highway.clone()),
            start_booking: Set(b.start_booking),
            end_booking: Set(b.end_booking),
            is_available: Set(b.is_available),
            number_of_faces: Set(b.number_of_faces),
            kind: Set(b.kind.clone()),
            location_url: Set(b.location_url.clone()),
            address_id: Set(b.address_id),
        }
    }
}

pub(crate) fn billboard_from_model(model: billboard::Model) -> Billboard {
    Billboard {
        id: model.id,
        code: model.code,
        description: model.description,
        sub_description: model.sub_description,
        image_path: model.image_path,
        size: model.size,
        highway: model.highway,
        start_booking: model.start_booking,
        end_booking: model.end_booking,
        is_available: model.is_available,
        number_of_faces: model.number_of_faces,
        kind: model.kind,
        location_url: model.location_url,
        address_id: model.address_id,
        address: None,
        bookings: None,
    }
}

impl_query_gateway!(
    SeaOrmBillboardRepository,
    Billboard,
    BillboardFilter,
    BillboardRelation,
    Billboard
);

impl BillboardRepository for SeaOrmBillboardRepository {}
