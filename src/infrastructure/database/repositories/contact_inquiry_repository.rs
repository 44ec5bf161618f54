use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::billboard_repository::billboard_from_model;
use super::staging::{impl_query_gateway, Staging};
use super::db_err;
use crate::domain::contact::{
    ContactInquiry, ContactInquiryFilter, ContactInquiryRelation, ContactInquiryRepository,
    ContactStatus,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{billboard, contact_inquiry};

pub struct SeaOrmContactInquiryRepository {
    db: DatabaseConnection,
    staging: Staging,
}

fn status_to_entity(status: ContactStatus) -> contact_inquiry::ContactStatus {
    match status {
        ContactStatus::Pending => contact_inquiry::ContactStatus::Pending,
        ContactStatus::InProgress => contact_inquiry::ContactStatus::InProgress,
        ContactStatus::Resolved => contact_inquiry::ContactStatus::Resolved,
    }
}

fn status_from_entity(status: contact_inquiry::ContactStatus) -> ContactStatus {
    match status {
        contact_inquiry::ContactStatus::Pending => ContactStatus::Pending,
        contact_inquiry::ContactStatus::InProgress => ContactStatus::InProgress,
        contact_inquiry::ContactStatus::Resolved => ContactStatus::Resolved,
    }
}

impl SeaOrmContactInquiryRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&ContactInquiryFilter>) -> Select<contact_inquiry::Entity> {
        // Newest first
        let mut query =
            contact_inquiry::Entity::find().order_by_desc(contact_inquiry::Column::SubmittedAt);
        if let Some(f) = filter {
            if let Some(id) = f.id {
                query = query.filter(contact_inquiry::Column::Id.eq(id));
            }
            if let Some(status) = f.status {
                query = query.filter(contact_inquiry::Column::Status.eq(status_to_entity(status)));
            }
            if let Some(billboard_id) = f.billboard_id {
                query = query.filter(contact_inquiry::Column::BillboardId.eq(billboard_id));
            }
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<contact_inquiry::Model>,
        include: &[ContactInquiryRelation],
    ) -> DomainResult<Vec<ContactInquiry>> {
        let billboards = if include.contains(&ContactInquiryRelation::Billboard) {
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
            .map(|(m, b)| ContactInquiry {
                id: m.id,
                name: m.name,
                email: m.email,
                phone: m.phone,
                message: m.message,
                submitted_at: m.submitted_at,
                billboard_id: m.billboard_id,
                status: status_from_entity(m.status),
                billboard: b.map(|b| Box::new(billboard_from_model(b))),
            })
            .collect())
    }

    fn to_active(c: &ContactInquiry) -> contact_inquiry::ActiveModel {
        contact_inquiry::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
            email: Set(c.email.clone()),
            phone: Set(c.phone.clone()),
            message: Set(c.message.clone()),
            submitted_at: Set(c.submitted_at),
            billboard_id: Set(c.billboard_id),
            status: Set(status_to_entity(c.status)),
        }
    }
}

impl_query_gateway!(
    SeaOrmContactInquiryRepository,
    ContactInquiry,
    ContactInquiryFilter,
    ContactInquiryRelation,
    ContactInquiry
);

impl ContactInquiryRepository for SeaOrmContactInquiryRepository {}
