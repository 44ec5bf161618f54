//! Staged writes shared by the repositories of one unit of work

use std::sync::{Arc, Mutex, MutexGuard};

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel};

use crate::infrastructure::database::entities::{
    address, admin_user, billboard, booking, client, contact_inquiry, refresh_token,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Delete,
}

#[derive(Debug)]
pub enum StagedRow {
    AdminUser(admin_user::ActiveModel),
    RefreshToken(refresh_token::ActiveModel),
    Address(address::ActiveModel),
    Billboard(billboard::ActiveModel),
    Client(client::ActiveModel),
    Booking(booking::ActiveModel),
    ContactInquiry(contact_inquiry::ActiveModel),
}

#[derive(Debug)]
pub struct PendingWrite {
    pub op: WriteOp,
    pub row: StagedRow,
}

impl PendingWrite {
    pub async fn apply<C: ConnectionTrait>(self, conn: &C) -> Result<(), DbErr> {
        match self.row {
            StagedRow::AdminUser(m) => apply(self.op, m, conn).await,
            StagedRow::RefreshToken(m) => apply(self.op, m, conn).await,
            StagedRow::Address(m) => apply(self.op, m, conn).await,
            StagedRow::Billboard(m) => apply(self.op, m, conn).await,
            StagedRow::Client(m) => apply(self.op, m, conn).await,
            StagedRow::Booking(m) => apply(self.op, m, conn).await,
            StagedRow::ContactInquiry(m) => apply(self.op, m, conn).await,
        }
    }
}

async fn apply<A, C>(op: WriteOp, model: A, conn: &C) -> Result<(), DbErr>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    match op {
        WriteOp::Insert => {
            model.insert(conn).await?;
        }
        WriteOp::Update => {
            model.update(conn).await?;
        }
        WriteOp::Delete => {
            let res = model.delete(conn).await?;
            if res.rows_affected == 0 {
                return Err(DbErr::RecordNotFound("row to delete no longer exists".into()));
            }
        }
    }
    Ok(())
}

/// Ordered write log. Cloning shares the log.
#[derive(Debug, Clone, Default)]
pub struct Staging {
    writes: Arc<Mutex<Vec<PendingWrite>>>,
}

impl Staging {
    fn lock(&self) -> MutexGuard<'_, Vec<PendingWrite>> {
        self.writes.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn push(&self, op: WriteOp, row: StagedRow) {
        self.lock().push(PendingWrite { op, row });
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return every staged write in staging order.
    pub fn take(&self) -> Vec<PendingWrite> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Implements `QueryGateway` for a SeaORM repository.
///
/// The repository provides `db: DatabaseConnection`, `staging: Staging` and
/// three inherent functions: `select(Option<&Filter>) -> Select<_>`,
/// `async hydrate(&self, Vec<Model>, &[Relation]) -> DomainResult<Vec<Entity>>`
/// and `to_active(&Entity) -> ActiveModel`.
macro_rules! impl_query_gateway {
    ($repo:ty, $entity:ty, $filter:ty, $relation:ty, $staged:ident) => {
        #[async_trait::async_trait]
        impl $crate::domain::repositories::QueryGateway for $repo {
            type Entity = $entity;
            type Filter = $filter;
            type Relation = $relation;

            async fn get_all(
                &self,
                filter: Option<&$filter>,
                include: &[$relation],
            ) -> $crate::domain::DomainResult<Vec<$entity>> {
                let models = Self::select(filter)
                    .all(&self.db)
                    .await
                    .map_err($crate::infrastructure::database::repositories::db_err)?;
                self.hydrate(models, include).await
            }

            async fn get_page(
                &self,
                filter: Option<&$filter>,
                include: &[$relation],
                page: $crate::shared::PaginationParams,
            ) -> $crate::domain::DomainResult<$crate::shared::PaginatedResult<$entity>> {
                use sea_orm::{PaginatorTrait as _, QuerySelect as _};
                let query = Self::select(filter);
                let total = query
                    .clone()
                    .count(&self.db)
                    .await
                    .map_err($crate::infrastructure::database::repositories::db_err)?;
                let models = query
                    .offset(page.offset())
                    .limit(page.limit as u64)
                    .all(&self.db)
                    .await
                    .map_err($crate::infrastructure::database::repositories::db_err)?;
                let items = self.hydrate(models, include).await?;
                Ok($crate::shared::PaginatedResult::new(items, total, page.page, page.limit))
            }

            async fn get_one(
                &self,
                filter: &$filter,
                include: &[$relation],
            ) -> $crate::domain::DomainResult<Option<$entity>> {
                let model = Self::select(Some(filter))
                    .one(&self.db)
                    .await
                    .map_err($crate::infrastructure::database::repositories::db_err)?;
                match model {
                    Some(model) => Ok(self.hydrate(vec![model], include).await?.pop()),
                    None => Ok(None),
                }
            }

            fn add(&self, entity: $entity) {
                let mut row = Self::to_active(&entity);
                if entity.id == 0 {
                    row.id = sea_orm::ActiveValue::NotSet;
                }
                self.staging.push(
                    $crate::infrastructure::database::repositories::staging::WriteOp::Insert,
                    $crate::infrastructure::database::repositories::staging::StagedRow::$staged(row),
                );
            }

            fn update(&self, entity: $entity) {
                self.staging.push(
                    $crate::infrastructure::database::repositories::staging::WriteOp::Update,
                    $crate::infrastructure::database::repositories::staging::StagedRow::$staged(
                        Self::to_active(&entity),
                    ),
                );
            }

            fn remove(&self, entity: $entity) {
                self.staging.push(
                    $crate::infrastructure::database::repositories::staging::WriteOp::Delete,
                    $crate::infrastructure::database::repositories::staging::StagedRow::$staged(
                        Self::to_active(&entity),
                    ),
                );
            }

            fn remove_many(&self, entities: Vec<$entity>) {
                for entity in entities {
                    $crate::domain::repositories::QueryGateway::remove(self, entity);
                }
            }
        }
    };
}

pub(crate) use impl_query_gateway;
