use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, NotSet,
    QueryFilter, QueryOrder, Select, Set,
};
use tracing::debug;

use super::admin_user_repository::admin_user_from_model;
use super::staging::{impl_query_gateway, Staging};
use super::db_err;
use crate::domain::refresh_token::{
    RefreshToken, RefreshTokenFilter, RefreshTokenRelation, RefreshTokenRepository, RevokeOutcome,
    TokenState,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{admin_user, refresh_token};

pub struct SeaOrmRefreshTokenRepository {
    db: DatabaseConnection,
    staging: Staging,
}

impl SeaOrmRefreshTokenRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&RefreshTokenFilter>) -> Select<refresh_token::Entity> {
        let mut query = refresh_token::Entity::find().order_by_asc(refresh_token::Column::Id);
        let Some(f) = filter else {
            return query;
        };
        if let Some(id) = f.id {
            query = query.filter(refresh_token::Column::Id.eq(id));
        }
        if let Some(ref token) = f.token {
            query = query.filter(refresh_token::Column::Token.eq(token.as_str()));
        }
        if let Some(owner) = f.admin_user_id {
            query = query.filter(refresh_token::Column::AdminUserId.eq(owner));
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<refresh_token::Model>,
        include: &[RefreshTokenRelation],
    ) -> DomainResult<Vec<RefreshToken>> {
        let owners = if include.contains(&RefreshTokenRelation::AdminUser) {
            models
                .load_one(admin_user::Entity, &self.db)
                .await
                .map_err(db_err)?
        } else {
            vec![None; models.len()]
        };

        Ok(models
            .into_iter()
            .zip(owners)
            .map(|(model, owner)| {
                let mut token = refresh_token_from_model(model);
                token.admin_user = owner.map(|o| Box::new(admin_user_from_model(o)));
                token
            })
            .collect())
    }

    fn to_active(token: &RefreshToken) -> refresh_token::ActiveModel {
        refresh_token::ActiveModel {
            id: Set(token.id),
            token: Set(token.token.clone()),
            expires_at: Set(token.expires_at),
            created_at: Set(token.created_at),
            revoked_at: Set(token.revoked_at()),
            admin_user_id: Set(token.admin_user_id),
        }
    }
}

pub(crate) fn refresh_token_from_model(model: refresh_token::Model) -> RefreshToken {
    RefreshToken {
        id: model.id,
        token: model.token,
        expires_at: model.expires_at,
        created_at: model.created_at,
        state: TokenState::from_revoked_at(model.revoked_at),
        admin_user_id: model.admin_user_id,
        admin_user: None,
    }
}

impl_query_gateway!(
    SeaOrmRefreshTokenRepository,
    RefreshToken,
    RefreshTokenFilter,
    RefreshTokenRelation,
    RefreshToken
);

#[async_trait]
impl RefreshTokenRepository for SeaOrmRefreshTokenRepository {
    async fn persist(&self, token: RefreshToken) -> DomainResult<RefreshToken> {
        let mut row = Self::to_active(&token);
        row.id = NotSet;
        let saved = row.insert(&self.db).await.map_err(db_err)?;
        debug!(token_id = saved.id, admin_user_id = saved.admin_user_id, "Refresh token stored");
        Ok(refresh_token_from_model(saved))
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        let model = refresh_token::Entity::find()
            .filter(refresh_token::Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(refresh_token_from_model))
    }

    async fn get_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<RefreshToken>> {
        let filter = RefreshTokenFilter::by_token(token);
        let found = crate::domain::repositories::QueryGateway::get_one(
            self,
            &filter,
            &[RefreshTokenRelation::AdminUser],
        )
        .await?;

        Ok(found.filter(|t| t.is_active(now)))
    }

    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> DomainResult<RevokeOutcome> {
        // Only the first writer sees a row affected.
        let result = refresh_token::Entity::update_many()
            .col_expr(refresh_token::Column::RevokedAt, Expr::value(now))
            .filter(refresh_token::Column::Token.eq(token))
            .filter(refresh_token::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
            return Ok(RevokeOutcome::Revoked { at: now });
        }

        match self.find_by_token(token).await? {
            None => Ok(RevokeOutcome::NotFound),
            Some(existing) => match existing.state {
                TokenState::Revoked { at } => Ok(RevokeOutcome::AlreadyRevoked { at }),
                TokenState::Active => Err(DomainError::Persistence(format!(
                    "revocation of token {} was not applied",
                    existing.id
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::admin_user::{AdminRole, AdminUser, AdminUserFilter};
    use crate::domain::repositories::{QueryGateway, UnitOfWork};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmUnitOfWork;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
    }

    async fn setup() -> (DatabaseConnection, i32) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let uow = SeaOrmUnitOfWork::new(db.clone());
        uow.admin_users()
            .add(AdminUser::new("admin1", "$2b$04$hash", AdminRole::Admin, t0()));
        uow.commit().await.unwrap();
        let owner = uow
            .admin_users()
            .get_one(&AdminUserFilter::by_username("admin1"), &[])
            .await
            .unwrap()
            .unwrap();
        (db, owner.id)
    }

    #[tokio::test]
    async fn get_valid_hides_expired_revoked_and_unknown_tokens() {
        let (db, owner) = setup().await;
        let repo = SeaOrmRefreshTokenRepository::new(db, Staging::default());

        let live = repo.persist(RefreshToken::new("live", owner, t0())).await.unwrap();
        repo.persist(RefreshToken::new("expired", owner, t0() - Duration::days(8)))
            .await
            .unwrap();
        repo.persist(RefreshToken::new("revoked", owner, t0())).await.unwrap();
        repo.revoke("revoked", t0()).await.unwrap();

        let found = repo.get_valid("live", t0()).await.unwrap().unwrap();
        assert_eq!(found.id, live.id);
        assert_eq!(found.admin_user.unwrap().username, "admin1");

        assert!(repo.get_valid("expired", t0()).await.unwrap().is_none());
        assert!(repo.get_valid("revoked", t0()).await.unwrap().is_none());
        assert!(repo.get_valid("never-issued", t0()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_revoke_keeps_first_timestamp() {
        let (db, owner) = setup().await;
        let repo = SeaOrmRefreshTokenRepository::new(db, Staging::default());
        repo.persist(RefreshToken::new("tok", owner, t0())).await.unwrap();

        let first = t0() + Duration::minutes(5);
        let second = t0() + Duration::minutes(10);
        assert_eq!(
            repo.revoke("tok", first).await.unwrap(),
            RevokeOutcome::Revoked { at: first }
        );
        assert_eq!(
            repo.revoke("tok", second).await.unwrap(),
            RevokeOutcome::AlreadyRevoked { at: first }
        );

        let stored = repo.find_by_token("tok").await.unwrap().unwrap();
        assert_eq!(stored.revoked_at(), Some(first));
        assert_eq!(repo.revoke("nope", second).await.unwrap(), RevokeOutcome::NotFound);
    }

    #[tokio::test]
    async fn duplicate_token_string_is_a_persistence_error() {
        let (db, owner) = setup().await;
        let repo = SeaOrmRefreshTokenRepository::new(db, Staging::default());
        repo.persist(RefreshToken::new("same", owner, t0())).await.unwrap();

        let err = repo
            .persist(RefreshToken::new("same", owner, t0()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
