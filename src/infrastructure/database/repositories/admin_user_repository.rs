use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, NotSet, QueryFilter, QueryOrder,
    Select, Set, Unchanged,
};

use super::refresh_token_repository::refresh_token_from_model;
use super::staging::{impl_query_gateway, StagedRow, Staging, WriteOp};
use super::db_err;
use crate::domain::admin_user::{
    AdminRole, AdminUser, AdminUserFilter, AdminUserRelation, AdminUserRepository,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{admin_user, refresh_token};

pub struct SeaOrmAdminUserRepository {
    db: DatabaseConnection,
    staging: Staging,
}

impl SeaOrmAdminUserRepository {
    pub fn new(db: DatabaseConnection, staging: Staging) -> Self {
        Self { db, staging }
    }

    fn select(filter: Option<&AdminUserFilter>) -> Select<admin_user::Entity> {
        let mut query = admin_user::Entity::find().order_by_asc(admin_user::Column::Id);
        let Some(f) = filter else {
            return query;
        };
        if let Some(id) = f.id {
            query = query.filter(admin_user::Column::Id.eq(id));
        }
        if let Some(ref username) = f.username {
            query = query.filter(admin_user::Column::Username.eq(username.as_str()));
        }
        if let Some(active) = f.is_active {
            query = query.filter(admin_user::Column::IsActive.eq(active));
        }
        query
    }

    async fn hydrate(
        &self,
        models: Vec<admin_user::Model>,
        include: &[AdminUserRelation],
    ) -> DomainResult<Vec<AdminUser>> {
        let tokens = if include.contains(&AdminUserRelation::RefreshTokens) {
            let loaded = models
                .load_many(refresh_token::Entity, &self.db)
                .await
                .map_err(db_err)?;
            loaded.into_iter().map(Some).collect()
        } else {
            vec![None; models.len()]
        };

        Ok(models
            .into_iter()
            .zip(tokens)
            .map(|(model, tokens)| {
                let mut user = admin_user_from_model(model);
                user.refresh_tokens =
                    tokens.map(|t| t.into_iter().map(refresh_token_from_model).collect());
                user
            })
            .collect())
    }

    fn to_active(user: &AdminUser) -> admin_user::ActiveModel {
        admin_user::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
            last_login_at: Set(user.last_login_at),
            is_active: Set(user.is_active),
            role: Set(role_to_entity(user.role)),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_entity(role: AdminRole) -> admin_user::AdminRole {
    match role {
        AdminRole::SuperAdmin => admin_user::AdminRole::SuperAdmin,
        AdminRole::Admin => admin_user::AdminRole::Admin,
        AdminRole::Employee => admin_user::AdminRole::Employee,
    }
}

fn role_from_entity(role: admin_user::AdminRole) -> AdminRole {
    match role {
        admin_user::AdminRole::SuperAdmin => AdminRole::SuperAdmin,
        admin_user::AdminRole::Admin => AdminRole::Admin,
        admin_user::AdminRole::Employee => AdminRole::Employee,
    }
}

pub(crate) fn admin_user_from_model(model: admin_user::Model) -> AdminUser {
    AdminUser {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at,
        last_login_at: model.last_login_at,
        is_active: model.is_active,
        role: role_from_entity(model.role),
        refresh_tokens: None,
    }
}

impl_query_gateway!(
    SeaOrmAdminUserRepository,
    AdminUser,
    AdminUserFilter,
    AdminUserRelation,
    AdminUser
);

impl AdminUserRepository for SeaOrmAdminUserRepository {
    fn stamp_last_login(&self, id: i32, at: DateTime<Utc>) {
        let row = admin_user::ActiveModel {
            id: Unchanged(id),
            username: NotSet,
            password_hash: NotSet,
            created_at: NotSet,
            last_login_at: Set(Some(at)),
            is_active: NotSet,
            role: NotSet,
        };
        self.staging.push(WriteOp::Update, StagedRow::AdminUser(row));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::repositories::{QueryGateway, UnitOfWork};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmUnitOfWork;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn last_login_stamp_keeps_concurrent_account_changes() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let setup = SeaOrmUnitOfWork::new(db.clone());
        setup
            .admin_users()
            .add(AdminUser::new("admin1", "$2b$04$old", AdminRole::Admin, t0()));
        setup.commit().await.unwrap();

        let by_name = AdminUserFilter::by_username("admin1");
        let login = SeaOrmUnitOfWork::new(db.clone());
        let seen = login.admin_users().get_one(&by_name, &[]).await.unwrap().unwrap();
        assert!(seen.is_active);

        // Another request disables the account and rotates its password.
        let admin = SeaOrmUnitOfWork::new(db.clone());
        let mut changed = seen.clone();
        changed.is_active = false;
        changed.password_hash = "$2b$04$new".into();
        admin.admin_users().update(changed);
        admin.commit().await.unwrap();

        let stamp = t0() + Duration::minutes(1);
        login.admin_users().stamp_last_login(seen.id, stamp);
        assert_eq!(login.commit().await.unwrap(), 1);

        let after = login.admin_users().get_one(&by_name, &[]).await.unwrap().unwrap();
        assert!(!after.is_active);
        assert_eq!(after.password_hash, "$2b$04$new");
        assert_eq!(after.last_login_at, Some(stamp));
    }
}
