use super::{convert, convert_opt};
use crate::contract::{Permission, User, UserRole};
use crate::domain::repository::{AccessRepository, StorageResult};
use crate::infra::storage::entity::{permission, user, user_role, user_role_permission, user_role_user};
use crate::infra::storage::equals_ignore_case;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmAccessRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAccessRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccessRepository for SeaOrmAccessRepository {
    async fn insert_user(&self, user: &User) -> StorageResult<User> {
        let active: user::ActiveModel = user.into();
        let model = user::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_user(&self, id: Uuid) -> StorageResult<Option<User>> {
        convert_opt(user::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let model = user::Entity::find()
            .filter(equals_ignore_case::<user::Entity, _>(
                user::Column::Email,
                email,
            ))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    async fn delete_users(&self, ids: &[Uuid]) -> StorageResult<u64> {
        let result = user::Entity::delete_many()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert_role(&self, role: &UserRole) -> StorageResult<UserRole> {
        let active: user_role::ActiveModel = role.into();
        let model = user_role::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_role(&self, id: Uuid) -> StorageResult<Option<UserRole>> {
        convert_opt(user_role::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn ensure_permissions(&self, values: &[&str]) -> StorageResult<Vec<Permission>> {
        let txn = self.db.begin().await?;

        let existing: HashSet<String> = permission::Entity::find()
            .filter(permission::Column::Value.is_in(values.iter().copied()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| p.value)
            .collect();

        let mut seen = HashSet::new();
        let missing: Vec<permission::ActiveModel> = values
            .iter()
            .filter(|v| !existing.contains(**v) && seen.insert(**v))
            .map(|v| permission::ActiveModel {
                id: Set(Uuid::new_v4()),
                value: Set((*v).to_string()),
            })
            .collect();

        if !missing.is_empty() {
            tracing::debug!(count = missing.len(), "inserting permissions");
            permission::Entity::insert_many(missing)
                .exec_without_returning(&txn)
                .await?;
        }

        let all = permission::Entity::find()
            .filter(permission::Column::Value.is_in(values.iter().copied()))
            .order_by_asc(permission::Column::Value)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(all.into_iter().map(Permission::from).collect())
    }

    async fn find_permission_by_value(&self, value: &str) -> StorageResult<Option<Permission>> {
        let model = permission::Entity::find()
            .filter(permission::Column::Value.eq(value))
            .one(&*self.db)
            .await?;
        Ok(model.map(Permission::from))
    }

    async fn replace_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<()> {
        let txn = self.db.begin().await?;

        user_role_permission::Entity::delete_many()
            .filter(user_role_permission::Column::UserRoleId.eq(role_id))
            .exec(&txn)
            .await?;

        let now = Utc::now();
        let rows: Vec<user_role_permission::ActiveModel> = unique(permission_ids)
            .map(|permission_id| user_role_permission::ActiveModel {
                user_role_id: Set(role_id),
                permission_id: Set(permission_id),
                linked_by: Set(linked_by),
                created_at: Set(now),
            })
            .collect();
        if !rows.is_empty() {
            user_role_permission::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn replace_user_roles(
        &self,
        user_id: Uuid,
        role_ids: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<()> {
        let txn = self.db.begin().await?;

        user_role_user::Entity::delete_many()
            .filter(user_role_user::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        let now = Utc::now();
        let rows: Vec<user_role_user::ActiveModel> = unique(role_ids)
            .map(|role_id| user_role_user::ActiveModel {
                user_role_id: Set(role_id),
                user_id: Set(user_id),
                linked_by: Set(linked_by),
                created_at: Set(now),
            })
            .collect();
        if !rows.is_empty() {
            user_role_user::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn permission_values_for_user(&self, user_id: Uuid) -> StorageResult<Vec<String>> {
        let roles = Query::select()
            .column(user_role_user::Column::UserRoleId)
            .from(user_role_user::Entity)
            .and_where(Expr::col(user_role_user::Column::UserId).eq(user_id))
            .to_owned();
        let granted = Query::select()
            .column(user_role_permission::Column::PermissionId)
            .from(user_role_permission::Entity)
            .and_where(Expr::col(user_role_permission::Column::UserRoleId).in_subquery(roles))
            .to_owned();

        let values = permission::Entity::find()
            .select_only()
            .column(permission::Column::Value)
            .filter(permission::Column::Id.in_subquery(granted))
            .order_by_asc(permission::Column::Value)
            .into_tuple::<String>()
            .all(&*self.db)
            .await?;
        Ok(values)
    }
}

/// Ids in first-seen order without duplicates
fn unique(ids: &[Uuid]) -> impl Iterator<Item = Uuid> + '_ {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(move |id| seen.insert(*id))
}
