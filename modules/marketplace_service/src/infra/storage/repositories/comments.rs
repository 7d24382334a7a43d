use super::{convert, convert_all, convert_opt};
use crate::contract::{Comment, CommentTarget};
use crate::domain::repository::{CommentRepository, StorageResult};
use crate::infra::storage::entity::comment;
use crate::infra::storage::mapper::comment_target_columns;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmCommentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCommentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn insert(&self, comment: &Comment) -> StorageResult<Comment> {
        let active: comment::ActiveModel = comment.into();
        let model = comment::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find(&self, id: Uuid) -> StorageResult<Option<Comment>> {
        convert_opt(comment::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn update(&self, comment: &Comment) -> StorageResult<Comment> {
        let active: comment::ActiveModel = comment.into();
        let model = comment::Entity::update(active).exec(&*self.db).await?;
        convert(model)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        comment::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    async fn list_for_target(&self, target: CommentTarget) -> StorageResult<Vec<Comment>> {
        let (target_type, target_id) = comment_target_columns(target);
        let models = comment::Entity::find()
            .filter(comment::Column::TargetType.eq(target_type))
            .filter(comment::Column::TargetId.eq(target_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }
}
