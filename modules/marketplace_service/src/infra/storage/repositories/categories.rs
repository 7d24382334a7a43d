use super::{convert, convert_all, convert_opt};
use crate::contract::{
    CategorySnapshot, EventLog, EventType, MainCategory, Page, PageRequest, RefreshSummary,
    SubCategory,
};
use crate::domain::repository::{CategoryRepository, StorageResult};
use crate::infra::storage::entity::{event_log, main_category, sub_category};
use crate::infra::storage::{contains_any, fetch_page};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmCategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn apply_snapshot(&self, snapshot: &[CategorySnapshot]) -> StorageResult<RefreshSummary> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let mut summary = RefreshSummary::default();

        for main in snapshot {
            let existing = main_category::Entity::find()
                .filter(main_category::Column::ExternalId.eq(main.external_id.as_str()))
                .one(&txn)
                .await?;

            let main_id = match existing {
                Some(model) => {
                    let id = model.id;
                    let mut active: main_category::ActiveModel = model.into();
                    active.title = Set(main.title.clone());
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                    id
                }
                None => {
                    let id = Uuid::new_v4();
                    main_category::ActiveModel {
                        id: Set(id),
                        external_id: Set(main.external_id.clone()),
                        title: Set(main.title.clone()),
                        updated_at: Set(now),
                    }
                    .insert(&txn)
                    .await?;
                    id
                }
            };
            summary.main_categories += 1;

            for sub in &main.sub_categories {
                let existing = sub_category::Entity::find()
                    .filter(sub_category::Column::ExternalId.eq(sub.external_id.as_str()))
                    .one(&txn)
                    .await?;

                match existing {
                    Some(model) => {
                        let mut active: sub_category::ActiveModel = model.into();
                        active.title = Set(sub.title.clone());
                        active.main_category_id = Set(main_id);
                        active.updated_at = Set(now);
                        active.update(&txn).await?;
                    }
                    None => {
                        sub_category::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            external_id: Set(sub.external_id.clone()),
                            main_category_id: Set(main_id),
                            title: Set(sub.title.clone()),
                            updated_at: Set(now),
                        }
                        .insert(&txn)
                        .await?;
                    }
                }
                summary.sub_categories += 1;
            }
        }

        txn.commit().await?;
        Ok(summary)
    }

    async fn list_main(&self) -> StorageResult<Vec<MainCategory>> {
        let models = main_category::Entity::find()
            .order_by_asc(main_category::Column::Title)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn find_sub(&self, id: Uuid) -> StorageResult<Option<SubCategory>> {
        convert_opt(sub_category::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn find_subs(&self, ids: &[Uuid]) -> StorageResult<Vec<SubCategory>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = sub_category::Entity::find()
            .filter(sub_category::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(sub_category::Column::Title)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn filter_subs(&self, search: &str) -> StorageResult<Vec<SubCategory>> {
        let models = sub_category::Entity::find()
            .filter(contains_any::<sub_category::Entity, _>(
                &[sub_category::Column::Title],
                search,
            ))
            .order_by_asc(sub_category::Column::Title)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn paginate_subs(&self, request: &PageRequest) -> StorageResult<Page<SubCategory>> {
        fetch_page(&self.db, sub_category::Entity::find(), request).await
    }

    async fn delete_all(&self) -> StorageResult<u64> {
        let txn = self.db.begin().await?;
        let subs = sub_category::Entity::delete_many().exec(&txn).await?;
        let mains = main_category::Entity::delete_many().exec(&txn).await?;
        txn.commit().await?;
        Ok(subs.rows_affected + mains.rows_affected)
    }

    async fn append_event(&self, event: &EventLog) -> StorageResult<EventLog> {
        let active: event_log::ActiveModel = event.into();
        let model = event_log::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn last_event(
        &self,
        event_type: EventType,
        entity: &str,
    ) -> StorageResult<Option<EventLog>> {
        let model = event_log::Entity::find()
            .filter(event_log::Column::EventType.eq(event_type.as_str()))
            .filter(event_log::Column::EntityName.eq(entity))
            .order_by_desc(event_log::Column::CreatedAt)
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }
}
