use super::{convert, convert_all, convert_opt};
use crate::contract::{Page, PageRequest, SellerItem, SellerItemSearchField};
use crate::domain::repository::{SellerItemRepository, StorageResult};
use crate::infra::storage::entity::{
    seller_item, seller_item_sub_category, seller_organisation, sub_category,
};
use crate::infra::storage::{contains_any, fetch_page, like_pattern};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, Query};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmSellerItemRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSellerItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Items linked to a sub-category whose title contains `search`
fn in_category_titled(search: &str) -> Condition {
    let subs = Query::select()
        .column(sub_category::Column::Id)
        .from(sub_category::Entity)
        .and_where(
            Expr::expr(Func::lower(Expr::col(sub_category::Column::Title)))
                .like(like_pattern(search)),
        )
        .to_owned();
    let items = Query::select()
        .column(seller_item_sub_category::Column::SellerItemId)
        .from(seller_item_sub_category::Entity)
        .and_where(Expr::col(seller_item_sub_category::Column::SubCategoryId).in_subquery(subs))
        .to_owned();
    Condition::all().add(seller_item::Column::Id.in_subquery(items))
}

/// Items owned by a seller organisation whose name contains `search`
fn owned_by_seller_named(search: &str) -> Condition {
    let orgs = Query::select()
        .column(seller_organisation::Column::Id)
        .from(seller_organisation::Entity)
        .and_where(
            Expr::expr(Func::lower(Expr::col(
                seller_organisation::Column::CompanyName,
            )))
            .like(like_pattern(search)),
        )
        .to_owned();
    Condition::all().add(seller_item::Column::SellerOrganisationId.in_subquery(orgs))
}

#[async_trait]
impl SellerItemRepository for SeaOrmSellerItemRepository {
    async fn insert(
        &self,
        item: &SellerItem,
        sub_category_ids: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<SellerItem> {
        let txn = self.db.begin().await?;

        let active: seller_item::ActiveModel = item.into();
        let model = seller_item::Entity::insert(active)
            .exec_with_returning(&txn)
            .await?;

        if !sub_category_ids.is_empty() {
            let now = Utc::now();
            let rows = sub_category_ids
                .iter()
                .map(|sub_category_id| seller_item_sub_category::ActiveModel {
                    seller_item_id: Set(item.id),
                    sub_category_id: Set(*sub_category_id),
                    linked_by: Set(linked_by),
                    created_at: Set(now),
                });
            seller_item_sub_category::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        convert(model)
    }

    async fn find(&self, id: Uuid) -> StorageResult<Option<SellerItem>> {
        convert_opt(seller_item::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn find_many(&self, ids: &[Uuid]) -> StorageResult<Vec<SellerItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = seller_item::Entity::find()
            .filter(seller_item::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(seller_item::Column::ProductTitle)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn update(&self, item: &SellerItem) -> StorageResult<SellerItem> {
        let active: seller_item::ActiveModel = item.into();
        let model = seller_item::Entity::update(active).exec(&*self.db).await?;
        convert(model)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> StorageResult<u64> {
        let result = seller_item::Entity::delete_many()
            .filter(seller_item::Column::Id.is_in(ids.iter().copied()))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn filter(
        &self,
        field: SellerItemSearchField,
        search: &str,
    ) -> StorageResult<Vec<SellerItem>> {
        use seller_item::Column;

        let condition = match field {
            SellerItemSearchField::Any => contains_any::<seller_item::Entity, _>(
                &[Column::ProductTitle, Column::BrandModel, Column::ModelNumber],
                search,
            ),
            SellerItemSearchField::BrandModel => {
                contains_any::<seller_item::Entity, _>(&[Column::BrandModel], search)
            }
            SellerItemSearchField::ModelNumber => {
                contains_any::<seller_item::Entity, _>(&[Column::ModelNumber], search)
            }
            SellerItemSearchField::ProductTitle => {
                contains_any::<seller_item::Entity, _>(&[Column::ProductTitle], search)
            }
            SellerItemSearchField::CategoryTitle => in_category_titled(search),
            SellerItemSearchField::SellerOrganisation => owned_by_seller_named(search),
        };

        let models = seller_item::Entity::find()
            .filter(condition)
            .order_by_asc(Column::ProductTitle)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn paginate(&self, request: &PageRequest) -> StorageResult<Page<SellerItem>> {
        fetch_page(&self.db, seller_item::Entity::find(), request).await
    }
}
