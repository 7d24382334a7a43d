//! One join table per `LinkKind`, all driven through the same generic queries

use crate::contract::LinkKind;
use crate::domain::repository::{LinkRepository, StorageResult};
use crate::infra::storage::entity::{
    line_item_seller_item, seller_item_sub_category, ticket_body_label, ticket_body_line_item,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// Join table with an (A, B) composite key
trait LinkTable: EntityTrait {
    type Row: ActiveModelTrait<Entity = Self> + Send;

    const A: Self::Column;
    const B: Self::Column;
    const CREATED_AT: Self::Column;

    fn row(a: Uuid, b: Uuid, linked_by: Uuid, now: DateTime<Utc>) -> Self::Row;
}

impl LinkTable for seller_item_sub_category::Entity {
    type Row = seller_item_sub_category::ActiveModel;

    const A: Self::Column = seller_item_sub_category::Column::SellerItemId;
    const B: Self::Column = seller_item_sub_category::Column::SubCategoryId;
    const CREATED_AT: Self::Column = seller_item_sub_category::Column::CreatedAt;

    fn row(a: Uuid, b: Uuid, linked_by: Uuid, now: DateTime<Utc>) -> Self::Row {
        seller_item_sub_category::ActiveModel {
            seller_item_id: Set(a),
            sub_category_id: Set(b),
            linked_by: Set(linked_by),
            created_at: Set(now),
        }
    }
}

impl LinkTable for ticket_body_line_item::Entity {
    type Row = ticket_body_line_item::ActiveModel;

    const A: Self::Column = ticket_body_line_item::Column::TicketBodyId;
    const B: Self::Column = ticket_body_line_item::Column::TicketLineItemId;
    const CREATED_AT: Self::Column = ticket_body_line_item::Column::CreatedAt;

    fn row(a: Uuid, b: Uuid, linked_by: Uuid, now: DateTime<Utc>) -> Self::Row {
        ticket_body_line_item::ActiveModel {
            ticket_body_id: Set(a),
            ticket_line_item_id: Set(b),
            linked_by: Set(linked_by),
            created_at: Set(now),
        }
    }
}

impl LinkTable for line_item_seller_item::Entity {
    type Row = line_item_seller_item::ActiveModel;

    const A: Self::Column = line_item_seller_item::Column::TicketLineItemId;
    const B: Self::Column = line_item_seller_item::Column::SellerItemId;
    const CREATED_AT: Self::Column = line_item_seller_item::Column::CreatedAt;

    fn row(a: Uuid, b: Uuid, linked_by: Uuid, now: DateTime<Utc>) -> Self::Row {
        line_item_seller_item::ActiveModel {
            ticket_line_item_id: Set(a),
            seller_item_id: Set(b),
            linked_by: Set(linked_by),
            created_at: Set(now),
        }
    }
}

impl LinkTable for ticket_body_label::Entity {
    type Row = ticket_body_label::ActiveModel;

    const A: Self::Column = ticket_body_label::Column::TicketBodyId;
    const B: Self::Column = ticket_body_label::Column::TicketLabelId;
    const CREATED_AT: Self::Column = ticket_body_label::Column::CreatedAt;

    fn row(a: Uuid, b: Uuid, linked_by: Uuid, now: DateTime<Utc>) -> Self::Row {
        ticket_body_label::ActiveModel {
            ticket_body_id: Set(a),
            ticket_label_id: Set(b),
            linked_by: Set(linked_by),
            created_at: Set(now),
        }
    }
}

async fn insert<T: LinkTable, C: ConnectionTrait>(
    db: &C,
    a: Uuid,
    b: Uuid,
    linked_by: Uuid,
) -> StorageResult<()>
where
    T::Model: IntoActiveModel<T::Row>,
{
    T::insert(T::row(a, b, linked_by, Utc::now()))
        .exec_without_returning(db)
        .await?;
    Ok(())
}

async fn delete<T: LinkTable, C: ConnectionTrait>(db: &C, a: Uuid, b: Uuid) -> StorageResult<bool> {
    let result = T::delete_many()
        .filter(T::A.eq(a))
        .filter(T::B.eq(b))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Ids on `select` side of rows whose `by` side equals `id`, oldest link first
async fn list<T: LinkTable, C: ConnectionTrait>(
    db: &C,
    by: T::Column,
    select: T::Column,
    id: Uuid,
) -> StorageResult<Vec<Uuid>> {
    let ids = T::find()
        .select_only()
        .column(select)
        .filter(by.eq(id))
        .order_by_asc(T::CREATED_AT)
        .order_by_asc(select)
        .into_tuple::<Uuid>()
        .all(db)
        .await?;
    Ok(ids)
}

async fn replace<T: LinkTable>(
    db: &DatabaseConnection,
    a: Uuid,
    bs: &[Uuid],
    linked_by: Uuid,
) -> StorageResult<()>
where
    T::Model: IntoActiveModel<T::Row>,
{
    let txn = db.begin().await?;

    T::delete_many().filter(T::A.eq(a)).exec(&txn).await?;

    if !bs.is_empty() {
        let now = Utc::now();
        T::insert_many(bs.iter().map(|b| T::row(a, *b, linked_by, now)))
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(())
}

/// Run a generic link query against the join table of `$kind`
macro_rules! on_table {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            LinkKind::SellerItemInSubCategory => {
                $func::<seller_item_sub_category::Entity, _>($($arg),*).await
            }
            LinkKind::LineItemInTicketBody => {
                $func::<ticket_body_line_item::Entity, _>($($arg),*).await
            }
            LinkKind::SellerItemInLineItem => {
                $func::<line_item_seller_item::Entity, _>($($arg),*).await
            }
            LinkKind::TicketBodyInLabel => {
                $func::<ticket_body_label::Entity, _>($($arg),*).await
            }
        }
    };
}

pub struct SeaOrmLinkRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLinkRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LinkRepository for SeaOrmLinkRepository {
    async fn link(&self, kind: LinkKind, a: Uuid, b: Uuid, linked_by: Uuid) -> StorageResult<()> {
        let db = &*self.db;
        on_table!(kind, insert(db, a, b, linked_by))
    }

    async fn unlink(&self, kind: LinkKind, a: Uuid, b: Uuid) -> StorageResult<bool> {
        let db = &*self.db;
        on_table!(kind, delete(db, a, b))
    }

    async fn list_b(&self, kind: LinkKind, a: Uuid) -> StorageResult<Vec<Uuid>> {
        let db = &*self.db;
        on_table!(kind, list_b(db, a))
    }

    async fn list_a(&self, kind: LinkKind, b: Uuid) -> StorageResult<Vec<Uuid>> {
        let db = &*self.db;
        on_table!(kind, list_a(db, b))
    }

    async fn replace(
        &self,
        kind: LinkKind,
        a: Uuid,
        bs: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<()> {
        let db = &*self.db;
        match kind {
            LinkKind::SellerItemInSubCategory => {
                replace::<seller_item_sub_category::Entity>(db, a, bs, linked_by).await
            }
            LinkKind::LineItemInTicketBody => {
                replace::<ticket_body_line_item::Entity>(db, a, bs, linked_by).await
            }
            LinkKind::SellerItemInLineItem => {
                replace::<line_item_seller_item::Entity>(db, a, bs, linked_by).await
            }
            LinkKind::TicketBodyInLabel => {
                replace::<ticket_body_label::Entity>(db, a, bs, linked_by).await
            }
        }
    }
}

async fn list_b<T: LinkTable, C: ConnectionTrait>(db: &C, a: Uuid) -> StorageResult<Vec<Uuid>> {
    list::<T, C>(db, T::A, T::B, a).await
}

async fn list_a<T: LinkTable, C: ConnectionTrait>(db: &C, b: Uuid) -> StorageResult<Vec<Uuid>> {
    list::<T, C>(db, T::B, T::A, b).await
}
