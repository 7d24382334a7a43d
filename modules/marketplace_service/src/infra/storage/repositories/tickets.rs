use super::{convert, convert_all, convert_opt};
use crate::contract::{TicketBody, TicketLabel, TicketLineItem};
use crate::domain::repository::{StorageResult, TicketRepository};
use crate::infra::storage::entity::{
    ticket_body, ticket_body_line_item, ticket_label, ticket_line_item,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmTicketRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTicketRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    // ===== Ticket bodies =====

    async fn insert_ticket(&self, ticket: &TicketBody) -> StorageResult<TicketBody> {
        let active: ticket_body::ActiveModel = ticket.into();
        let model = ticket_body::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_ticket(&self, id: Uuid) -> StorageResult<Option<TicketBody>> {
        convert_opt(ticket_body::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn find_tickets(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketBody>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ticket_body::Entity::find()
            .filter(ticket_body::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(ticket_body::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn list_tickets(
        &self,
        buyer_organisation_id: Option<Uuid>,
    ) -> StorageResult<Vec<TicketBody>> {
        let mut query = ticket_body::Entity::find();
        if let Some(org_id) = buyer_organisation_id {
            query = query.filter(ticket_body::Column::BuyerOrganisationId.eq(org_id));
        }
        let models = query
            .order_by_asc(ticket_body::Column::CreatedAt)
            .order_by_asc(ticket_body::Column::Id)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn update_ticket(&self, ticket: &TicketBody) -> StorageResult<TicketBody> {
        let active: ticket_body::ActiveModel = ticket.into();
        let model = ticket_body::Entity::update(active).exec(&*self.db).await?;
        convert(model)
    }

    async fn delete_tickets(&self, ids: &[Uuid]) -> StorageResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let txn = self.db.begin().await?;

        let line_item_ids: Vec<Uuid> = ticket_body_line_item::Entity::find()
            .select_only()
            .column(ticket_body_line_item::Column::TicketLineItemId)
            .filter(ticket_body_line_item::Column::TicketBodyId.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&txn)
            .await?;

        if !line_item_ids.is_empty() {
            let removed = ticket_line_item::Entity::delete_many()
                .filter(ticket_line_item::Column::Id.is_in(line_item_ids))
                .exec(&txn)
                .await?;
            tracing::debug!(count = removed.rows_affected, "removed line items of deleted tickets");
        }

        let result = ticket_body::Entity::delete_many()
            .filter(ticket_body::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }

    // ===== Line items =====

    async fn insert_line_item(
        &self,
        line_item: &TicketLineItem,
        ticket_id: Uuid,
        linked_by: Uuid,
    ) -> StorageResult<TicketLineItem> {
        let txn = self.db.begin().await?;

        let active: ticket_line_item::ActiveModel = line_item.into();
        let model = ticket_line_item::Entity::insert(active)
            .exec_with_returning(&txn)
            .await?;

        ticket_body_line_item::Entity::insert(ticket_body_line_item::ActiveModel {
            ticket_body_id: Set(ticket_id),
            ticket_line_item_id: Set(line_item.id),
            linked_by: Set(linked_by),
            created_at: Set(Utc::now()),
        })
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        convert(model)
    }

    async fn find_line_item(&self, id: Uuid) -> StorageResult<Option<TicketLineItem>> {
        convert_opt(ticket_line_item::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn find_line_items(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketLineItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ticket_line_item::Entity::find()
            .filter(ticket_line_item::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(ticket_line_item::Column::CreatedAt)
            .order_by_asc(ticket_line_item::Column::Id)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn update_line_item(
        &self,
        line_item: &TicketLineItem,
    ) -> StorageResult<TicketLineItem> {
        let active: ticket_line_item::ActiveModel = line_item.into();
        let model = ticket_line_item::Entity::update(active)
            .exec(&*self.db)
            .await?;
        convert(model)
    }

    async fn delete_line_items(&self, ids: &[Uuid]) -> StorageResult<u64> {
        let result = ticket_line_item::Entity::delete_many()
            .filter(ticket_line_item::Column::Id.is_in(ids.iter().copied()))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    // ===== Labels =====

    async fn insert_label(&self, label: &TicketLabel) -> StorageResult<TicketLabel> {
        let active: ticket_label::ActiveModel = label.into();
        let model = ticket_label::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_label(&self, id: Uuid) -> StorageResult<Option<TicketLabel>> {
        convert_opt(ticket_label::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn find_labels(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketLabel>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ticket_label::Entity::find()
            .filter(ticket_label::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(ticket_label::Column::Title)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn update_label(&self, label: &TicketLabel) -> StorageResult<TicketLabel> {
        let active: ticket_label::ActiveModel = label.into();
        let model = ticket_label::Entity::update(active).exec(&*self.db).await?;
        convert(model)
    }

    async fn list_labels(&self) -> StorageResult<Vec<TicketLabel>> {
        let models = ticket_label::Entity::find()
            .order_by_asc(ticket_label::Column::Title)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }
}
