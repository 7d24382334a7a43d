//! Ticket line item workflow service

use super::{ensure_user, publish};
use crate::contract::{
    Action, FieldChange, LineItemGeneralDetails, LineItemStatus, LineItemTransition,
    LineItemUpdate, LinkKind, MarketplaceError, NewTicketLineItem, TicketLineItem, Transitioned,
};
use crate::domain::events::{EventPublisher, WorkflowEvent};
use crate::domain::permission::PermissionResolver;
use crate::domain::repository::{AccessRepository, LinkRepository, TicketRepository};
use crate::domain::validation::{normalize_optional, require_text, validate_budget, validate_quantity};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Line items and their sourcing workflow
pub struct LineItemService {
    ticket_repo: Arc<dyn TicketRepository>,
    access_repo: Arc<dyn AccessRepository>,
    link_repo: Arc<dyn LinkRepository>,
    permissions: Arc<PermissionResolver>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl LineItemService {
    pub fn new(
        ticket_repo: Arc<dyn TicketRepository>,
        access_repo: Arc<dyn AccessRepository>,
        link_repo: Arc<dyn LinkRepository>,
        permissions: Arc<PermissionResolver>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            ticket_repo,
            access_repo,
            link_repo,
            permissions,
            event_publisher,
        }
    }

    // ===== Queries =====

    pub async fn get(&self, line_item_id: Uuid) -> Result<TicketLineItem, MarketplaceError> {
        self.ticket_repo
            .find_line_item(line_item_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("ticket_line_item", line_item_id))
    }

    /// Fetch a line item, failing with `NotFound` unless it belongs to the ticket
    pub async fn get_in_ticket(
        &self,
        ticket_id: Uuid,
        line_item_id: Uuid,
    ) -> Result<TicketLineItem, MarketplaceError> {
        let line_item = self.get(line_item_id).await?;
        let tickets = self
            .link_repo
            .list_a(LinkKind::LineItemInTicketBody, line_item_id)
            .await?;
        if !tickets.contains(&ticket_id) {
            return Err(MarketplaceError::not_found(
                "ticket_line_item",
                format!("{} in ticket_body {}", line_item_id, ticket_id),
            ));
        }
        Ok(line_item)
    }

    /// Ticket the line item is linked to, if any
    pub async fn ticket_of(&self, line_item_id: Uuid) -> Result<Option<Uuid>, MarketplaceError> {
        self.get(line_item_id).await?;
        let tickets = self
            .link_repo
            .list_a(LinkKind::LineItemInTicketBody, line_item_id)
            .await?;
        Ok(tickets.into_iter().next())
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MarketplaceError> {
        let deleted = self.ticket_repo.delete_line_items(ids).await?;
        tracing::info!(requested = ids.len(), deleted, "deleted ticket line items");
        Ok(deleted)
    }

    // ===== Workflow =====

    /// Insert a line item inside a ticket and link the two
    pub async fn create(
        &self,
        ticket_id: Uuid,
        line_item: NewTicketLineItem,
        acting_user: Uuid,
    ) -> Result<TicketLineItem, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemCreate)
            .await?;
        validate_details(&line_item.details)?;

        let ticket = self
            .ticket_repo
            .find_ticket(ticket_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("ticket_body", ticket_id))?;
        if ticket.status.is_terminal() {
            return Err(MarketplaceError::precondition(format!(
                "cannot add line items to a ticket in status {}",
                ticket.status
            )));
        }
        if let Some(owner_id) = line_item.owner_id {
            ensure_user(self.access_repo.as_ref(), owner_id).await?;
        }

        let now = Utc::now();
        let details = line_item.details;
        let record = TicketLineItem {
            id: Uuid::new_v4(),
            item_name: details.item_name.trim().to_string(),
            quantity: details.quantity,
            budget_cents: details.budget_cents,
            deadline: details.deadline,
            sourcing_remarks: normalize_optional(details.sourcing_remarks),
            status: LineItemStatus::initial(line_item.owner_id.is_some()),
            owner_id: line_item.owner_id,
            created_by: acting_user,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .ticket_repo
            .insert_line_item(&record, ticket_id, acting_user)
            .await?;
        tracing::info!(
            line_item_id = %created.id,
            %ticket_id,
            status = %created.status,
            "line item created"
        );
        publish(
            self.event_publisher.as_ref(),
            WorkflowEvent::line_item_created(&created, ticket_id, acting_user),
        )
        .await;
        Ok(created)
    }

    /// Assign the owner; an OPEN line item becomes CLAIMED
    pub async fn set_owner(
        &self,
        line_item_id: Uuid,
        owner_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemOwnerUpdate)
            .await?;
        ensure_user(self.access_repo.as_ref(), owner_id).await?;

        let current = self.get(line_item_id).await?;
        self.ensure_ticket_active(line_item_id).await?;
        let mut next = current.clone();
        let changes = assign_owner(&mut next, owner_id);
        self.commit(current, next, changes, acting_user).await
    }

    /// Replace name, quantity, budget, deadline and remarks; status and owner untouched
    pub async fn update_general_details(
        &self,
        line_item_id: Uuid,
        details: LineItemGeneralDetails,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemDetailsUpdate)
            .await?;
        validate_details(&details)?;

        let current = self.get(line_item_id).await?;
        let mut next = current.clone();
        let changes = apply_details(&mut next, details);
        self.commit(current, next, changes, acting_user).await
    }

    pub async fn update(
        &self,
        line_item_id: Uuid,
        update: LineItemUpdate,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemUpdate)
            .await?;
        validate_details(&update.details)?;
        if let Some(owner_id) = update.owner_id {
            ensure_user(self.access_repo.as_ref(), owner_id).await?;
        }

        let current = self.get(line_item_id).await?;
        if update.owner_id.is_some() {
            self.ensure_ticket_active(line_item_id).await?;
        }
        let mut next = current.clone();
        let mut changes = apply_details(&mut next, update.details);
        if let Some(owner_id) = update.owner_id {
            changes.extend(assign_owner(&mut next, owner_id));
        }
        self.commit(current, next, changes, acting_user).await
    }

    /// CLAIMED -> SOURCING
    pub async fn start_sourcing(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemStartSourcing)
            .await?;

        let current = self.get(line_item_id).await?;
        self.ensure_ticket_active(line_item_id).await?;
        if current.owner_id.is_none() {
            return Err(MarketplaceError::precondition(
                "line item has no owner; assign one before sourcing",
            ));
        }

        let mut next = current.clone();
        next.status = current.status.start_sourcing()?;
        self.commit(current, next, vec![FieldChange::Status], acting_user)
            .await
    }

    /// SOURCING -> SOURCED; at least one seller item must be linked
    pub async fn mark_sourced(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemSourced)
            .await?;

        let current = self.get(line_item_id).await?;
        self.ensure_ticket_active(line_item_id).await?;
        let next_status = current.status.mark_sourced()?;

        let seller_items = self
            .link_repo
            .list_b(LinkKind::SellerItemInLineItem, line_item_id)
            .await?;
        if seller_items.is_empty() {
            return Err(MarketplaceError::precondition(
                "link at least one seller item before marking the line item as sourced",
            ));
        }

        let mut next = current.clone();
        next.status = next_status;
        self.commit(current, next, vec![FieldChange::Status], acting_user)
            .await
    }

    /// Any unsettled status -> UNABLE_TO_SOURCE
    pub async fn mark_unable_to_source(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::LineItemUnableToSource)
            .await?;

        let current = self.get(line_item_id).await?;
        self.ensure_ticket_active(line_item_id).await?;
        let mut next = current.clone();
        next.status = current.status.mark_unable_to_source()?;
        self.commit(current, next, vec![FieldChange::Status], acting_user)
            .await
    }

    /// Owner and sourcing changes are frozen once the parent ticket is VOID or COMPLETED
    async fn ensure_ticket_active(&self, line_item_id: Uuid) -> Result<(), MarketplaceError> {
        let ticket_ids = self
            .link_repo
            .list_a(LinkKind::LineItemInTicketBody, line_item_id)
            .await?;
        for ticket_id in ticket_ids {
            let Some(ticket) = self.ticket_repo.find_ticket(ticket_id).await? else {
                continue;
            };
            if ticket.status.is_terminal() {
                return Err(MarketplaceError::precondition(format!(
                    "line item belongs to ticket {} in status {}",
                    ticket_id, ticket.status
                )));
            }
        }
        Ok(())
    }

    async fn commit(
        &self,
        current: TicketLineItem,
        mut next: TicketLineItem,
        changes: Vec<FieldChange>,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        if changes.is_empty() {
            return Ok(Transitioned {
                from: current.status,
                to: current.status,
                value: current,
                changes,
            });
        }

        next.updated_at = Utc::now();
        let stored = self.ticket_repo.update_line_item(&next).await?;
        let transition = Transitioned {
            from: current.status,
            to: stored.status,
            value: stored,
            changes,
        };

        tracing::debug!(
            line_item_id = %transition.value.id,
            from = %transition.from,
            to = %transition.to,
            "line item updated"
        );
        publish(
            self.event_publisher.as_ref(),
            WorkflowEvent::line_item_transitioned(&transition, acting_user),
        )
        .await;
        Ok(transition)
    }
}

fn validate_details(details: &LineItemGeneralDetails) -> Result<(), MarketplaceError> {
    require_text("itemName", &details.item_name)?;
    validate_quantity(details.quantity)?;
    validate_budget(details.budget_cents)
}

fn assign_owner(line_item: &mut TicketLineItem, owner_id: Uuid) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if line_item.owner_id != Some(owner_id) {
        line_item.owner_id = Some(owner_id);
        changes.push(FieldChange::Owner);
    }

    let status = line_item.status.on_owner_assigned();
    if status != line_item.status {
        line_item.status = status;
        changes.push(FieldChange::Status);
    }
    changes
}

fn apply_details(line_item: &mut TicketLineItem, details: LineItemGeneralDetails) -> Vec<FieldChange> {
    let item_name = details.item_name.trim().to_string();
    let sourcing_remarks = normalize_optional(details.sourcing_remarks);

    let unchanged = line_item.item_name == item_name
        && line_item.quantity == details.quantity
        && line_item.budget_cents == details.budget_cents
        && line_item.deadline == details.deadline
        && line_item.sourcing_remarks == sourcing_remarks;
    if unchanged {
        return Vec::new();
    }

    line_item.item_name = item_name;
    line_item.quantity = details.quantity;
    line_item.budget_cents = details.budget_cents;
    line_item.deadline = details.deadline;
    line_item.sourcing_remarks = sourcing_remarks;
    vec![FieldChange::GeneralDetails]
}
