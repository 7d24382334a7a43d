//! Ticket workflow service

use super::{ensure_user, publish};
use crate::contract::{
    Action, FieldChange, LinkKind, MarketplaceError, NewTicketBody, TicketBody,
    TicketGeneralDetails, TicketLineItem, TicketStatus, TicketTransition, TicketUpdate,
    Transitioned,
};
use crate::domain::events::{EventPublisher, WorkflowEvent};
use crate::domain::permission::PermissionResolver;
use crate::domain::repository::{
    AccessRepository, BuyerOrganisationRepository, LinkRepository, TicketRepository,
};
use crate::domain::validation::{normalize_optional, require_text};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Procurement tickets and their status workflow
pub struct TicketService {
    ticket_repo: Arc<dyn TicketRepository>,
    buyer_repo: Arc<dyn BuyerOrganisationRepository>,
    access_repo: Arc<dyn AccessRepository>,
    link_repo: Arc<dyn LinkRepository>,
    permissions: Arc<PermissionResolver>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TicketService {
    pub fn new(
        ticket_repo: Arc<dyn TicketRepository>,
        buyer_repo: Arc<dyn BuyerOrganisationRepository>,
        access_repo: Arc<dyn AccessRepository>,
        link_repo: Arc<dyn LinkRepository>,
        permissions: Arc<PermissionResolver>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            ticket_repo,
            buyer_repo,
            access_repo,
            link_repo,
            permissions,
            event_publisher,
        }
    }

    // ===== Queries =====

    pub async fn get(&self, ticket_id: Uuid) -> Result<TicketBody, MarketplaceError> {
        self.ticket_repo
            .find_ticket(ticket_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("ticket_body", ticket_id))
    }

    /// All tickets, optionally restricted to one buyer organisation
    pub async fn list(
        &self,
        buyer_organisation_id: Option<Uuid>,
    ) -> Result<Vec<TicketBody>, MarketplaceError> {
        Ok(self.ticket_repo.list_tickets(buyer_organisation_id).await?)
    }

    /// Line items linked to the ticket
    pub async fn line_items(&self, ticket_id: Uuid) -> Result<Vec<TicketLineItem>, MarketplaceError> {
        self.get(ticket_id).await?;
        let ids = self
            .link_repo
            .list_b(LinkKind::LineItemInTicketBody, ticket_id)
            .await?;
        Ok(self.ticket_repo.find_line_items(&ids).await?)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MarketplaceError> {
        let deleted = self.ticket_repo.delete_tickets(ids).await?;
        tracing::info!(requested = ids.len(), deleted, "deleted ticket bodies");
        Ok(deleted)
    }

    // ===== Workflow =====

    /// Insert a ticket; it starts CLAIMED when an owner is supplied, OPEN otherwise
    pub async fn create(
        &self,
        buyer_organisation_id: Uuid,
        ticket: NewTicketBody,
        acting_user: Uuid,
    ) -> Result<TicketBody, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketCreate)
            .await?;
        require_text("title", &ticket.title)?;

        if self.buyer_repo.find(buyer_organisation_id).await?.is_none() {
            return Err(MarketplaceError::not_found(
                "buyer_organisation",
                buyer_organisation_id,
            ));
        }
        if let Some(owner_id) = ticket.owner_id {
            ensure_user(self.access_repo.as_ref(), owner_id).await?;
        }

        let now = Utc::now();
        let record = TicketBody {
            id: Uuid::new_v4(),
            buyer_organisation_id,
            title: ticket.title.trim().to_string(),
            priority: ticket.priority,
            deadline: ticket.deadline,
            status: TicketStatus::initial(ticket.owner_id.is_some()),
            owner_id: ticket.owner_id,
            void_remark: None,
            created_by: acting_user,
            created_at: now,
            updated_at: now,
        };

        let created = self.ticket_repo.insert_ticket(&record).await?;
        tracing::info!(ticket_id = %created.id, status = %created.status, "ticket created");
        publish(
            self.event_publisher.as_ref(),
            WorkflowEvent::ticket_created(&created, acting_user),
        )
        .await;
        Ok(created)
    }

    /// Assign the owner; an OPEN ticket becomes CLAIMED
    pub async fn set_owner(
        &self,
        ticket_id: Uuid,
        owner_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketOwnerUpdate)
            .await?;
        ensure_user(self.access_repo.as_ref(), owner_id).await?;

        let current = self.get(ticket_id).await?;
        let mut next = current.clone();
        let changes = assign_owner(&mut next, owner_id);
        self.commit(current, next, changes, acting_user).await
    }

    /// Replace title, priority, deadline and void remark; status and owner untouched
    pub async fn update_general_details(
        &self,
        ticket_id: Uuid,
        details: TicketGeneralDetails,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketDetailsUpdate)
            .await?;
        require_text("title", &details.title)?;

        let current = self.get(ticket_id).await?;
        let mut next = current.clone();
        let changes = apply_details(&mut next, details);
        self.commit(current, next, changes, acting_user).await
    }

    /// Merged owner and general-details update with the same claim rule as `set_owner`
    pub async fn update(
        &self,
        ticket_id: Uuid,
        update: TicketUpdate,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketUpdate)
            .await?;
        require_text("title", &update.details.title)?;
        if let Some(owner_id) = update.owner_id {
            ensure_user(self.access_repo.as_ref(), owner_id).await?;
        }

        let current = self.get(ticket_id).await?;
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
        ticket_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketStartSourcing)
            .await?;

        let current = self.get(ticket_id).await?;
        if current.owner_id.is_none() {
            return Err(MarketplaceError::precondition(
                "ticket has no owner; assign one before sourcing",
            ));
        }

        let mut next = current.clone();
        next.status = current.status.start_sourcing()?;
        self.commit(current, next, vec![FieldChange::Status], acting_user)
            .await
    }

    /// SOURCING -> COMPLETED once every linked line item is settled
    pub async fn complete(
        &self,
        ticket_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketComplete)
            .await?;

        let current = self.get(ticket_id).await?;
        let line_item_ids = self
            .link_repo
            .list_b(LinkKind::LineItemInTicketBody, ticket_id)
            .await?;
        let line_items = self.ticket_repo.find_line_items(&line_item_ids).await?;
        let settled = line_items.iter().all(|item| item.status.is_settled());

        let mut next = current.clone();
        next.status = current.status.complete(settled)?;
        self.commit(current, next, vec![FieldChange::Status], acting_user)
            .await
    }

    /// Any non-terminal status -> VOID, storing the remark
    pub async fn void(
        &self,
        ticket_id: Uuid,
        remark: String,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.permissions
            .require(acting_user, Action::TicketVoid)
            .await?;
        require_text("voidRemark", &remark)?;

        let current = self.get(ticket_id).await?;
        let mut next = current.clone();
        next.status = current.status.void()?;
        next.void_remark = Some(remark.trim().to_string());

        let mut changes = vec![FieldChange::Status];
        if next.void_remark != current.void_remark {
            changes.push(FieldChange::VoidRemark);
        }
        self.commit(current, next, changes, acting_user).await
    }

    /// Persist `next` if anything changed and publish the transition
    async fn commit(
        &self,
        current: TicketBody,
        mut next: TicketBody,
        changes: Vec<FieldChange>,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        if changes.is_empty() {
            return Ok(Transitioned {
                from: current.status,
                to: current.status,
                value: current,
                changes,
            });
        }

        next.updated_at = Utc::now();
        let stored = self.ticket_repo.update_ticket(&next).await?;
        let transition = Transitioned {
            from: current.status,
            to: stored.status,
            value: stored,
            changes,
        };

        tracing::debug!(
            ticket_id = %transition.value.id,
            from = %transition.from,
            to = %transition.to,
            "ticket updated"
        );
        publish(
            self.event_publisher.as_ref(),
            WorkflowEvent::ticket_transitioned(&transition, acting_user),
        )
        .await;
        Ok(transition)
    }
}

fn assign_owner(ticket: &mut TicketBody, owner_id: Uuid) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if ticket.owner_id != Some(owner_id) {
        ticket.owner_id = Some(owner_id);
        changes.push(FieldChange::Owner);
    }

    let status = ticket.status.on_owner_assigned();
    if status != ticket.status {
        ticket.status = status;
        changes.push(FieldChange::Status);
    }
    changes
}

fn apply_details(ticket: &mut TicketBody, details: TicketGeneralDetails) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    let title = details.title.trim().to_string();

    if ticket.title != title || ticket.priority != details.priority || ticket.deadline != details.deadline
    {
        ticket.title = title;
        ticket.priority = details.priority;
        ticket.deadline = details.deadline;
        changes.push(FieldChange::GeneralDetails);
    }

    // a VOID ticket always keeps a remark; blank input leaves it as is
    let void_remark = match normalize_optional(details.void_remark) {
        None if ticket.status == TicketStatus::Void => ticket.void_remark.clone(),
        remark => remark,
    };
    if ticket.void_remark != void_remark {
        ticket.void_remark = void_remark;
        changes.push(FieldChange::VoidRemark);
    }
    changes
}
