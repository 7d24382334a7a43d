//! Native client implementation - wraps domain services for in-process calls

use crate::contract::{
    Action, LineItemTransition, MarketplaceError, NewTicketBody, NewTicketLineItem, TicketBody,
    TicketLineItem, TicketTransition, TicketingApi,
};
use crate::domain::{AccessService, LineItemService, Services, TicketService};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client that calls the ticket workflow services directly
///
/// Used by other modules running in the same process; no HTTP round trip.
#[derive(Clone)]
pub struct NativeClient {
    access: Arc<AccessService>,
    tickets: Arc<TicketService>,
    line_items: Arc<LineItemService>,
}

impl NativeClient {
    pub fn new(services: &Services) -> Self {
        Self {
            access: services.access.clone(),
            tickets: services.tickets.clone(),
            line_items: services.line_items.clone(),
        }
    }
}

#[async_trait]
impl TicketingApi for NativeClient {
    async fn has_permission(
        &self,
        user_id: Uuid,
        action: Action,
    ) -> Result<bool, MarketplaceError> {
        self.access.has_permission(user_id, action).await
    }

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<TicketBody, MarketplaceError> {
        self.tickets.get(ticket_id).await
    }

    async fn create_ticket(
        &self,
        buyer_organisation_id: Uuid,
        ticket: NewTicketBody,
        acting_user: Uuid,
    ) -> Result<TicketBody, MarketplaceError> {
        self.tickets
            .create(buyer_organisation_id, ticket, acting_user)
            .await
    }

    async fn set_ticket_owner(
        &self,
        ticket_id: Uuid,
        owner_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.tickets.set_owner(ticket_id, owner_id, acting_user).await
    }

    async fn start_ticket_sourcing(
        &self,
        ticket_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.tickets.start_sourcing(ticket_id, acting_user).await
    }

    async fn complete_ticket(
        &self,
        ticket_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.tickets.complete(ticket_id, acting_user).await
    }

    async fn void_ticket(
        &self,
        ticket_id: Uuid,
        remark: String,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError> {
        self.tickets.void(ticket_id, remark, acting_user).await
    }

    async fn create_line_item(
        &self,
        ticket_id: Uuid,
        line_item: NewTicketLineItem,
        acting_user: Uuid,
    ) -> Result<TicketLineItem, MarketplaceError> {
        self.line_items
            .create(ticket_id, line_item, acting_user)
            .await
    }

    async fn set_line_item_owner(
        &self,
        line_item_id: Uuid,
        owner_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.line_items
            .set_owner(line_item_id, owner_id, acting_user)
            .await
    }

    async fn start_line_item_sourcing(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.line_items
            .start_sourcing(line_item_id, acting_user)
            .await
    }

    async fn mark_line_item_sourced(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.line_items.mark_sourced(line_item_id, acting_user).await
    }

    async fn mark_line_item_unable_to_source(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError> {
        self.line_items
            .mark_unable_to_source(line_item_id, acting_user)
            .await
    }
}
