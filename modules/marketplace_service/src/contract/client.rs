//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to drive the ticket
//! workflow in-process. NO HTTP - direct function calls.

use super::{
    action::Action,
    error::MarketplaceError,
    model::{
        LineItemTransition, NewTicketBody, NewTicketLineItem, TicketBody, TicketLineItem,
        TicketTransition,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Ticketing API for inter-module communication
#[async_trait]
pub trait TicketingApi: Send + Sync {
    // ===== Permissions =====

    /// Whether any role of the user grants `action`
    async fn has_permission(&self, user_id: Uuid, action: Action)
        -> Result<bool, MarketplaceError>;

    // ===== Ticket Operations =====

    /// Get a ticket by id
    async fn get_ticket(&self, ticket_id: Uuid) -> Result<TicketBody, MarketplaceError>;

    /// Create a ticket for a buyer organisation
    async fn create_ticket(
        &self,
        buyer_organisation_id: Uuid,
        ticket: NewTicketBody,
        acting_user: Uuid,
    ) -> Result<TicketBody, MarketplaceError>;

    /// Assign the ticket owner
    async fn set_ticket_owner(
        &self,
        ticket_id: Uuid,
        owner_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError>;

    /// Move a claimed ticket into sourcing
    async fn start_ticket_sourcing(
        &self,
        ticket_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError>;

    /// Complete a ticket whose line items are all settled
    async fn complete_ticket(
        &self,
        ticket_id: Uuid,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError>;

    /// Void a ticket with a remark
    async fn void_ticket(
        &self,
        ticket_id: Uuid,
        remark: String,
        acting_user: Uuid,
    ) -> Result<TicketTransition, MarketplaceError>;

    // ===== Line Item Operations =====

    /// Create a line item inside a ticket
    async fn create_line_item(
        &self,
        ticket_id: Uuid,
        line_item: NewTicketLineItem,
        acting_user: Uuid,
    ) -> Result<TicketLineItem, MarketplaceError>;

    /// Assign the line item owner
    async fn set_line_item_owner(
        &self,
        line_item_id: Uuid,
        owner_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError>;

    /// Move a claimed line item into sourcing
    async fn start_line_item_sourcing(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError>;

    /// Mark a line item as sourced
    async fn mark_line_item_sourced(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError>;

    /// Mark a line item as unable to source
    async fn mark_line_item_unable_to_source(
        &self,
        line_item_id: Uuid,
        acting_user: Uuid,
    ) -> Result<LineItemTransition, MarketplaceError>;
}
