//! Domain events for the ticket workflow
//!
//! Every create and every transition of a ticket or line item produces one
//! event. Publishing failures are logged by the caller and never fail the
//! operation that produced them.

use crate::contract::{FieldChange, LineItemTransition, TicketBody, TicketLineItem, TicketTransition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    TicketCreated(RecordCreatedEvent),
    TicketTransitioned(RecordTransitionedEvent),
    LineItemCreated(RecordCreatedEvent),
    LineItemTransitioned(RecordTransitionedEvent),
}

/// A ticket or line item was inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCreatedEvent {
    pub id: Uuid,
    /// Ticket the record belongs to (the ticket itself for tickets)
    pub ticket_id: Uuid,
    pub status: String,
    pub owner_id: Option<Uuid>,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// A workflow operation changed a ticket or line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransitionedEvent {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    /// Field groups that changed
    pub changes: Vec<String>,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

fn change_names(changes: &[FieldChange]) -> Vec<String> {
    changes.iter().map(|c| c.as_str().to_string()).collect()
}

impl WorkflowEvent {
    pub fn ticket_created(ticket: &TicketBody, user_id: Uuid) -> Self {
        WorkflowEvent::TicketCreated(RecordCreatedEvent {
            id: ticket.id,
            ticket_id: ticket.id,
            status: ticket.status.to_string(),
            owner_id: ticket.owner_id,
            user_id,
            timestamp: Utc::now(),
        })
    }

    pub fn ticket_transitioned(transition: &TicketTransition, user_id: Uuid) -> Self {
        WorkflowEvent::TicketTransitioned(RecordTransitionedEvent {
            id: transition.value.id,
            from: transition.from.to_string(),
            to: transition.to.to_string(),
            changes: change_names(&transition.changes),
            user_id,
            timestamp: Utc::now(),
        })
    }

    pub fn line_item_created(line_item: &TicketLineItem, ticket_id: Uuid, user_id: Uuid) -> Self {
        WorkflowEvent::LineItemCreated(RecordCreatedEvent {
            id: line_item.id,
            ticket_id,
            status: line_item.status.to_string(),
            owner_id: line_item.owner_id,
            user_id,
            timestamp: Utc::now(),
        })
    }

    pub fn line_item_transitioned(transition: &LineItemTransition, user_id: Uuid) -> Self {
        WorkflowEvent::LineItemTransitioned(RecordTransitionedEvent {
            id: transition.value.id,
            from: transition.from.to_string(),
            to: transition.to.to_string(),
            changes: change_names(&transition.changes),
            user_id,
            timestamp: Utc::now(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::TicketCreated(_) => "ticket_created",
            WorkflowEvent::TicketTransitioned(_) => "ticket_transitioned",
            WorkflowEvent::LineItemCreated(_) => "line_item_created",
            WorkflowEvent::LineItemTransitioned(_) => "line_item_transitioned",
        }
    }
}

/// Event publisher trait for publishing workflow events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: WorkflowEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: WorkflowEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Emits every event as a structured `tracing` record
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: WorkflowEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "marketplace::events", event = event.name(), %payload);
        Ok(())
    }
}
