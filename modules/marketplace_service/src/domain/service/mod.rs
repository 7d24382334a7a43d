//! Domain services - business logic orchestration

pub mod access;
pub mod buyers;
pub mod catalog;
pub mod categories;
pub mod comments;
pub mod labels;
pub mod line_items;
pub mod links;
pub mod sellers;
pub mod tickets;
pub mod uoms;

pub use access::AccessService;
pub use buyers::BuyerOrganisationService;
pub use catalog::SellerItemService;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use labels::LabelService;
pub use line_items::LineItemService;
pub use links::LinkService;
pub use sellers::SellerOrganisationService;
pub use tickets::TicketService;
pub use uoms::UomService;

use super::events::{EventPublisher, WorkflowEvent};
use super::repository::AccessRepository;
use crate::contract::{MarketplaceError, PageRequest};
use uuid::Uuid;

/// Page size bounds applied to every paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub max_page_size: u64,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

impl PagingPolicy {
    pub(crate) fn check(&self, request: &PageRequest) -> Result<(), MarketplaceError> {
        super::validation::validate_page_request(request, self.max_page_size)
    }
}

/// Ensure a user exists before it is referenced as an owner
pub(crate) async fn ensure_user(
    access_repo: &dyn AccessRepository,
    user_id: Uuid,
) -> Result<(), MarketplaceError> {
    access_repo
        .find_user(user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| MarketplaceError::not_found("user", user_id))
}

/// Publish a workflow event; failures are logged, never propagated
pub(crate) async fn publish(publisher: &dyn EventPublisher, event: WorkflowEvent) {
    let name = event.name();
    if let Err(e) = publisher.publish(event).await {
        tracing::warn!(event = name, error = %e, "failed to publish workflow event");
    }
}
