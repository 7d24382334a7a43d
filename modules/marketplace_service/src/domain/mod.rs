//! Domain layer - business logic and services

pub mod events;
pub mod permission;
pub mod repository;
pub mod service;
pub mod validation;
pub mod workflow;

pub use events::{EventPublisher, NoOpEventPublisher, TracingEventPublisher, WorkflowEvent};
pub use permission::{CapabilitySet, PermissionResolver};
pub use repository::{
    AccessRepository, BuyerOrganisationRepository, CategoryRepository, CategorySource,
    CommentRepository, LinkRepository, SellerItemRepository, SellerOrganisationRepository,
    StorageError, StorageResult, TicketRepository, UomRepository,
};
pub use service::{
    AccessService, BuyerOrganisationService, CategoryService, CommentService, LabelService,
    LineItemService, LinkService, PagingPolicy, SellerItemService, SellerOrganisationService,
    TicketService, UomService,
};

use std::sync::Arc;

/// Repository implementations the services are built from
#[derive(Clone)]
pub struct Repositories {
    pub access: Arc<dyn AccessRepository>,
    pub buyers: Arc<dyn BuyerOrganisationRepository>,
    pub sellers: Arc<dyn SellerOrganisationRepository>,
    pub items: Arc<dyn SellerItemRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub links: Arc<dyn LinkRepository>,
    pub uoms: Arc<dyn UomRepository>,
}

/// Every domain service, wired over one set of repositories
#[derive(Clone)]
pub struct Services {
    pub permissions: Arc<PermissionResolver>,
    pub access: Arc<AccessService>,
    pub buyers: Arc<BuyerOrganisationService>,
    pub sellers: Arc<SellerOrganisationService>,
    pub items: Arc<SellerItemService>,
    pub categories: Arc<CategoryService>,
    pub tickets: Arc<TicketService>,
    pub line_items: Arc<LineItemService>,
    pub labels: Arc<LabelService>,
    pub comments: Arc<CommentService>,
    pub links: Arc<LinkService>,
    pub uoms: Arc<UomService>,
}

impl Services {
    pub fn new(
        repos: Repositories,
        category_source: Arc<dyn CategorySource>,
        event_publisher: Arc<dyn EventPublisher>,
        paging: PagingPolicy,
    ) -> Self {
        let permissions = Arc::new(PermissionResolver::new(repos.access.clone()));

        Self {
            access: Arc::new(AccessService::new(repos.access.clone(), permissions.clone())),
            buyers: Arc::new(BuyerOrganisationService::new(repos.buyers.clone())),
            sellers: Arc::new(SellerOrganisationService::new(repos.sellers.clone(), paging)),
            items: Arc::new(SellerItemService::new(
                repos.items.clone(),
                repos.sellers.clone(),
                repos.categories.clone(),
                paging,
            )),
            categories: Arc::new(CategoryService::new(
                repos.categories.clone(),
                category_source,
                paging,
            )),
            tickets: Arc::new(TicketService::new(
                repos.tickets.clone(),
                repos.buyers.clone(),
                repos.access.clone(),
                repos.links.clone(),
                permissions.clone(),
                event_publisher.clone(),
            )),
            line_items: Arc::new(LineItemService::new(
                repos.tickets.clone(),
                repos.access.clone(),
                repos.links.clone(),
                permissions.clone(),
                event_publisher,
            )),
            labels: Arc::new(LabelService::new(repos.tickets.clone())),
            uoms: Arc::new(UomService::new(repos.uoms)),
            comments: Arc::new(CommentService::new(
                repos.comments.clone(),
                repos.tickets.clone(),
                repos.sellers.clone(),
            )),
            links: Arc::new(LinkService::new(
                repos.links,
                repos.tickets,
                repos.items,
                repos.categories,
            )),
            permissions,
        }
    }
}
