//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories/

use crate::contract::{
    BuyerOrganisation, CategorySnapshot, Comment, CommentTarget, EventLog, EventType, LinkKind,
    MainCategory, MarketplaceError, Page, PageRequest, Permission, RefreshSummary,
    SellerBranchLocation, SellerContact, SellerItem, SellerItemSearchField, SellerOrganisation,
    SellerPaymentTerm, SubCategory, TicketBody, TicketLabel, TicketLineItem, UomReference, User,
    UserRole,
};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a repository
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique index or primary key rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// A foreign key points at a record that does not exist
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    /// Sort or filter referenced a column the table does not have
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for MarketplaceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation(detail) => MarketplaceError::Conflict { reason: detail },
            StorageError::ForeignKeyViolation(detail) => MarketplaceError::NotFound {
                resource: "referenced record".to_string(),
                id: detail,
            },
            StorageError::UnknownColumn(column) => MarketplaceError::Validation {
                message: format!("unknown column key '{}'", column),
            },
            StorageError::Other(e) => {
                tracing::error!(error = ?e, "storage failure");
                MarketplaceError::Internal
            }
        }
    }
}

/// Users, roles, permissions and their memberships
#[async_trait]
pub trait AccessRepository: Send + Sync {
    async fn insert_user(&self, user: &User) -> StorageResult<User>;

    async fn find_user(&self, id: Uuid) -> StorageResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    async fn delete_users(&self, ids: &[Uuid]) -> StorageResult<u64>;

    async fn insert_role(&self, role: &UserRole) -> StorageResult<UserRole>;

    async fn find_role(&self, id: Uuid) -> StorageResult<Option<UserRole>>;

    /// Insert any permission value not yet stored; returns the full catalog
    async fn ensure_permissions(&self, values: &[&str]) -> StorageResult<Vec<Permission>>;

    async fn find_permission_by_value(&self, value: &str) -> StorageResult<Option<Permission>>;

    /// Replace the permission set of a role
    async fn replace_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<()>;

    /// Replace the role set of a user
    async fn replace_user_roles(
        &self,
        user_id: Uuid,
        role_ids: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<()>;

    /// Permission values granted through any of the user's roles
    async fn permission_values_for_user(&self, user_id: Uuid) -> StorageResult<Vec<String>>;
}

/// Buyer organisations
#[async_trait]
pub trait BuyerOrganisationRepository: Send + Sync {
    async fn insert(&self, organisation: &BuyerOrganisation) -> StorageResult<BuyerOrganisation>;

    async fn find(&self, id: Uuid) -> StorageResult<Option<BuyerOrganisation>>;

    async fn list_all(&self) -> StorageResult<Vec<BuyerOrganisation>>;

    async fn delete_many(&self, ids: &[Uuid]) -> StorageResult<u64>;
}

/// Seller organisations and the records they own
#[async_trait]
pub trait SellerOrganisationRepository: Send + Sync {
    // ===== Organisations =====

    /// Insert an organisation together with its initial contacts and branches
    async fn insert_organisation(
        &self,
        organisation: &SellerOrganisation,
        contacts: &[SellerContact],
        branch_locations: &[SellerBranchLocation],
    ) -> StorageResult<SellerOrganisation>;

    async fn find_organisation(&self, id: Uuid) -> StorageResult<Option<SellerOrganisation>>;

    async fn list_organisations(&self) -> StorageResult<Vec<SellerOrganisation>>;

    /// Case-insensitive substring search over name, email and phone
    async fn filter_organisations(&self, search: &str) -> StorageResult<Vec<SellerOrganisation>>;

    async fn paginate_organisations(
        &self,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerOrganisation>>;

    async fn update_organisation(
        &self,
        organisation: &SellerOrganisation,
    ) -> StorageResult<SellerOrganisation>;

    async fn delete_organisations(&self, ids: &[Uuid]) -> StorageResult<u64>;

    async fn find_organisation_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<SellerOrganisation>>;

    async fn find_organisation_by_phone(
        &self,
        phone: &str,
    ) -> StorageResult<Option<SellerOrganisation>>;

    /// Case-insensitive exact match on company name
    async fn find_organisation_by_name(
        &self,
        name: &str,
    ) -> StorageResult<Option<SellerOrganisation>>;

    // ===== Contacts =====

    async fn insert_contact(&self, contact: &SellerContact) -> StorageResult<SellerContact>;

    async fn find_contact(&self, id: Uuid) -> StorageResult<Option<SellerContact>>;

    async fn update_contact(&self, contact: &SellerContact) -> StorageResult<SellerContact>;

    /// Search over name, email, phone, department and role
    async fn filter_contacts(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> StorageResult<Vec<SellerContact>>;

    async fn paginate_contacts(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerContact>>;

    async fn find_contact_by_email(&self, email: &str) -> StorageResult<Option<SellerContact>>;

    async fn find_contact_by_phone(&self, phone: &str) -> StorageResult<Option<SellerContact>>;

    // ===== Branch locations =====

    async fn insert_branch(
        &self,
        branch: &SellerBranchLocation,
    ) -> StorageResult<SellerBranchLocation>;

    async fn find_branch(&self, id: Uuid) -> StorageResult<Option<SellerBranchLocation>>;

    async fn update_branch(
        &self,
        branch: &SellerBranchLocation,
    ) -> StorageResult<SellerBranchLocation>;

    /// Search over branch name and address
    async fn filter_branches(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> StorageResult<Vec<SellerBranchLocation>>;

    async fn paginate_branches(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerBranchLocation>>;

    // ===== Payment terms =====

    async fn insert_payment_term(
        &self,
        term: &SellerPaymentTerm,
    ) -> StorageResult<SellerPaymentTerm>;

    async fn find_payment_term_by_organisation(
        &self,
        organisation_id: Uuid,
    ) -> StorageResult<Option<SellerPaymentTerm>>;

    async fn update_payment_term(
        &self,
        term: &SellerPaymentTerm,
    ) -> StorageResult<SellerPaymentTerm>;
}

/// Seller item catalog listings
#[async_trait]
pub trait SellerItemRepository: Send + Sync {
    /// Insert an item and link it to the given sub-categories
    async fn insert(
        &self,
        item: &SellerItem,
        sub_category_ids: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<SellerItem>;

    async fn find(&self, id: Uuid) -> StorageResult<Option<SellerItem>>;

    async fn find_many(&self, ids: &[Uuid]) -> StorageResult<Vec<SellerItem>>;

    async fn update(&self, item: &SellerItem) -> StorageResult<SellerItem>;

    async fn delete_many(&self, ids: &[Uuid]) -> StorageResult<u64>;

    async fn filter(
        &self,
        field: SellerItemSearchField,
        search: &str,
    ) -> StorageResult<Vec<SellerItem>>;

    async fn paginate(&self, request: &PageRequest) -> StorageResult<Page<SellerItem>>;
}

/// Category taxonomy and its refresh log
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Upsert main and sub categories by external id
    async fn apply_snapshot(&self, snapshot: &[CategorySnapshot]) -> StorageResult<RefreshSummary>;

    async fn list_main(&self) -> StorageResult<Vec<MainCategory>>;

    async fn find_sub(&self, id: Uuid) -> StorageResult<Option<SubCategory>>;

    async fn find_subs(&self, ids: &[Uuid]) -> StorageResult<Vec<SubCategory>>;

    /// Case-insensitive substring search over sub-category titles
    async fn filter_subs(&self, search: &str) -> StorageResult<Vec<SubCategory>>;

    async fn paginate_subs(&self, request: &PageRequest) -> StorageResult<Page<SubCategory>>;

    async fn delete_all(&self) -> StorageResult<u64>;

    async fn append_event(&self, event: &EventLog) -> StorageResult<EventLog>;

    /// Most recent event of the given type for an entity
    async fn last_event(&self, event_type: EventType, entity: &str)
        -> StorageResult<Option<EventLog>>;
}

/// Unit of measurement reference list
#[async_trait]
pub trait UomRepository: Send + Sync {
    /// Insert every row or none of them
    async fn insert_many(&self, uoms: &[UomReference]) -> StorageResult<Vec<UomReference>>;

    /// Every unit, ordered by code
    async fn list(&self) -> StorageResult<Vec<UomReference>>;
}

/// Tickets, line items and labels
#[async_trait]
pub trait TicketRepository: Send + Sync {
    // ===== Ticket bodies =====

    async fn insert_ticket(&self, ticket: &TicketBody) -> StorageResult<TicketBody>;

    async fn find_ticket(&self, id: Uuid) -> StorageResult<Option<TicketBody>>;

    async fn find_tickets(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketBody>>;

    async fn list_tickets(
        &self,
        buyer_organisation_id: Option<Uuid>,
    ) -> StorageResult<Vec<TicketBody>>;

    async fn update_ticket(&self, ticket: &TicketBody) -> StorageResult<TicketBody>;

    async fn delete_tickets(&self, ids: &[Uuid]) -> StorageResult<u64>;

    // ===== Line items =====

    /// Insert a line item and link it to its ticket in one unit
    async fn insert_line_item(
        &self,
        line_item: &TicketLineItem,
        ticket_id: Uuid,
        linked_by: Uuid,
    ) -> StorageResult<TicketLineItem>;

    async fn find_line_item(&self, id: Uuid) -> StorageResult<Option<TicketLineItem>>;

    async fn find_line_items(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketLineItem>>;

    async fn update_line_item(&self, line_item: &TicketLineItem)
        -> StorageResult<TicketLineItem>;

    async fn delete_line_items(&self, ids: &[Uuid]) -> StorageResult<u64>;

    // ===== Labels =====

    async fn insert_label(&self, label: &TicketLabel) -> StorageResult<TicketLabel>;

    async fn find_label(&self, id: Uuid) -> StorageResult<Option<TicketLabel>>;

    async fn find_labels(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketLabel>>;

    async fn update_label(&self, label: &TicketLabel) -> StorageResult<TicketLabel>;

    async fn list_labels(&self) -> StorageResult<Vec<TicketLabel>>;
}

/// Comments on tickets, line items and seller organisations
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> StorageResult<Comment>;

    async fn find(&self, id: Uuid) -> StorageResult<Option<Comment>>;

    async fn update(&self, comment: &Comment) -> StorageResult<Comment>;

    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    async fn list_for_target(&self, target: CommentTarget) -> StorageResult<Vec<Comment>>;
}

/// Join rows of the many-to-many relations
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert a join row; a duplicate pair is a unique violation
    async fn link(&self, kind: LinkKind, a: Uuid, b: Uuid, linked_by: Uuid) -> StorageResult<()>;

    /// Delete a join row; returns whether a row existed
    async fn unlink(&self, kind: LinkKind, a: Uuid, b: Uuid) -> StorageResult<bool>;

    /// B-side ids linked to `a`
    async fn list_b(&self, kind: LinkKind, a: Uuid) -> StorageResult<Vec<Uuid>>;

    /// A-side ids linked to `b`
    async fn list_a(&self, kind: LinkKind, b: Uuid) -> StorageResult<Vec<Uuid>>;

    /// Replace every link of `a` with links to `bs`
    async fn replace(
        &self,
        kind: LinkKind,
        a: Uuid,
        bs: &[Uuid],
        linked_by: Uuid,
    ) -> StorageResult<()>;
}

/// External taxonomy service the category tree is refreshed from
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Full snapshot of main categories with their sub-categories
    async fn fetch(&self) -> anyhow::Result<Vec<CategorySnapshot>>;
}
