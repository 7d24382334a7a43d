//! Contract models for the marketplace service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

// ===== Enumerations =====

/// Lifecycle status shared by seller-side records.
///
/// Values are freely settable in any direction; nothing enforces a one-way
/// progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStatus {
    Active,
    Inactive,
    Deleted,
}

/// Procurement ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    Claimed,
    Sourcing,
    Completed,
    Void,
}

/// Sourcing status of a ticket line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItemStatus {
    Open,
    Claimed,
    Sourcing,
    Sourced,
    UnableToSource,
}

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

/// Kind of an event log row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Category taxonomy pulled from the external admin service
    Fetch,
}

macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Stable upper-case wire name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }

            /// Parse a wire name (case-insensitive)
            pub fn parse(value: &str) -> Option<Self> {
                $(
                    if value.eq_ignore_ascii_case($name) {
                        return Some($ty::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_names!(LifecycleStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    Deleted => "DELETED",
});

wire_names!(TicketStatus {
    Open => "OPEN",
    Claimed => "CLAIMED",
    Sourcing => "SOURCING",
    Completed => "COMPLETED",
    Void => "VOID",
});

wire_names!(LineItemStatus {
    Open => "OPEN",
    Claimed => "CLAIMED",
    Sourcing => "SOURCING",
    Sourced => "SOURCED",
    UnableToSource => "UNABLE_TO_SOURCE",
});

wire_names!(Priority {
    Low => "LOW",
    Normal => "NORMAL",
    High => "HIGH",
    Urgent => "URGENT",
});

wire_names!(EventType {
    Fetch => "FETCH",
});

// ===== Access =====

/// Platform user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique across all users
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Named role bundling a set of permissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRole {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Permission row; `value` is an action identifier such as `ticket:complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub id: Uuid,
    pub value: String,
}

// ===== Organisations =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerOrganisation {
    pub id: Uuid,
    pub company_name: String,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub remarks: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a buyer organisation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuyerOrganisationFields {
    pub company_name: String,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerOrganisation {
    pub id: Uuid,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: Option<String>,
    pub website: Option<String>,
    pub remarks: Option<String>,
    pub status: LifecycleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// "Company basic information" editable surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerOrganisationBasicInformation {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: Option<String>,
}

/// "Company details information" editable surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerOrganisationDetailsInformation {
    pub website: Option<String>,
    pub remarks: Option<String>,
}

/// Creation payload, optionally carrying nested contacts and branches
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSellerOrganisation {
    pub basic: SellerOrganisationBasicInformation,
    pub details: SellerOrganisationDetailsInformation,
    pub contacts: Vec<SellerContactFields>,
    pub branch_locations: Vec<SellerBranchLocationFields>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerContact {
    pub id: Uuid,
    pub seller_organisation_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: LifecycleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerBranchLocation {
    pub id: Uuid,
    pub seller_organisation_id: Uuid,
    pub branch_name: String,
    pub branch_address: String,
    pub status: LifecycleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerBranchLocationFields {
    pub branch_name: String,
    pub branch_address: String,
}

/// Payment terms, at most one per seller organisation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerPaymentTerm {
    pub id: Uuid,
    pub seller_organisation_id: Uuid,
    pub payment_method: String,
    pub bank_name: Option<String>,
    pub bank_account_holder: Option<String>,
    /// Unique when present
    pub bank_account_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerPaymentTermFields {
    pub payment_method: String,
    pub bank_name: Option<String>,
    pub bank_account_holder: Option<String>,
    pub bank_account_number: Option<String>,
}

// ===== Catalog =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerItem {
    pub id: Uuid,
    pub seller_organisation_id: Option<Uuid>,
    pub product_title: String,
    pub brand_model: Option<String>,
    pub model_number: Option<String>,
    pub description: Option<String>,
    pub status: LifecycleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SellerItemFields {
    pub seller_organisation_id: Option<Uuid>,
    pub product_title: String,
    pub brand_model: Option<String>,
    pub model_number: Option<String>,
    pub description: Option<String>,
}

/// Which column(s) a seller item search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerItemSearchField {
    /// Product title, brand model or model number
    Any,
    BrandModel,
    ModelNumber,
    ProductTitle,
    /// Title of any linked sub-category
    CategoryTitle,
    /// Company name of the owning seller organisation
    SellerOrganisation,
}

impl SellerItemSearchField {
    /// Parse the path segment used by the filter endpoints
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "brand-model" => Some(Self::BrandModel),
            "model-number" => Some(Self::ModelNumber),
            "product-title" => Some(Self::ProductTitle),
            "category-title" => Some(Self::CategoryTitle),
            "seller-organisation" => Some(Self::SellerOrganisation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainCategory {
    pub id: Uuid,
    /// Identifier assigned by the external taxonomy service
    pub external_id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategory {
    pub id: Uuid,
    pub external_id: String,
    pub main_category_id: Uuid,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// One main category as reported by the taxonomy service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySnapshot {
    pub external_id: String,
    pub title: String,
    pub sub_categories: Vec<SubCategorySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategorySnapshot {
    pub external_id: String,
    pub title: String,
}

/// Counts produced by a category refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshSummary {
    pub main_categories: usize,
    pub sub_categories: usize,
}

/// Append-only event log row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    pub id: Uuid,
    pub event_type: EventType,
    /// Subject of the event, e.g. `categories`
    pub entity: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ===== Tickets =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketBody {
    pub id: Uuid,
    pub buyer_organisation_id: Uuid,
    pub title: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub status: TicketStatus,
    pub owner_id: Option<Uuid>,
    pub void_remark: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicketBody {
    pub title: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub owner_id: Option<Uuid>,
}

/// General-details editable surface of a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketGeneralDetails {
    pub title: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub void_remark: Option<String>,
}

/// Merged owner + general-details surface of a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketUpdate {
    pub owner_id: Option<Uuid>,
    pub details: TicketGeneralDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLineItem {
    pub id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    /// Budget in minor currency units
    pub budget_cents: Option<i64>,
    pub deadline: Option<DateTime<Utc>>,
    pub sourcing_remarks: Option<String>,
    pub status: LineItemStatus,
    pub owner_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicketLineItem {
    pub details: LineItemGeneralDetails,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemGeneralDetails {
    pub item_name: String,
    pub quantity: i32,
    pub budget_cents: Option<i64>,
    pub deadline: Option<DateTime<Utc>>,
    pub sourcing_remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemUpdate {
    pub owner_id: Option<Uuid>,
    pub details: LineItemGeneralDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLabel {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketLabelFields {
    pub title: String,
    pub description: Option<String>,
}

// ===== Units of measurement =====

/// Reference unit a line item quantity can be expressed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UomReference {
    pub id: Uuid,
    /// Short code such as `PC` or `BOX`, unique
    pub uom_code: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUomReference {
    pub uom_code: String,
    pub description: String,
}

// ===== Comments =====

/// Record a comment hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTarget {
    TicketBody(Uuid),
    LineItem(Uuid),
    SellerOrganisation(Uuid),
}

impl CommentTarget {
    pub fn id(&self) -> Uuid {
        match self {
            Self::TicketBody(id) | Self::LineItem(id) | Self::SellerOrganisation(id) => *id,
        }
    }

    pub fn resource(&self) -> &'static str {
        match self {
            Self::TicketBody(_) => "ticket_body",
            Self::LineItem(_) => "ticket_line_item",
            Self::SellerOrganisation(_) => "seller_organisation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub target: CommentTarget,
    pub message: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Links =====

/// Many-to-many relations handled by the uniform link/unlink surface.
///
/// Each relation has an "A" side and a "B" side; `link(a, b)` always takes the
/// ids in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// A = seller item, B = sub-category
    SellerItemInSubCategory,
    /// A = ticket body, B = ticket line item
    LineItemInTicketBody,
    /// A = ticket line item, B = seller item
    SellerItemInLineItem,
    /// A = ticket body, B = ticket label
    TicketBodyInLabel,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SellerItemInSubCategory => "seller_item_in_sub_category",
            Self::LineItemInTicketBody => "line_item_in_ticket_body",
            Self::SellerItemInLineItem => "seller_item_in_line_item",
            Self::TicketBodyInLabel => "ticket_body_in_label",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Queries =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// Offset pagination request; pages are 1-indexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Column to sort by (snake_case or camelCase field name)
    pub column_key: String,
    pub sort: SortOrder,
    pub page: u64,
    pub page_size: u64,
}

/// One page of results plus the size of the whole result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_record_count: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total_record_count: self.total_record_count,
        }
    }
}

// ===== Workflow results =====

/// Field group touched by a workflow operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldChange {
    Status,
    Owner,
    GeneralDetails,
    VoidRemark,
}

impl FieldChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Owner => "owner",
            Self::GeneralDetails => "general_details",
            Self::VoidRemark => "void_remark",
        }
    }
}

/// Outcome of a workflow operation: the stored record, the status before and
/// after, and which field groups actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transitioned<T, S> {
    pub value: T,
    pub from: S,
    pub to: S,
    pub changes: Vec<FieldChange>,
}

impl<T, S: PartialEq> Transitioned<T, S> {
    pub fn status_changed(&self) -> bool {
        self.from != self.to
    }

    pub fn changed(&self, field: FieldChange) -> bool {
        self.changes.contains(&field)
    }
}

pub type TicketTransition = Transitioned<TicketBody, TicketStatus>;
pub type LineItemTransition = Transitioned<TicketLineItem, LineItemStatus>;
