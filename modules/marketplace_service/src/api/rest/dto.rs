//! REST DTOs with serde derives for HTTP API
//!
//! Field names follow the camelCase JSON convention of the public API.
//! Request bodies reject unknown fields; `resourceItemId` is accepted and
//! ignored wherever clients historically echo the record id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Shared =====

/// Paginated listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub data: Vec<T>,
    pub total_record_count: u64,
}

/// `?search=` of the filter and uniqueness check endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// `?columnkey&sortby&page&pagesize` of the paginate endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginateQuery {
    pub columnkey: Option<String>,
    pub sortby: Option<String>,
    pub page: Option<u64>,
    pub pagesize: Option<u64>,
}

/// Status change of the record `id`; the new status is in the path
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatusChangeRequest {
    pub id: Uuid,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteManyRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeletedDto {
    pub deleted: u64,
}

// ===== Access =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleDto {
    pub id: Uuid,
    pub name: String,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRoleRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionDto {
    pub id: Uuid,
    #[schema(example = "ticket:complete")]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetRolePermissionsRequest {
    pub permission_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetUserRolesRequest {
    pub role_ids: Vec<Uuid>,
}

// ===== Buyer organisations =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyerOrganisationDto {
    pub id: Uuid,
    pub company_name: String,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub remarks: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuyerOrganisationRequest {
    pub company_name: String,
    #[serde(default)]
    pub company_email: Option<String>,
    #[serde(default)]
    pub company_phone: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

// ===== Seller organisations =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerOrganisationDto {
    pub id: Uuid,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: Option<String>,
    pub website: Option<String>,
    pub remarks: Option<String>,
    #[schema(example = "ACTIVE")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSellerOrganisationRequest {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub seller_contacts: Vec<SellerContactRequest>,
    #[serde(default)]
    pub seller_branch_locations: Vec<SellerBranchLocationRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerBasicInformationRequest {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerDetailsInformationRequest {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerContactDto {
    pub id: Uuid,
    pub seller_organisation_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerBranchLocationDto {
    pub id: Uuid,
    pub seller_organisation_id: Uuid,
    pub branch_name: String,
    pub branch_address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerBranchLocationRequest {
    pub branch_name: String,
    pub branch_address: String,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerPaymentTermDto {
    pub id: Uuid,
    pub seller_organisation_id: Uuid,
    pub payment_method: String,
    pub bank_name: Option<String>,
    pub bank_account_holder: Option<String>,
    pub bank_account_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerPaymentTermRequest {
    pub payment_method: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_account_holder: Option<String>,
    #[serde(default)]
    pub bank_account_number: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

// ===== Catalog =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerItemDto {
    pub id: Uuid,
    pub seller_organisation_id: Option<Uuid>,
    pub product_title: String,
    pub brand_model: Option<String>,
    pub model_number: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSellerItemRequest {
    #[serde(default)]
    pub seller_organisation_id: Option<Uuid>,
    pub product_title: String,
    #[serde(default)]
    pub brand_model: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sub_category_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSellerItemRequest {
    #[serde(default)]
    pub seller_organisation_id: Option<Uuid>,
    pub product_title: String,
    #[serde(default)]
    pub brand_model: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubCategoryLinkRequest {
    pub sub_category_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubCategoryIdsRequest {
    pub sub_category_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MainCategoryDto {
    pub id: Uuid,
    pub external_id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDto {
    pub id: Uuid,
    pub external_id: String,
    pub main_category_id: Uuid,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummaryDto {
    pub main_categories: usize,
    pub sub_categories: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventLogDto {
    pub id: Uuid,
    #[schema(example = "FETCH")]
    pub event_type: String,
    pub entity: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ===== Tickets =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketBodyDto {
    pub id: Uuid,
    pub buyer_organisation_id: Uuid,
    pub title: String,
    #[schema(example = "NORMAL")]
    pub priority: String,
    pub deadline: Option<DateTime<Utc>>,
    #[schema(example = "OPEN")]
    pub status: String,
    pub ticket_owner_id: Option<Uuid>,
    pub void_remark: Option<String>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `?buyerOrganisationId=` scoping tickets to one buyer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerOrganisationQuery {
    pub buyer_organisation_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTicketRequest {
    pub title: String,
    #[serde(default)]
    #[schema(example = "NORMAL")]
    pub priority: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ticket_owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TicketGeneralDetailsRequest {
    pub title: String,
    pub priority: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub void_remark: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TicketOwnerRequest {
    pub ticket_owner_id: Uuid,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TicketUpdateRequest {
    #[serde(default)]
    pub ticket_owner_id: Option<Uuid>,
    pub title: String,
    pub priority: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub void_remark: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VoidTicketRequest {
    pub id: Uuid,
    pub void_remark: String,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketLineItemDto {
    pub id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub budget_cents: Option<i64>,
    pub deadline: Option<DateTime<Utc>>,
    pub sourcing_remarks: Option<String>,
    #[schema(example = "OPEN")]
    pub sourcing_status: String,
    pub line_item_owner_id: Option<Uuid>,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLineItemRequest {
    pub item_name: String,
    pub quantity: i32,
    #[serde(default)]
    pub budget_cents: Option<i64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sourcing_remarks: Option<String>,
    #[serde(default)]
    pub line_item_owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemGeneralDetailsRequest {
    pub item_name: String,
    pub quantity: i32,
    #[serde(default)]
    pub budget_cents: Option<i64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sourcing_remarks: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemOwnerRequest {
    pub line_item_owner_id: Uuid,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemUpdateRequest {
    #[serde(default)]
    pub line_item_owner_id: Option<Uuid>,
    pub item_name: String,
    pub quantity: i32,
    #[serde(default)]
    pub budget_cents: Option<i64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sourcing_remarks: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketLabelDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TicketLabelRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

// ===== Units of measurement =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UomReferenceDto {
    pub id: Uuid,
    #[schema(example = "PC")]
    pub uom_code: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One element of the bulk create body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUomRequest {
    pub uom_code: String,
    pub description: String,
}

// ===== Comments =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Uuid,
    #[schema(example = "ticket_body")]
    pub target_type: String,
    pub target_id: Uuid,
    pub message: String,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommentRequest {
    pub message: String,
    #[serde(default)]
    pub resource_item_id: Option<Uuid>,
}

// ===== Links =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemInTicketBodyRequest {
    pub ticket_body_id: Uuid,
    pub line_item_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellerItemInLineItemRequest {
    pub ticket_line_item_id: Uuid,
    pub seller_item_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TicketBodyInLabelRequest {
    pub ticket_body_id: Uuid,
    pub ticket_label_id: Uuid,
}

/// Result of an unlink call; `removed` is false when no such link existed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnlinkDto {
    pub removed: bool,
}
