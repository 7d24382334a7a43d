//! Mapper implementations for converting between DTOs and contract models
//!
//! Response DTOs are built with `From`; request DTOs that carry enum values as
//! strings convert with `TryFrom` and reject unknown values as 400 problems.

use super::dto::*;
use super::error::Problem;
use crate::contract::{
    self, BuyerOrganisationFields, LifecycleStatus, LineItemGeneralDetails, LineItemUpdate,
    NewSellerOrganisation, NewTicketBody, NewTicketLineItem, NewUomReference, PageRequest,
    Priority, SellerBranchLocationFields, SellerContactFields, SellerItemFields,
    SellerOrganisationBasicInformation, SellerOrganisationDetailsInformation,
    SellerPaymentTermFields, SortOrder, TicketGeneralDetails, TicketLabelFields, TicketUpdate,
};

// ===== Path and query parsing =====

/// Parse the lifecycle segment of a `.../status/{status}` route
pub fn lifecycle_segment(segment: &str) -> Result<LifecycleStatus, Problem> {
    match segment {
        "active" => Ok(LifecycleStatus::Active),
        "inactive" => Ok(LifecycleStatus::Inactive),
        "delete" | "deleted" => Ok(LifecycleStatus::Deleted),
        other => Err(Problem::bad_request(format!(
            "unknown status '{}', expected active, inactive or delete",
            other
        ))),
    }
}

fn priority(value: &str) -> Result<Priority, Problem> {
    Priority::parse(value).ok_or_else(|| {
        Problem::bad_request(format!(
            "unknown priority '{}', expected one of LOW, NORMAL, HIGH, URGENT",
            value
        ))
    })
}

/// Build a page request, falling back to the configured page size
pub fn page_request(query: PaginateQuery, default_page_size: u64) -> Result<PageRequest, Problem> {
    let sort = match query.sortby.as_deref() {
        None | Some("") => SortOrder::Asc,
        Some(raw) => SortOrder::parse(raw).ok_or_else(|| {
            Problem::bad_request(format!("unknown sort order '{}', expected asc or desc", raw))
        })?,
    };

    Ok(PageRequest {
        column_key: query
            .columnkey
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "id".to_string()),
        sort,
        page: query.page.unwrap_or(1),
        page_size: query.pagesize.unwrap_or(default_page_size),
    })
}

impl<T> PageDto<T> {
    pub fn from_page<M>(page: contract::Page<M>) -> Self
    where
        T: From<M>,
    {
        Self {
            data: page.data.into_iter().map(T::from).collect(),
            total_record_count: page.total_record_count,
        }
    }
}

// ===== Access =====

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<contract::UserRole> for UserRoleDto {
    fn from(role: contract::UserRole) -> Self {
        Self {
            id: role.id,
            name: role.name,
            created_by_id: role.created_by,
            created_at: role.created_at,
        }
    }
}

impl From<contract::Permission> for PermissionDto {
    fn from(permission: contract::Permission) -> Self {
        Self {
            id: permission.id,
            value: permission.value,
        }
    }
}

// ===== Organisations =====

impl From<contract::BuyerOrganisation> for BuyerOrganisationDto {
    fn from(org: contract::BuyerOrganisation) -> Self {
        Self {
            id: org.id,
            company_name: org.company_name,
            company_email: org.company_email,
            company_phone: org.company_phone,
            remarks: org.remarks,
            created_by_id: org.created_by,
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

impl From<BuyerOrganisationRequest> for BuyerOrganisationFields {
    fn from(req: BuyerOrganisationRequest) -> Self {
        Self {
            company_name: req.company_name,
            company_email: req.company_email,
            company_phone: req.company_phone,
            remarks: req.remarks,
        }
    }
}

impl From<contract::SellerOrganisation> for SellerOrganisationDto {
    fn from(org: contract::SellerOrganisation) -> Self {
        Self {
            id: org.id,
            company_name: org.company_name,
            company_email: org.company_email,
            company_phone: org.company_phone,
            company_address: org.company_address,
            website: org.website,
            remarks: org.remarks,
            status: org.status.as_str().to_string(),
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

impl From<CreateSellerOrganisationRequest> for NewSellerOrganisation {
    fn from(req: CreateSellerOrganisationRequest) -> Self {
        Self {
            basic: SellerOrganisationBasicInformation {
                company_name: req.company_name,
                company_email: req.company_email,
                company_phone: req.company_phone,
                company_address: req.company_address,
            },
            details: SellerOrganisationDetailsInformation {
                website: req.website,
                remarks: req.remarks,
            },
            contacts: req.seller_contacts.into_iter().map(Into::into).collect(),
            branch_locations: req
                .seller_branch_locations
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<SellerBasicInformationRequest> for SellerOrganisationBasicInformation {
    fn from(req: SellerBasicInformationRequest) -> Self {
        Self {
            company_name: req.company_name,
            company_email: req.company_email,
            company_phone: req.company_phone,
            company_address: req.company_address,
        }
    }
}

impl From<SellerDetailsInformationRequest> for SellerOrganisationDetailsInformation {
    fn from(req: SellerDetailsInformationRequest) -> Self {
        Self {
            website: req.website,
            remarks: req.remarks,
        }
    }
}

impl From<contract::SellerContact> for SellerContactDto {
    fn from(contact: contract::SellerContact) -> Self {
        Self {
            id: contact.id,
            seller_organisation_id: contact.seller_organisation_id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            department: contact.department,
            role: contact.role,
            status: contact.status.as_str().to_string(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl From<SellerContactRequest> for SellerContactFields {
    fn from(req: SellerContactRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            department: req.department,
            role: req.role,
        }
    }
}

impl From<contract::SellerBranchLocation> for SellerBranchLocationDto {
    fn from(branch: contract::SellerBranchLocation) -> Self {
        Self {
            id: branch.id,
            seller_organisation_id: branch.seller_organisation_id,
            branch_name: branch.branch_name,
            branch_address: branch.branch_address,
            status: branch.status.as_str().to_string(),
            created_at: branch.created_at,
            updated_at: branch.updated_at,
        }
    }
}

impl From<SellerBranchLocationRequest> for SellerBranchLocationFields {
    fn from(req: SellerBranchLocationRequest) -> Self {
        Self {
            branch_name: req.branch_name,
            branch_address: req.branch_address,
        }
    }
}

impl From<contract::SellerPaymentTerm> for SellerPaymentTermDto {
    fn from(term: contract::SellerPaymentTerm) -> Self {
        Self {
            id: term.id,
            seller_organisation_id: term.seller_organisation_id,
            payment_method: term.payment_method,
            bank_name: term.bank_name,
            bank_account_holder: term.bank_account_holder,
            bank_account_number: term.bank_account_number,
            created_at: term.created_at,
            updated_at: term.updated_at,
        }
    }
}

impl From<SellerPaymentTermRequest> for SellerPaymentTermFields {
    fn from(req: SellerPaymentTermRequest) -> Self {
        Self {
            payment_method: req.payment_method,
            bank_name: req.bank_name,
            bank_account_holder: req.bank_account_holder,
            bank_account_number: req.bank_account_number,
        }
    }
}

// ===== Catalog =====

impl From<contract::SellerItem> for SellerItemDto {
    fn from(item: contract::SellerItem) -> Self {
        Self {
            id: item.id,
            seller_organisation_id: item.seller_organisation_id,
            product_title: item.product_title,
            brand_model: item.brand_model,
            model_number: item.model_number,
            description: item.description,
            status: item.status.as_str().to_string(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl CreateSellerItemRequest {
    /// Split into the item fields and the sub-categories to link
    pub fn into_parts(self) -> (SellerItemFields, Vec<uuid::Uuid>) {
        (
            SellerItemFields {
                seller_organisation_id: self.seller_organisation_id,
                product_title: self.product_title,
                brand_model: self.brand_model,
                model_number: self.model_number,
                description: self.description,
            },
            self.sub_category_ids,
        )
    }
}

impl From<UpdateSellerItemRequest> for SellerItemFields {
    fn from(req: UpdateSellerItemRequest) -> Self {
        Self {
            seller_organisation_id: req.seller_organisation_id,
            product_title: req.product_title,
            brand_model: req.brand_model,
            model_number: req.model_number,
            description: req.description,
        }
    }
}

impl From<contract::MainCategory> for MainCategoryDto {
    fn from(category: contract::MainCategory) -> Self {
        Self {
            id: category.id,
            external_id: category.external_id,
            title: category.title,
            updated_at: category.updated_at,
        }
    }
}

impl From<contract::SubCategory> for SubCategoryDto {
    fn from(category: contract::SubCategory) -> Self {
        Self {
            id: category.id,
            external_id: category.external_id,
            main_category_id: category.main_category_id,
            title: category.title,
            updated_at: category.updated_at,
        }
    }
}

impl From<contract::RefreshSummary> for RefreshSummaryDto {
    fn from(summary: contract::RefreshSummary) -> Self {
        Self {
            main_categories: summary.main_categories,
            sub_categories: summary.sub_categories,
        }
    }
}

impl From<contract::EventLog> for EventLogDto {
    fn from(event: contract::EventLog) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type.as_str().to_string(),
            entity: event.entity,
            detail: event.detail,
            created_at: event.created_at,
        }
    }
}

// ===== Tickets =====

impl From<contract::TicketBody> for TicketBodyDto {
    fn from(ticket: contract::TicketBody) -> Self {
        Self {
            id: ticket.id,
            buyer_organisation_id: ticket.buyer_organisation_id,
            title: ticket.title,
            priority: ticket.priority.as_str().to_string(),
            deadline: ticket.deadline,
            status: ticket.status.as_str().to_string(),
            ticket_owner_id: ticket.owner_id,
            void_remark: ticket.void_remark,
            created_by_id: ticket.created_by,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

impl From<contract::TicketTransition> for TicketBodyDto {
    fn from(transition: contract::TicketTransition) -> Self {
        transition.value.into()
    }
}

impl TryFrom<CreateTicketRequest> for NewTicketBody {
    type Error = Problem;

    fn try_from(req: CreateTicketRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            priority: match req.priority.as_deref() {
                None => Priority::Normal,
                Some(value) => priority(value)?,
            },
            deadline: req.deadline,
            owner_id: req.ticket_owner_id,
        })
    }
}

impl TryFrom<TicketGeneralDetailsRequest> for TicketGeneralDetails {
    type Error = Problem;

    fn try_from(req: TicketGeneralDetailsRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            priority: priority(&req.priority)?,
            deadline: req.deadline,
            void_remark: req.void_remark,
        })
    }
}

impl TryFrom<TicketUpdateRequest> for TicketUpdate {
    type Error = Problem;

    fn try_from(req: TicketUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            owner_id: req.ticket_owner_id,
            details: TicketGeneralDetails {
                title: req.title,
                priority: priority(&req.priority)?,
                deadline: req.deadline,
                void_remark: req.void_remark,
            },
        })
    }
}

impl From<contract::TicketLineItem> for TicketLineItemDto {
    fn from(item: contract::TicketLineItem) -> Self {
        Self {
            id: item.id,
            item_name: item.item_name,
            quantity: item.quantity,
            budget_cents: item.budget_cents,
            deadline: item.deadline,
            sourcing_remarks: item.sourcing_remarks,
            sourcing_status: item.status.as_str().to_string(),
            line_item_owner_id: item.owner_id,
            created_by_id: item.created_by,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<contract::LineItemTransition> for TicketLineItemDto {
    fn from(transition: contract::LineItemTransition) -> Self {
        transition.value.into()
    }
}

impl From<CreateLineItemRequest> for NewTicketLineItem {
    fn from(req: CreateLineItemRequest) -> Self {
        Self {
            details: LineItemGeneralDetails {
                item_name: req.item_name,
                quantity: req.quantity,
                budget_cents: req.budget_cents,
                deadline: req.deadline,
                sourcing_remarks: req.sourcing_remarks,
            },
            owner_id: req.line_item_owner_id,
        }
    }
}

impl From<LineItemGeneralDetailsRequest> for LineItemGeneralDetails {
    fn from(req: LineItemGeneralDetailsRequest) -> Self {
        Self {
            item_name: req.item_name,
            quantity: req.quantity,
            budget_cents: req.budget_cents,
            deadline: req.deadline,
            sourcing_remarks: req.sourcing_remarks,
        }
    }
}

impl From<LineItemUpdateRequest> for LineItemUpdate {
    fn from(req: LineItemUpdateRequest) -> Self {
        Self {
            owner_id: req.line_item_owner_id,
            details: LineItemGeneralDetails {
                item_name: req.item_name,
                quantity: req.quantity,
                budget_cents: req.budget_cents,
                deadline: req.deadline,
                sourcing_remarks: req.sourcing_remarks,
            },
        }
    }
}

impl From<contract::TicketLabel> for TicketLabelDto {
    fn from(label: contract::TicketLabel) -> Self {
        Self {
            id: label.id,
            title: label.title,
            description: label.description,
            created_at: label.created_at,
            updated_at: label.updated_at,
        }
    }
}

impl From<TicketLabelRequest> for TicketLabelFields {
    fn from(req: TicketLabelRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

// ===== Units of measurement =====

impl From<contract::UomReference> for UomReferenceDto {
    fn from(uom: contract::UomReference) -> Self {
        Self {
            id: uom.id,
            uom_code: uom.uom_code,
            description: uom.description,
            created_at: uom.created_at,
        }
    }
}

impl From<CreateUomRequest> for NewUomReference {
    fn from(req: CreateUomRequest) -> Self {
        Self {
            uom_code: req.uom_code,
            description: req.description,
        }
    }
}

// ===== Comments =====

impl From<contract::Comment> for CommentDto {
    fn from(comment: contract::Comment) -> Self {
        Self {
            id: comment.id,
            target_type: comment.target.resource().to_string(),
            target_id: comment.target.id(),
            message: comment.message,
            created_by_id: comment.created_by,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_segments() {
        assert_eq!(lifecycle_segment("active").ok(), Some(LifecycleStatus::Active));
        assert_eq!(lifecycle_segment("inactive").ok(), Some(LifecycleStatus::Inactive));
        assert_eq!(lifecycle_segment("delete").ok(), Some(LifecycleStatus::Deleted));
        let err = lifecycle_segment("archived").err().map(|p| p.status);
        assert_eq!(err, Some(400));
    }

    #[test]
    fn test_page_request_defaults() {
        let request = page_request(PaginateQuery::default(), 25).unwrap();
        assert_eq!(request.column_key, "id");
        assert_eq!(request.sort, SortOrder::Asc);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 25);
    }

    #[test]
    fn test_page_request_rejects_unknown_sort_order() {
        let query = PaginateQuery {
            sortby: Some("sideways".into()),
            ..Default::default()
        };
        assert_eq!(page_request(query, 10).err().map(|p| p.status), Some(400));
    }

    #[test]
    fn test_ticket_priority_defaults_to_normal() {
        let req = CreateTicketRequest {
            title: "Laptops".into(),
            priority: None,
            deadline: None,
            ticket_owner_id: None,
        };
        let ticket = NewTicketBody::try_from(req).unwrap();
        assert_eq!(ticket.priority, Priority::Normal);
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let req = TicketGeneralDetailsRequest {
            title: "Laptops".into(),
            priority: "whenever".into(),
            deadline: None,
            void_remark: None,
            resource_item_id: None,
        };
        assert!(TicketGeneralDetails::try_from(req).is_err());
    }
}
