//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Enumerations are
//! stored as wire names, so reading a row can fail on an unknown value.

use super::entity::{
    buyer_organisation, comment, event_log, main_category, permission, seller_branch_location,
    seller_contact, seller_item, seller_organisation, seller_payment_term, sub_category,
    ticket_body, ticket_label, ticket_line_item, uom_reference, user, user_role,
};
use crate::contract::{
    BuyerOrganisation, Comment, CommentTarget, EventLog, EventType, LifecycleStatus,
    LineItemStatus, MainCategory, Permission, Priority, SellerBranchLocation, SellerContact,
    SellerItem, SellerOrganisation, SellerPaymentTerm, SubCategory, TicketBody, TicketLabel,
    TicketLineItem, TicketStatus, UomReference, User, UserRole,
};
use anyhow::anyhow;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

fn parse<T>(column: &str, value: &str, parse: fn(&str) -> Option<T>) -> anyhow::Result<T> {
    parse(value).ok_or_else(|| anyhow!("unknown {} value '{}'", column, value))
}

// ===== Access =====

impl TryFrom<user::Model> for User {
    type Error = anyhow::Error;

    fn try_from(model: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        })
    }
}

impl From<&User> for user::ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            created_at: Set(user.created_at),
        }
    }
}

impl TryFrom<user_role::Model> for UserRole {
    type Error = anyhow::Error;

    fn try_from(model: user_role::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}

impl From<&UserRole> for user_role::ActiveModel {
    fn from(role: &UserRole) -> Self {
        Self {
            id: Set(role.id),
            name: Set(role.name.clone()),
            created_by: Set(role.created_by),
            created_at: Set(role.created_at),
        }
    }
}

impl From<permission::Model> for Permission {
    fn from(model: permission::Model) -> Self {
        Self {
            id: model.id,
            value: model.value,
        }
    }
}

// ===== Organisations =====

impl TryFrom<buyer_organisation::Model> for BuyerOrganisation {
    type Error = anyhow::Error;

    fn try_from(model: buyer_organisation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            company_name: model.company_name,
            company_email: model.company_email,
            company_phone: model.company_phone,
            remarks: model.remarks,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&BuyerOrganisation> for buyer_organisation::ActiveModel {
    fn from(org: &BuyerOrganisation) -> Self {
        Self {
            id: Set(org.id),
            company_name: Set(org.company_name.clone()),
            company_email: Set(org.company_email.clone()),
            company_phone: Set(org.company_phone.clone()),
            remarks: Set(org.remarks.clone()),
            created_by: Set(org.created_by),
            created_at: Set(org.created_at),
            updated_at: Set(org.updated_at),
        }
    }
}

impl TryFrom<seller_organisation::Model> for SellerOrganisation {
    type Error = anyhow::Error;

    fn try_from(model: seller_organisation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse("status", &model.status, LifecycleStatus::parse)?,
            id: model.id,
            company_name: model.company_name,
            company_email: model.company_email,
            company_phone: model.company_phone,
            company_address: model.company_address,
            website: model.website,
            remarks: model.remarks,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&SellerOrganisation> for seller_organisation::ActiveModel {
    fn from(org: &SellerOrganisation) -> Self {
        Self {
            id: Set(org.id),
            company_name: Set(org.company_name.clone()),
            company_email: Set(org.company_email.clone()),
            company_phone: Set(org.company_phone.clone()),
            company_address: Set(org.company_address.clone()),
            website: Set(org.website.clone()),
            remarks: Set(org.remarks.clone()),
            status: Set(org.status.as_str().to_string()),
            created_at: Set(org.created_at),
            updated_at: Set(org.updated_at),
        }
    }
}

impl TryFrom<seller_contact::Model> for SellerContact {
    type Error = anyhow::Error;

    fn try_from(model: seller_contact::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse("status", &model.status, LifecycleStatus::parse)?,
            id: model.id,
            seller_organisation_id: model.seller_organisation_id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            department: model.department,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&SellerContact> for seller_contact::ActiveModel {
    fn from(contact: &SellerContact) -> Self {
        Self {
            id: Set(contact.id),
            seller_organisation_id: Set(contact.seller_organisation_id),
            name: Set(contact.name.clone()),
            email: Set(contact.email.clone()),
            phone: Set(contact.phone.clone()),
            department: Set(contact.department.clone()),
            role: Set(contact.role.clone()),
            status: Set(contact.status.as_str().to_string()),
            created_at: Set(contact.created_at),
            updated_at: Set(contact.updated_at),
        }
    }
}

impl TryFrom<seller_branch_location::Model> for SellerBranchLocation {
    type Error = anyhow::Error;

    fn try_from(model: seller_branch_location::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse("status", &model.status, LifecycleStatus::parse)?,
            id: model.id,
            seller_organisation_id: model.seller_organisation_id,
            branch_name: model.branch_name,
            branch_address: model.branch_address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&SellerBranchLocation> for seller_branch_location::ActiveModel {
    fn from(branch: &SellerBranchLocation) -> Self {
        Self {
            id: Set(branch.id),
            seller_organisation_id: Set(branch.seller_organisation_id),
            branch_name: Set(branch.branch_name.clone()),
            branch_address: Set(branch.branch_address.clone()),
            status: Set(branch.status.as_str().to_string()),
            created_at: Set(branch.created_at),
            updated_at: Set(branch.updated_at),
        }
    }
}

impl TryFrom<seller_payment_term::Model> for SellerPaymentTerm {
    type Error = anyhow::Error;

    fn try_from(model: seller_payment_term::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            seller_organisation_id: model.seller_organisation_id,
            payment_method: model.payment_method,
            bank_name: model.bank_name,
            bank_account_holder: model.bank_account_holder,
            bank_account_number: model.bank_account_number,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&SellerPaymentTerm> for seller_payment_term::ActiveModel {
    fn from(term: &SellerPaymentTerm) -> Self {
        Self {
            id: Set(term.id),
            seller_organisation_id: Set(term.seller_organisation_id),
            payment_method: Set(term.payment_method.clone()),
            bank_name: Set(term.bank_name.clone()),
            bank_account_holder: Set(term.bank_account_holder.clone()),
            bank_account_number: Set(term.bank_account_number.clone()),
            created_at: Set(term.created_at),
            updated_at: Set(term.updated_at),
        }
    }
}

// ===== Catalog =====

impl TryFrom<seller_item::Model> for SellerItem {
    type Error = anyhow::Error;

    fn try_from(model: seller_item::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse("status", &model.status, LifecycleStatus::parse)?,
            id: model.id,
            seller_organisation_id: model.seller_organisation_id,
            product_title: model.product_title,
            brand_model: model.brand_model,
            model_number: model.model_number,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&SellerItem> for seller_item::ActiveModel {
    fn from(item: &SellerItem) -> Self {
        Self {
            id: Set(item.id),
            seller_organisation_id: Set(item.seller_organisation_id),
            product_title: Set(item.product_title.clone()),
            brand_model: Set(item.brand_model.clone()),
            model_number: Set(item.model_number.clone()),
            description: Set(item.description.clone()),
            status: Set(item.status.as_str().to_string()),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        }
    }
}

impl TryFrom<main_category::Model> for MainCategory {
    type Error = anyhow::Error;

    fn try_from(model: main_category::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            external_id: model.external_id,
            title: model.title,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<sub_category::Model> for SubCategory {
    type Error = anyhow::Error;

    fn try_from(model: sub_category::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            external_id: model.external_id,
            main_category_id: model.main_category_id,
            title: model.title,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<uom_reference::Model> for UomReference {
    type Error = anyhow::Error;

    fn try_from(model: uom_reference::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            uom_code: model.uom_code,
            description: model.description,
            created_at: model.created_at,
        })
    }
}

impl From<&UomReference> for uom_reference::ActiveModel {
    fn from(uom: &UomReference) -> Self {
        Self {
            id: Set(uom.id),
            uom_code: Set(uom.uom_code.clone()),
            description: Set(uom.description.clone()),
            created_at: Set(uom.created_at),
        }
    }
}

impl TryFrom<event_log::Model> for EventLog {
    type Error = anyhow::Error;

    fn try_from(model: event_log::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            event_type: parse("event_type", &model.event_type, EventType::parse)?,
            id: model.id,
            entity: model.entity_name,
            detail: model.detail,
            created_at: model.created_at,
        })
    }
}

impl From<&EventLog> for event_log::ActiveModel {
    fn from(event: &EventLog) -> Self {
        Self {
            id: Set(event.id),
            event_type: Set(event.event_type.as_str().to_string()),
            entity_name: Set(event.entity.clone()),
            detail: Set(event.detail.clone()),
            created_at: Set(event.created_at),
        }
    }
}

// ===== Tickets =====

impl TryFrom<ticket_body::Model> for TicketBody {
    type Error = anyhow::Error;

    fn try_from(model: ticket_body::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            priority: parse("priority", &model.priority, Priority::parse)?,
            status: parse("status", &model.status, TicketStatus::parse)?,
            id: model.id,
            buyer_organisation_id: model.buyer_organisation_id,
            title: model.title,
            deadline: model.deadline,
            owner_id: model.owner_id,
            void_remark: model.void_remark,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&TicketBody> for ticket_body::ActiveModel {
    fn from(ticket: &TicketBody) -> Self {
        Self {
            id: Set(ticket.id),
            buyer_organisation_id: Set(ticket.buyer_organisation_id),
            title: Set(ticket.title.clone()),
            priority: Set(ticket.priority.as_str().to_string()),
            deadline: Set(ticket.deadline),
            status: Set(ticket.status.as_str().to_string()),
            owner_id: Set(ticket.owner_id),
            void_remark: Set(ticket.void_remark.clone()),
            created_by: Set(ticket.created_by),
            created_at: Set(ticket.created_at),
            updated_at: Set(ticket.updated_at),
        }
    }
}

impl TryFrom<ticket_line_item::Model> for TicketLineItem {
    type Error = anyhow::Error;

    fn try_from(model: ticket_line_item::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse(
                "sourcing_status",
                &model.sourcing_status,
                LineItemStatus::parse,
            )?,
            id: model.id,
            item_name: model.item_name,
            quantity: model.quantity,
            budget_cents: model.budget_cents,
            deadline: model.deadline,
            sourcing_remarks: model.sourcing_remarks,
            owner_id: model.owner_id,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&TicketLineItem> for ticket_line_item::ActiveModel {
    fn from(item: &TicketLineItem) -> Self {
        Self {
            id: Set(item.id),
            item_name: Set(item.item_name.clone()),
            quantity: Set(item.quantity),
            budget_cents: Set(item.budget_cents),
            deadline: Set(item.deadline),
            sourcing_remarks: Set(item.sourcing_remarks.clone()),
            sourcing_status: Set(item.status.as_str().to_string()),
            owner_id: Set(item.owner_id),
            created_by: Set(item.created_by),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        }
    }
}

impl TryFrom<ticket_label::Model> for TicketLabel {
    type Error = anyhow::Error;

    fn try_from(model: ticket_label::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&TicketLabel> for ticket_label::ActiveModel {
    fn from(label: &TicketLabel) -> Self {
        Self {
            id: Set(label.id),
            title: Set(label.title.clone()),
            description: Set(label.description.clone()),
            created_at: Set(label.created_at),
            updated_at: Set(label.updated_at),
        }
    }
}

// ===== Comments =====

/// Stored discriminator and id of a comment target
pub(crate) fn comment_target_columns(target: CommentTarget) -> (&'static str, Uuid) {
    (target.resource(), target.id())
}

fn comment_target(target_type: &str, target_id: Uuid) -> anyhow::Result<CommentTarget> {
    match target_type {
        "ticket_body" => Ok(CommentTarget::TicketBody(target_id)),
        "ticket_line_item" => Ok(CommentTarget::LineItem(target_id)),
        "seller_organisation" => Ok(CommentTarget::SellerOrganisation(target_id)),
        other => Err(anyhow!("unknown target_type value '{}'", other)),
    }
}

impl TryFrom<comment::Model> for Comment {
    type Error = anyhow::Error;

    fn try_from(model: comment::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            target: comment_target(&model.target_type, model.target_id)?,
            id: model.id,
            message: model.message,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Comment> for comment::ActiveModel {
    fn from(comment: &Comment) -> Self {
        let (target_type, target_id) = comment_target_columns(comment.target);
        Self {
            id: Set(comment.id),
            target_type: Set(target_type.to_string()),
            target_id: Set(target_id),
            message: Set(comment.message.clone()),
            created_by: Set(comment.created_by),
            created_at: Set(comment.created_at),
            updated_at: Set(comment.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_ticket_row_with_unknown_status_is_rejected() {
        let now = Utc::now();
        let row = ticket_body::Model {
            id: Uuid::new_v4(),
            buyer_organisation_id: Uuid::new_v4(),
            title: "Chairs".to_string(),
            priority: "NORMAL".to_string(),
            deadline: None,
            status: "ARCHIVED".to_string(),
            owner_id: None,
            void_remark: None,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        let err = TicketBody::try_from(row).unwrap_err();
        assert!(err.to_string().contains("ARCHIVED"));
    }

    #[test]
    fn test_comment_target_discriminator() {
        let id = Uuid::new_v4();
        for target in [
            CommentTarget::TicketBody(id),
            CommentTarget::LineItem(id),
            CommentTarget::SellerOrganisation(id),
        ] {
            let (kind, target_id) = comment_target_columns(target);
            assert_eq!(comment_target(kind, target_id).unwrap(), target);
        }
        assert!(comment_target("buyer_organisation", id).is_err());
    }
}
