//! SeaORM entities for database tables
//!
//! Enumerations (statuses, priority, event type, comment target) are stored
//! as their upper-case wire names and parsed in the mapper.

pub mod access;
pub mod catalog;
pub mod link;
pub mod organisation;
pub mod ticket;

pub use access::{permission, user, user_role, user_role_permission, user_role_user};
pub use catalog::{event_log, main_category, seller_item, sub_category, uom_reference};
pub use link::{
    line_item_seller_item, seller_item_sub_category, ticket_body_label, ticket_body_line_item,
};
pub use organisation::{
    buyer_organisation, seller_branch_location, seller_contact, seller_organisation,
    seller_payment_term,
};
pub use ticket::{comment, ticket_body, ticket_label, ticket_line_item};
