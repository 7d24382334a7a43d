//! Route registration and the OpenAPI document

use super::dto::*;
use super::extract::RestSettings;
use super::handlers::{
    access, catalog, categories,
    comments::{self, OnLineItem, OnSellerOrganisation, OnTicketBody},
    labels, links, organisations, tickets, uoms,
};
use super::middleware::csrf_guard;
use crate::domain::Services;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Schemas published at `/api/v1/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(title = "Marketplace API", description = "Organisations, catalog and procurement tickets"),
    components(schemas(
        StatusChangeRequest, DeleteManyRequest, DeletedDto, UnlinkDto,
        UserDto, CreateUserRequest, UserRoleDto, CreateRoleRequest, PermissionDto,
        SetRolePermissionsRequest, SetUserRolesRequest,
        BuyerOrganisationDto, BuyerOrganisationRequest,
        SellerOrganisationDto, CreateSellerOrganisationRequest,
        SellerBasicInformationRequest, SellerDetailsInformationRequest,
        SellerContactDto, SellerContactRequest,
        SellerBranchLocationDto, SellerBranchLocationRequest,
        SellerPaymentTermDto, SellerPaymentTermRequest,
        SellerItemDto, CreateSellerItemRequest, UpdateSellerItemRequest,
        SubCategoryLinkRequest, SubCategoryIdsRequest,
        MainCategoryDto, SubCategoryDto, RefreshSummaryDto, EventLogDto,
        TicketBodyDto, CreateTicketRequest, TicketGeneralDetailsRequest,
        TicketOwnerRequest, TicketUpdateRequest, VoidTicketRequest,
        TicketLineItemDto, CreateLineItemRequest, LineItemGeneralDetailsRequest,
        LineItemOwnerRequest, LineItemUpdateRequest,
        TicketLabelDto, TicketLabelRequest, CommentDto, CommentRequest,
        LineItemInTicketBodyRequest, SellerItemInLineItemRequest, TicketBodyInLabelRequest,
        UomReferenceDto, CreateUomRequest,
    ))
)]
pub struct ApiDoc;

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn access_routes() -> Router {
    Router::new()
        .route(
            "/users",
            post(access::create_user).get(access::find_user_by_email),
        )
        .route("/users/actions/delete", post(access::delete_users))
        .route("/users/{id}", get(access::get_user))
        .route("/users/{id}/roles", put(access::set_user_roles))
        .route("/user-roles", post(access::create_role))
        .route(
            "/user-roles/{id}/permissions",
            put(access::set_role_permissions),
        )
        .route("/permissions", get(access::get_permission))
        .route("/permissions/actions/seed", post(access::seed_permissions))
}

fn buyer_routes() -> Router {
    Router::new()
        .route(
            "/buyer-organisation",
            post(organisations::create_buyer).get(organisations::list_buyers),
        )
        .route(
            "/buyer-organisation/actions/delete",
            post(organisations::delete_buyers),
        )
        .route("/buyer-organisation/{id}", get(organisations::get_buyer))
}

fn seller_routes() -> Router {
    use organisations as o;

    Router::new()
        .route("/seller-organisations", post(o::create_seller).get(o::list_sellers))
        .route("/seller-organisations/check/company-email", get(o::check_company_email))
        .route("/seller-organisations/check/company-phone", get(o::check_company_phone))
        .route("/seller-organisations/check/company-name", get(o::check_company_name))
        .route("/seller-organisations/status/{status}", post(o::set_seller_status))
        .route("/seller-organisations/actions/filter", get(o::filter_sellers))
        .route("/seller-organisations/actions/paginate", get(o::paginate_sellers))
        .route("/seller-organisations/actions/delete", post(o::delete_sellers))
        .route("/seller-organisations/{id}", get(o::get_seller))
        .route(
            "/seller-organisations/{id}/company-basic-information",
            put(o::update_seller_basic_information),
        )
        .route(
            "/seller-organisations/{id}/company-details-information",
            put(o::update_seller_details_information),
        )
        // contacts
        .route(
            "/seller-organisations/{id}/seller-contacts",
            post(o::create_contact).get(o::list_contacts),
        )
        .route(
            "/seller-organisations/{id}/seller-contacts/check/email",
            get(o::check_contact_email),
        )
        .route(
            "/seller-organisations/{id}/seller-contacts/check/phone",
            get(o::check_contact_phone),
        )
        .route(
            "/seller-organisations/{id}/seller-contacts/status/{status}",
            post(o::set_contact_status),
        )
        .route(
            "/seller-organisations/{id}/seller-contacts/actions/filter",
            get(o::filter_contacts),
        )
        .route(
            "/seller-organisations/{id}/seller-contacts/actions/paginate",
            get(o::paginate_contacts),
        )
        .route(
            "/seller-organisations/{id}/seller-contacts/{contact_id}",
            get(o::get_contact).put(o::update_contact),
        )
        // branch locations
        .route(
            "/seller-organisations/{id}/seller-branch-locations",
            post(o::create_branch).get(o::list_branches),
        )
        .route(
            "/seller-organisations/{id}/seller-branch-locations/status/{status}",
            post(o::set_branch_status),
        )
        .route(
            "/seller-organisations/{id}/seller-branch-locations/actions/filter",
            get(o::filter_branches),
        )
        .route(
            "/seller-organisations/{id}/seller-branch-locations/actions/paginate",
            get(o::paginate_branches),
        )
        .route(
            "/seller-organisations/{id}/seller-branch-locations/{branch_id}",
            get(o::get_branch).put(o::update_branch),
        )
        // payment term
        .route(
            "/seller-organisations/{id}/seller-payment-term",
            get(o::get_payment_term)
                .post(o::create_payment_term)
                .put(o::update_payment_term),
        )
        // comments
        .route(
            "/seller-organisations/{id}/seller-comments",
            get(comments::list::<OnSellerOrganisation>)
                .post(comments::create::<OnSellerOrganisation>),
        )
        .route(
            "/seller-organisations/{id}/seller-comments/{comment_id}",
            get(comments::get::<OnSellerOrganisation>)
                .put(comments::update::<OnSellerOrganisation>)
                .delete(comments::delete::<OnSellerOrganisation>),
        )
}

fn catalog_routes() -> Router {
    Router::new()
        .route("/seller-items", post(catalog::create_item))
        .route("/seller-items/actions/filter", get(catalog::filter_items))
        .route(
            "/seller-items/actions/filter/{field}",
            get(catalog::filter_items_by),
        )
        .route("/seller-items/actions/paginate", get(catalog::paginate_items))
        .route("/seller-items/actions/delete", post(catalog::delete_items))
        .route("/seller-items/status/{status}", post(catalog::set_item_status))
        .route(
            "/seller-items/{id}",
            get(catalog::get_item).put(catalog::update_item),
        )
        .route(
            "/seller-items/{id}/categories",
            get(catalog::item_categories).put(catalog::set_item_categories),
        )
        .route(
            "/seller-items/{id}/categories/actions/link",
            post(catalog::link_item_category),
        )
        .route(
            "/seller-items/{id}/categories/actions/unlink",
            post(catalog::unlink_item_category),
        )
        .route(
            "/categories",
            get(categories::list_main).delete(categories::delete_all),
        )
        .route("/categories/actions/refresh", post(categories::refresh))
        .route(
            "/sub-categories/actions/filter",
            get(categories::filter_sub_categories),
        )
        .route(
            "/sub-categories/actions/paginate",
            get(categories::paginate_sub_categories),
        )
        .route("/sub-categories/{id}", get(categories::get_sub_category))
        .route(
            "/sub-categories/{id}/seller-items",
            get(categories::items_in_sub_category),
        )
        .route(
            "/event-log/categories/last-refresh",
            get(categories::last_refresh),
        )
        .route(
            "/unit-of-measurement",
            get(uoms::list_uoms).post(uoms::create_uoms),
        )
}

fn ticket_routes() -> Router {
    use tickets as t;

    Router::new()
        .route("/ticket-bodies", post(t::create_ticket).get(t::list_tickets))
        .route("/ticket-bodies/actions/status/sourcing", post(t::start_ticket_sourcing))
        .route("/ticket-bodies/actions/status/complete", post(t::complete_ticket))
        .route("/ticket-bodies/actions/status/void", post(t::void_ticket))
        .route("/ticket-bodies/actions/delete", post(t::delete_tickets))
        .route("/ticket-bodies/{id}", get(t::get_ticket).put(t::update_ticket))
        .route("/ticket-bodies/{id}/ticket-owner", put(t::set_ticket_owner))
        .route(
            "/ticket-bodies/{id}/general-details",
            put(t::update_ticket_general_details),
        )
        .route("/ticket-bodies/{id}/ticket-labels", get(links::labels_of_ticket))
        .route(
            "/ticket-bodies/{id}/ticket-line-items",
            get(t::list_line_items).post(t::create_line_item),
        )
        .route(
            "/ticket-bodies/{id}/ticket-line-items/actions/status/sourcing",
            post(t::start_line_item_sourcing),
        )
        .route(
            "/ticket-bodies/{id}/ticket-line-items/actions/status/sourced",
            post(t::mark_line_item_sourced),
        )
        .route(
            "/ticket-bodies/{id}/ticket-line-items/actions/status/unable-to-source",
            post(t::mark_line_item_unable_to_source),
        )
        .route(
            "/ticket-bodies/{id}/ticket-line-items/{line_item_id}",
            get(t::get_line_item_in_ticket).put(t::update_line_item),
        )
        .route(
            "/ticket-bodies/{id}/ticket-line-items/{line_item_id}/line-item-owner",
            put(t::set_line_item_owner),
        )
        .route(
            "/ticket-bodies/{id}/ticket-line-items/{line_item_id}/general-details",
            put(t::update_line_item_general_details),
        )
        .route(
            "/ticket-bodies/{id}/ticket-body-comments",
            get(comments::list::<OnTicketBody>).post(comments::create::<OnTicketBody>),
        )
        .route(
            "/ticket-bodies/{id}/ticket-body-comments/{comment_id}",
            get(comments::get::<OnTicketBody>)
                .put(comments::update::<OnTicketBody>)
                .delete(comments::delete::<OnTicketBody>),
        )
        .route("/ticket-line-items/actions/delete", post(t::delete_line_items))
        .route("/ticket-line-items/{id}", get(t::get_line_item))
        .route(
            "/ticket-line-items/{id}/line-item-comments",
            get(comments::list::<OnLineItem>).post(comments::create::<OnLineItem>),
        )
        .route(
            "/ticket-line-items/{id}/line-item-comments/{comment_id}",
            get(comments::get::<OnLineItem>)
                .put(comments::update::<OnLineItem>)
                .delete(comments::delete::<OnLineItem>),
        )
        .route(
            "/ticket-label",
            post(labels::create_label).get(labels::list_labels),
        )
        .route(
            "/ticket-label/{id}",
            get(labels::get_label).put(labels::update_label),
        )
}

fn link_routes() -> Router {
    Router::new()
        .route("/line-item-in-ticket-body", post(links::link_line_item))
        .route(
            "/line-item-in-ticket-body/actions/unlink",
            post(links::unlink_line_item),
        )
        .route(
            "/line-item-in-ticket-body/{ticket_body_id}",
            get(links::line_items_of_ticket),
        )
        .route("/seller-item-in-ticket-line-item", post(links::link_seller_item))
        .route(
            "/seller-item-in-ticket-line-item/actions/unlink",
            post(links::unlink_seller_item),
        )
        .route(
            "/seller-item-in-ticket-line-item/ticket-line-item/{id}",
            get(links::seller_items_of_line_item),
        )
        .route(
            "/seller-item-in-ticket-line-item/seller-item/{id}",
            get(links::line_items_for_seller_item),
        )
        .route("/ticket-body-in-ticket-label", post(links::link_label))
        .route(
            "/ticket-body-in-ticket-label/actions/unlink",
            post(links::unlink_label),
        )
        .route(
            "/ticket-body-in-ticket-label/label/{id}",
            get(links::tickets_with_label),
        )
        .route(
            "/ticket-body-in-ticket-label/ticket-body/{id}",
            get(links::labels_of_ticket),
        )
}

/// Build the `/api/v1` router over the given services
///
/// The CSRF guard wraps every route; services and settings travel as request
/// extensions.
pub fn router(services: Services, settings: Arc<RestSettings>) -> Router {
    let api = Router::new()
        .merge(access_routes())
        .merge(buyer_routes())
        .merge(seller_routes())
        .merge(catalog_routes())
        .merge(ticket_routes())
        .merge(link_routes())
        .route("/openapi.json", get(openapi_document))
        .layer(from_fn_with_state(settings.clone(), csrf_guard))
        .layer(Extension(settings))
        .layer(Extension(services));

    Router::new().nest("/api/v1", api)
}
