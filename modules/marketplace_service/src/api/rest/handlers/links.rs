//! Junction-table endpoints: line items in tickets, seller items matched to
//! line items and labels on tickets

use super::{list_json, ApiResult};
use crate::api::rest::dto::*;
use crate::api::rest::error::Problem;
use crate::api::rest::extract::{ActingUser, Payload};
use crate::contract::LinkKind;
use crate::domain::Services;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

async fn link(
    services: &Services,
    kind: LinkKind,
    a: Uuid,
    b: Uuid,
    acting_user: Uuid,
) -> Result<StatusCode, Problem> {
    services.links.link(kind, a, b, acting_user).await?;
    Ok(StatusCode::CREATED)
}

async fn unlink(services: &Services, kind: LinkKind, a: Uuid, b: Uuid) -> ApiResult<UnlinkDto> {
    let removed = services.links.unlink(kind, a, b).await?;
    Ok(Json(UnlinkDto { removed }))
}

// ===== Line item in ticket body =====

pub async fn link_line_item(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<LineItemInTicketBodyRequest>,
) -> Result<StatusCode, Problem> {
    link(
        &services,
        LinkKind::LineItemInTicketBody,
        req.ticket_body_id,
        req.line_item_id,
        acting_user,
    )
    .await
}

pub async fn unlink_line_item(
    Extension(services): Extension<Services>,
    Payload(req): Payload<LineItemInTicketBodyRequest>,
) -> ApiResult<UnlinkDto> {
    unlink(
        &services,
        LinkKind::LineItemInTicketBody,
        req.ticket_body_id,
        req.line_item_id,
    )
    .await
}

pub async fn line_items_of_ticket(
    Extension(services): Extension<Services>,
    Path(ticket_id): Path<Uuid>,
) -> ApiResult<Vec<TicketLineItemDto>> {
    list_json(services.links.line_items_of_ticket(ticket_id).await?)
}

// ===== Seller item in ticket line item =====

pub async fn link_seller_item(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<SellerItemInLineItemRequest>,
) -> Result<StatusCode, Problem> {
    link(
        &services,
        LinkKind::SellerItemInLineItem,
        req.ticket_line_item_id,
        req.seller_item_id,
        acting_user,
    )
    .await
}

pub async fn unlink_seller_item(
    Extension(services): Extension<Services>,
    Payload(req): Payload<SellerItemInLineItemRequest>,
) -> ApiResult<UnlinkDto> {
    unlink(
        &services,
        LinkKind::SellerItemInLineItem,
        req.ticket_line_item_id,
        req.seller_item_id,
    )
    .await
}

pub async fn seller_items_of_line_item(
    Extension(services): Extension<Services>,
    Path(line_item_id): Path<Uuid>,
) -> ApiResult<Vec<SellerItemDto>> {
    list_json(services.links.seller_items_of_line_item(line_item_id).await?)
}

pub async fn line_items_for_seller_item(
    Extension(services): Extension<Services>,
    Path(seller_item_id): Path<Uuid>,
) -> ApiResult<Vec<TicketLineItemDto>> {
    list_json(
        services
            .links
            .line_items_for_seller_item(seller_item_id)
            .await?,
    )
}

// ===== Ticket body in ticket label =====

pub async fn link_label(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<TicketBodyInLabelRequest>,
) -> Result<StatusCode, Problem> {
    link(
        &services,
        LinkKind::TicketBodyInLabel,
        req.ticket_body_id,
        req.ticket_label_id,
        acting_user,
    )
    .await
}

pub async fn unlink_label(
    Extension(services): Extension<Services>,
    Payload(req): Payload<TicketBodyInLabelRequest>,
) -> ApiResult<UnlinkDto> {
    unlink(
        &services,
        LinkKind::TicketBodyInLabel,
        req.ticket_body_id,
        req.ticket_label_id,
    )
    .await
}

pub async fn tickets_with_label(
    Extension(services): Extension<Services>,
    Path(label_id): Path<Uuid>,
) -> ApiResult<Vec<TicketBodyDto>> {
    list_json(services.links.tickets_with_label(label_id).await?)
}

pub async fn labels_of_ticket(
    Extension(services): Extension<Services>,
    Path(ticket_id): Path<Uuid>,
) -> ApiResult<Vec<TicketLabelDto>> {
    list_json(services.links.labels_of_ticket(ticket_id).await?)
}
