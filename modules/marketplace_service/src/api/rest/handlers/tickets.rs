//! Ticket bodies and their line items
//!
//! Workflow handlers always answer with the stored record after the
//! transition; the transition metadata stays in the event stream.

use super::{deleted_json, list_json, ApiResult};
use crate::api::rest::dto::*;
use crate::api::rest::error::Problem;
use crate::api::rest::extract::{ActingUser, Payload, ValidQuery};
use crate::contract::{NewTicketBody, TicketGeneralDetails, TicketUpdate};
use crate::domain::Services;
use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

// ===== Ticket bodies =====

pub async fn create_ticket(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    ValidQuery(query): ValidQuery<BuyerOrganisationQuery>,
    Payload(req): Payload<CreateTicketRequest>,
) -> ApiResult<TicketBodyDto> {
    let buyer_id = query
        .buyer_organisation_id
        .ok_or_else(|| Problem::bad_request("query parameter 'buyerOrganisationId' is required"))?;
    let ticket = NewTicketBody::try_from(req)?;
    let created = services
        .tickets
        .create(buyer_id, ticket, acting_user)
        .await?;
    Ok(Json(created.into()))
}

pub async fn list_tickets(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<BuyerOrganisationQuery>,
) -> ApiResult<Vec<TicketBodyDto>> {
    list_json(services.tickets.list(query.buyer_organisation_id).await?)
}

pub async fn get_ticket(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<TicketBodyDto> {
    Ok(Json(services.tickets.get(id).await?.into()))
}

pub async fn delete_tickets(
    Extension(services): Extension<Services>,
    _user: ActingUser,
    Payload(req): Payload<DeleteManyRequest>,
) -> ApiResult<DeletedDto> {
    deleted_json(services.tickets.delete_many(&req.ids).await)
}

pub async fn update_ticket(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(id): Path<Uuid>,
    Payload(req): Payload<TicketUpdateRequest>,
) -> ApiResult<TicketBodyDto> {
    let update = TicketUpdate::try_from(req)?;
    Ok(Json(
        services.tickets.update(id, update, acting_user).await?.into(),
    ))
}

pub async fn set_ticket_owner(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(id): Path<Uuid>,
    Payload(req): Payload<TicketOwnerRequest>,
) -> ApiResult<TicketBodyDto> {
    let transition = services
        .tickets
        .set_owner(id, req.ticket_owner_id, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn update_ticket_general_details(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(id): Path<Uuid>,
    Payload(req): Payload<TicketGeneralDetailsRequest>,
) -> ApiResult<TicketBodyDto> {
    let details = TicketGeneralDetails::try_from(req)?;
    let transition = services
        .tickets
        .update_general_details(id, details, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn start_ticket_sourcing(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<TicketBodyDto> {
    let transition = services.tickets.start_sourcing(req.id, acting_user).await?;
    Ok(Json(transition.into()))
}

pub async fn complete_ticket(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<TicketBodyDto> {
    let transition = services.tickets.complete(req.id, acting_user).await?;
    Ok(Json(transition.into()))
}

pub async fn void_ticket(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<VoidTicketRequest>,
) -> ApiResult<TicketBodyDto> {
    let transition = services
        .tickets
        .void(req.id, req.void_remark, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

// ===== Line items within a ticket =====

pub async fn list_line_items(
    Extension(services): Extension<Services>,
    Path(ticket_id): Path<Uuid>,
) -> ApiResult<Vec<TicketLineItemDto>> {
    list_json(services.tickets.line_items(ticket_id).await?)
}

pub async fn create_line_item(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(ticket_id): Path<Uuid>,
    Payload(req): Payload<CreateLineItemRequest>,
) -> ApiResult<TicketLineItemDto> {
    let item = services
        .line_items
        .create(ticket_id, req.into(), acting_user)
        .await?;
    Ok(Json(item.into()))
}

pub async fn get_line_item_in_ticket(
    Extension(services): Extension<Services>,
    Path((ticket_id, line_item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<TicketLineItemDto> {
    let item = services
        .line_items
        .get_in_ticket(ticket_id, line_item_id)
        .await?;
    Ok(Json(item.into()))
}

pub async fn update_line_item(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path((ticket_id, line_item_id)): Path<(Uuid, Uuid)>,
    Payload(req): Payload<LineItemUpdateRequest>,
) -> ApiResult<TicketLineItemDto> {
    services
        .line_items
        .get_in_ticket(ticket_id, line_item_id)
        .await?;
    let transition = services
        .line_items
        .update(line_item_id, req.into(), acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn set_line_item_owner(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path((ticket_id, line_item_id)): Path<(Uuid, Uuid)>,
    Payload(req): Payload<LineItemOwnerRequest>,
) -> ApiResult<TicketLineItemDto> {
    services
        .line_items
        .get_in_ticket(ticket_id, line_item_id)
        .await?;
    let transition = services
        .line_items
        .set_owner(line_item_id, req.line_item_owner_id, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn update_line_item_general_details(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path((ticket_id, line_item_id)): Path<(Uuid, Uuid)>,
    Payload(req): Payload<LineItemGeneralDetailsRequest>,
) -> ApiResult<TicketLineItemDto> {
    services
        .line_items
        .get_in_ticket(ticket_id, line_item_id)
        .await?;
    let transition = services
        .line_items
        .update_general_details(line_item_id, req.into(), acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn start_line_item_sourcing(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(ticket_id): Path<Uuid>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<TicketLineItemDto> {
    services.line_items.get_in_ticket(ticket_id, req.id).await?;
    let transition = services
        .line_items
        .start_sourcing(req.id, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn mark_line_item_sourced(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(ticket_id): Path<Uuid>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<TicketLineItemDto> {
    services.line_items.get_in_ticket(ticket_id, req.id).await?;
    let transition = services
        .line_items
        .mark_sourced(req.id, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

pub async fn mark_line_item_unable_to_source(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(ticket_id): Path<Uuid>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<TicketLineItemDto> {
    services.line_items.get_in_ticket(ticket_id, req.id).await?;
    let transition = services
        .line_items
        .mark_unable_to_source(req.id, acting_user)
        .await?;
    Ok(Json(transition.into()))
}

// ===== Line items addressed directly =====

pub async fn get_line_item(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<TicketLineItemDto> {
    Ok(Json(services.line_items.get(id).await?.into()))
}

pub async fn delete_line_items(
    Extension(services): Extension<Services>,
    _user: ActingUser,
    Payload(req): Payload<DeleteManyRequest>,
) -> ApiResult<DeletedDto> {
    deleted_json(services.line_items.delete_many(&req.ids).await)
}
