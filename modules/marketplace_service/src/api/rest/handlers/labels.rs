use super::{list_json, ApiResult};
use crate::api::rest::dto::*;
use crate::api::rest::extract::Payload;
use crate::domain::Services;
use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

pub async fn create_label(
    Extension(services): Extension<Services>,
    Payload(req): Payload<TicketLabelRequest>,
) -> ApiResult<TicketLabelDto> {
    Ok(Json(services.labels.create(req.into()).await?.into()))
}

pub async fn list_labels(
    Extension(services): Extension<Services>,
) -> ApiResult<Vec<TicketLabelDto>> {
    list_json(services.labels.list().await?)
}

pub async fn get_label(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<TicketLabelDto> {
    Ok(Json(services.labels.get(id).await?.into()))
}

pub async fn update_label(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
    Payload(req): Payload<TicketLabelRequest>,
) -> ApiResult<TicketLabelDto> {
    Ok(Json(services.labels.update(id, req.into()).await?.into()))
}
