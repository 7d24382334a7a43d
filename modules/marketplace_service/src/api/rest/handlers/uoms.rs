use super::{list_json, ApiResult};
use crate::api::rest::dto::*;
use crate::api::rest::extract::Payload;
use crate::domain::Services;
use axum::Extension;

/// Bulk create: the body is a JSON array of `{uomCode, description}`
pub async fn create_uoms(
    Extension(services): Extension<Services>,
    Payload(req): Payload<Vec<CreateUomRequest>>,
) -> ApiResult<Vec<UomReferenceDto>> {
    let uoms = req.into_iter().map(Into::into).collect();
    list_json(services.uoms.create_many(uoms).await?)
}

pub async fn list_uoms(
    Extension(services): Extension<Services>,
) -> ApiResult<Vec<UomReferenceDto>> {
    list_json(services.uoms.list().await?)
}
