//! Seller items and their sub-category links

use super::{deleted_json, list_json, page_json, to_page_request, ApiResult, Settings};
use crate::api::rest::dto::*;
use crate::api::rest::error::Problem;
use crate::api::rest::extract::{ActingUser, Payload, ValidQuery};
use crate::api::rest::mapper::lifecycle_segment;
use crate::contract::{LinkKind, SellerItemSearchField};
use crate::domain::Services;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

pub async fn create_item(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<CreateSellerItemRequest>,
) -> ApiResult<SellerItemDto> {
    let (fields, sub_category_ids) = req.into_parts();
    let item = services
        .items
        .create(fields, &sub_category_ids, acting_user)
        .await?;
    Ok(Json(item.into()))
}

pub async fn get_item(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<SellerItemDto> {
    Ok(Json(services.items.get(id).await?.into()))
}

pub async fn update_item(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
    Payload(req): Payload<UpdateSellerItemRequest>,
) -> ApiResult<SellerItemDto> {
    Ok(Json(services.items.update(id, req.into()).await?.into()))
}

pub async fn set_item_status(
    Extension(services): Extension<Services>,
    Path(status): Path<String>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<SellerItemDto> {
    let status = lifecycle_segment(&status)?;
    Ok(Json(services.items.set_status(req.id, status).await?.into()))
}

pub async fn delete_items(
    Extension(services): Extension<Services>,
    Payload(req): Payload<DeleteManyRequest>,
) -> ApiResult<DeletedDto> {
    deleted_json(services.items.delete_many(&req.ids).await)
}

pub async fn filter_items(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<SellerItemDto>> {
    list_json(services.items.filter(&query.search).await?)
}

/// `actions/filter/{field}` with field one of brand-model, model-number,
/// product-title, category-title, seller-organisation
pub async fn filter_items_by(
    Extension(services): Extension<Services>,
    Path(field): Path<String>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<SellerItemDto>> {
    let field = SellerItemSearchField::from_segment(&field)
        .ok_or_else(|| Problem::bad_request(format!("unknown search field '{}'", field)))?;
    list_json(services.items.filter_by(field, &query.search).await?)
}

pub async fn paginate_items(
    Extension(services): Extension<Services>,
    Extension(settings): Settings,
    ValidQuery(query): ValidQuery<PaginateQuery>,
) -> ApiResult<PageDto<SellerItemDto>> {
    let request = to_page_request(&settings, query)?;
    page_json(services.items.paginate(&request).await?)
}

pub async fn item_categories(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<SubCategoryDto>> {
    list_json(services.links.sub_categories_of_item(id).await?)
}

pub async fn link_item_category(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(id): Path<Uuid>,
    Payload(req): Payload<SubCategoryLinkRequest>,
) -> Result<StatusCode, Problem> {
    services
        .links
        .link(
            LinkKind::SellerItemInSubCategory,
            id,
            req.sub_category_id,
            acting_user,
        )
        .await?;
    Ok(StatusCode::CREATED)
}

pub async fn unlink_item_category(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
    Payload(req): Payload<SubCategoryLinkRequest>,
) -> ApiResult<UnlinkDto> {
    let removed = services
        .links
        .unlink(LinkKind::SellerItemInSubCategory, id, req.sub_category_id)
        .await?;
    Ok(Json(UnlinkDto { removed }))
}

/// Replace every sub-category link of the item
pub async fn set_item_categories(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(id): Path<Uuid>,
    Payload(req): Payload<SubCategoryIdsRequest>,
) -> ApiResult<Vec<SubCategoryDto>> {
    services
        .links
        .set_links(
            LinkKind::SellerItemInSubCategory,
            id,
            &req.sub_category_ids,
            acting_user,
        )
        .await?;
    list_json(services.links.sub_categories_of_item(id).await?)
}
