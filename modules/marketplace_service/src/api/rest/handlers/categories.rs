//! Category taxonomy and its refresh log

use super::{list_json, page_json, to_page_request, ApiResult, Settings};
use crate::api::rest::dto::*;
use crate::api::rest::extract::ValidQuery;
use crate::domain::Services;
use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

/// Pull the taxonomy from the external source and upsert it
pub async fn refresh(Extension(services): Extension<Services>) -> ApiResult<RefreshSummaryDto> {
    let summary = services.categories.refresh_from_source().await?;
    tracing::info!(
        main = summary.main_categories,
        sub = summary.sub_categories,
        "category refresh requested over REST completed"
    );
    Ok(Json(summary.into()))
}

pub async fn last_refresh(
    Extension(services): Extension<Services>,
) -> ApiResult<Option<EventLogDto>> {
    Ok(Json(services.categories.last_refresh().await?.map(Into::into)))
}

pub async fn list_main(
    Extension(services): Extension<Services>,
) -> ApiResult<Vec<MainCategoryDto>> {
    list_json(services.categories.list_main().await?)
}

pub async fn delete_all(Extension(services): Extension<Services>) -> ApiResult<DeletedDto> {
    super::deleted_json(services.categories.delete_all().await)
}

pub async fn get_sub_category(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<SubCategoryDto> {
    Ok(Json(services.categories.get_sub_category(id).await?.into()))
}

pub async fn filter_sub_categories(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<SubCategoryDto>> {
    list_json(services.categories.filter_sub_categories(&query.search).await?)
}

pub async fn paginate_sub_categories(
    Extension(services): Extension<Services>,
    Extension(settings): Settings,
    ValidQuery(query): ValidQuery<PaginateQuery>,
) -> ApiResult<PageDto<SubCategoryDto>> {
    let request = to_page_request(&settings, query)?;
    page_json(services.categories.paginate_sub_categories(&request).await?)
}

pub async fn items_in_sub_category(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<SellerItemDto>> {
    list_json(services.links.items_in_sub_category(id).await?)
}
