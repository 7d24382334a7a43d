//! HTTP request handlers - thin layer that delegates to domain services
//!
//! Every handler resolves its inputs through the extractors in
//! [`super::extract`], calls exactly one service operation and maps the
//! result to a DTO. Domain errors convert into [`Problem`] through `?`.

pub mod access;
pub mod catalog;
pub mod categories;
pub mod comments;
pub mod labels;
pub mod links;
pub mod organisations;
pub mod tickets;
pub mod uoms;

use super::dto::{DeletedDto, PageDto, PaginateQuery};
use super::error::Problem;
use super::extract::RestSettings;
use super::mapper::page_request;
use crate::contract::{MarketplaceError, Page, PageRequest};
use axum::Json;
use std::sync::Arc;

pub type ApiResult<T> = Result<Json<T>, Problem>;

pub(crate) fn to_page_request(
    settings: &RestSettings,
    query: PaginateQuery,
) -> Result<PageRequest, Problem> {
    page_request(query, settings.default_page_size)
}

pub(crate) fn page_json<T, M>(page: Page<M>) -> ApiResult<PageDto<T>>
where
    T: From<M>,
{
    Ok(Json(PageDto::from_page(page)))
}

pub(crate) fn list_json<T, M>(items: Vec<M>) -> ApiResult<Vec<T>>
where
    T: From<M>,
{
    Ok(Json(items.into_iter().map(T::from).collect()))
}

pub(crate) fn deleted_json(result: Result<u64, MarketplaceError>) -> ApiResult<DeletedDto> {
    Ok(Json(DeletedDto { deleted: result? }))
}

/// Settings handle as stored in the router extensions
pub(crate) type Settings = axum::Extension<Arc<RestSettings>>;
