//! Comment threads on ticket bodies, line items and seller organisations
//!
//! The three threads share one set of handlers; the router picks the
//! target kind through the `K` type parameter.

use super::{list_json, ApiResult};
use crate::api::rest::dto::*;
use crate::api::rest::error::Problem;
use crate::api::rest::extract::{ActingUser, Payload};
use crate::contract::CommentTarget;
use crate::domain::Services;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

/// Record kind a comment thread hangs off
pub trait TargetKind: Send + Sync + 'static {
    fn target(id: Uuid) -> CommentTarget;
}

pub struct OnTicketBody;
pub struct OnLineItem;
pub struct OnSellerOrganisation;

impl TargetKind for OnTicketBody {
    fn target(id: Uuid) -> CommentTarget {
        CommentTarget::TicketBody(id)
    }
}

impl TargetKind for OnLineItem {
    fn target(id: Uuid) -> CommentTarget {
        CommentTarget::LineItem(id)
    }
}

impl TargetKind for OnSellerOrganisation {
    fn target(id: Uuid) -> CommentTarget {
        CommentTarget::SellerOrganisation(id)
    }
}

pub async fn list<K: TargetKind>(
    Extension(services): Extension<Services>,
    Path(target_id): Path<Uuid>,
) -> ApiResult<Vec<CommentDto>> {
    list_json(services.comments.list_for_target(K::target(target_id)).await?)
}

pub async fn create<K: TargetKind>(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(target_id): Path<Uuid>,
    Payload(req): Payload<CommentRequest>,
) -> ApiResult<CommentDto> {
    let comment = services
        .comments
        .create(K::target(target_id), &req.message, acting_user)
        .await?;
    Ok(Json(comment.into()))
}

pub async fn get<K: TargetKind>(
    Extension(services): Extension<Services>,
    Path((target_id, comment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<CommentDto> {
    let comment = services
        .comments
        .get(K::target(target_id), comment_id)
        .await?;
    Ok(Json(comment.into()))
}

/// Answers `null` when a blank message removed a seller comment
pub async fn update<K: TargetKind>(
    Extension(services): Extension<Services>,
    _user: ActingUser,
    Path((target_id, comment_id)): Path<(Uuid, Uuid)>,
    Payload(req): Payload<CommentRequest>,
) -> ApiResult<Option<CommentDto>> {
    let comment = services
        .comments
        .update(K::target(target_id), comment_id, &req.message)
        .await?;
    Ok(Json(comment.map(Into::into)))
}

pub async fn delete<K: TargetKind>(
    Extension(services): Extension<Services>,
    _user: ActingUser,
    Path((target_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    services
        .comments
        .delete(K::target(target_id), comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
