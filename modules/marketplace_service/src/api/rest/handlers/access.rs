//! Users, roles and the permission catalog

use super::{deleted_json, list_json, ApiResult};
use crate::api::rest::dto::*;
use crate::api::rest::error::Problem;
use crate::api::rest::extract::{ActingUser, Payload, ValidQuery};
use crate::domain::Services;
use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UserLookupQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PermissionLookupQuery {
    pub value: String,
}

/// Register a user; callable without an acting user so the first account can
/// be bootstrapped
pub async fn create_user(
    Extension(services): Extension<Services>,
    Payload(req): Payload<CreateUserRequest>,
) -> ApiResult<UserDto> {
    let user = services.access.create_user(&req.name, &req.email).await?;
    Ok(Json(user.into()))
}

pub async fn get_user(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<UserDto> {
    Ok(Json(services.access.get_user(id).await?.into()))
}

pub async fn find_user_by_email(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<UserLookupQuery>,
) -> ApiResult<UserDto> {
    Ok(Json(services.access.get_user_by_email(&query.email).await?.into()))
}

pub async fn delete_users(
    Extension(services): Extension<Services>,
    _user: ActingUser,
    Payload(req): Payload<DeleteManyRequest>,
) -> ApiResult<DeletedDto> {
    deleted_json(services.access.delete_users(&req.ids).await)
}

pub async fn create_role(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<CreateRoleRequest>,
) -> ApiResult<UserRoleDto> {
    let role = services.access.create_role(&req.name, acting_user).await?;
    Ok(Json(role.into()))
}

pub async fn set_role_permissions(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(role_id): Path<Uuid>,
    Payload(req): Payload<SetRolePermissionsRequest>,
) -> Result<axum::http::StatusCode, Problem> {
    services
        .access
        .set_role_permissions(role_id, &req.permission_ids, acting_user)
        .await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

pub async fn set_user_roles(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Path(user_id): Path<Uuid>,
    Payload(req): Payload<SetUserRolesRequest>,
) -> Result<axum::http::StatusCode, Problem> {
    services
        .access
        .set_user_roles(user_id, &req.role_ids, acting_user)
        .await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Insert the fixed permission catalog; safe to call repeatedly
pub async fn seed_permissions(
    Extension(services): Extension<Services>,
) -> ApiResult<Vec<PermissionDto>> {
    list_json(services.access.seed_permissions().await?)
}

pub async fn get_permission(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<PermissionLookupQuery>,
) -> ApiResult<PermissionDto> {
    Ok(Json(
        services
            .access
            .get_permission_by_value(&query.value)
            .await?
            .into(),
    ))
}
