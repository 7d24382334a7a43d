//! Request extractors shared by every handler

use super::error::Problem;
use crate::config::Config;
use crate::contract::MarketplaceError;
use crate::domain::Services;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, HeaderName},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// Header names and limits the HTTP layer needs at request time
#[derive(Debug, Clone)]
pub struct RestSettings {
    pub csrf_header: HeaderName,
    pub csrf_token: String,
    pub user_header: HeaderName,
    pub default_page_size: u64,
}

impl RestSettings {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            csrf_header: HeaderName::try_from(config.csrf_header.as_str())?,
            csrf_token: config.csrf_token.clone(),
            user_header: HeaderName::try_from(config.user_header.as_str())?,
            default_page_size: config.default_page_size,
        })
    }
}

fn settings(parts: &Parts) -> Result<&Arc<RestSettings>, Problem> {
    parts.extensions.get::<Arc<RestSettings>>().ok_or_else(|| {
        tracing::error!("REST settings extension missing");
        Problem::from(MarketplaceError::Internal)
    })
}

/// Id of the user on whose behalf the request runs
///
/// Taken from the configured user header; the user must exist.
#[derive(Debug, Clone, Copy)]
pub struct ActingUser(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = settings(parts)?.user_header.clone();
        let raw = parts
            .headers
            .get(&header)
            .ok_or_else(|| Problem::unauthorized(format!("missing '{}' header", header)))?;
        let user_id = raw
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| Problem::unauthorized(format!("malformed '{}' header", header)))?;

        let services = parts.extensions.get::<Services>().ok_or_else(|| {
            tracing::error!("services extension missing");
            Problem::from(MarketplaceError::Internal)
        })?;
        match services.access.get_user(user_id).await {
            Ok(_) => Ok(ActingUser(user_id)),
            Err(MarketplaceError::NotFound { .. }) => {
                tracing::warn!(%user_id, "request from unknown user");
                Err(Problem::unauthorized("unknown acting user"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// JSON body whose rejection renders as a 400 Problem
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(Problem::bad_request(rejection.body_text())),
        }
    }
}

/// Query string whose rejection renders as a 400 Problem
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ValidQuery(value)),
            Err(rejection) => Err(Problem::bad_request(rejection.body_text())),
        }
    }
}
