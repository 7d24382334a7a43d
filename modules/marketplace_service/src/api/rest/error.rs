//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::MarketplaceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized").with_detail(detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<MarketplaceError> for Problem {
    fn from(error: MarketplaceError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: MarketplaceError) -> Problem {
    match error {
        MarketplaceError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        MarketplaceError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        MarketplaceError::Forbidden { action } => Problem::forbidden(format!(
            "acting user lacks the '{}' permission",
            action
        )),

        MarketplaceError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        MarketplaceError::PreconditionFailed { reason } => {
            Problem::new(StatusCode::PRECONDITION_FAILED, "Precondition Failed")
                .with_detail(reason)
        }

        MarketplaceError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_distinct_statuses() {
        let cases = [
            (MarketplaceError::not_found("ticket_body", "x"), 404),
            (MarketplaceError::conflict("dup"), 409),
            (
                MarketplaceError::Forbidden {
                    action: "ticket:void".to_string(),
                },
                403,
            ),
            (MarketplaceError::validation("bad"), 400),
            (MarketplaceError::precondition("not claimed"), 412),
            (MarketplaceError::Internal, 500),
        ];
        for (error, status) in cases {
            assert_eq!(map_domain_error(error).status, status);
        }
    }

    #[test]
    fn test_internal_error_hides_details() {
        let problem = map_domain_error(MarketplaceError::Internal);
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
    }

    #[test]
    fn test_problem_builder_serializes_optional_fields() {
        let bare = serde_json::to_value(Problem::new(StatusCode::NOT_FOUND, "Not Found")).unwrap();
        assert_eq!(
            bare,
            serde_json::json!({
                "type": "https://httpstatuses.io/404",
                "title": "Not Found",
                "status": 404
            })
        );

        let full = serde_json::to_value(
            Problem::bad_request("pagesize must be positive")
                .with_instance("/api/v1/seller-organisations/paginate"),
        )
        .unwrap();
        assert_eq!(full["detail"], "pagesize must be positive");
        assert_eq!(full["instance"], "/api/v1/seller-organisations/paginate");
        assert_eq!(full["status"], 400);
    }
}
