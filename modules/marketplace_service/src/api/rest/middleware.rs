//! CSRF guard for state-changing requests

use super::error::Problem;
use super::extract::RestSettings;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Reject mutating requests whose CSRF header is missing or wrong
pub async fn csrf_guard(
    State(settings): State<Arc<RestSettings>>,
    request: Request,
    next: Next,
) -> Response {
    if !is_mutating(request.method()) {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(&settings.csrf_header)
        .and_then(|v| v.to_str().ok());

    if presented == Some(settings.csrf_token.as_str()) {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "rejected request without a valid CSRF token"
    );
    Problem::forbidden("missing or invalid CSRF token")
        .with_instance(request.uri().path().to_string())
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_state_changing_methods_are_guarded() {
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::PUT));
        assert!(is_mutating(&Method::DELETE));
        assert!(!is_mutating(&Method::GET));
        assert!(!is_mutating(&Method::HEAD));
    }
}
