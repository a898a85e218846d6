//! Origin allow-list.
//!
//! [`guard`] rejects requests whose `Origin` is not allow-listed before they
//! reach routing. Requests without an `Origin` header pass. [`layer`] adds
//! the CORS response headers and answers preflights for allowed origins.

use axum::extract::{Request, State};
use axum::http::header::{CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::GatewayError;
use crate::state::AppState;

/// Middleware rejecting disallowed origins with 403.
pub async fn guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !is_allowed(&state.allowed_origins, origin) {
            return GatewayError::OriginNotAllowed.into_response();
        }
    }

    next.run(request).await
}

/// Exact match against the allow-list.
pub fn is_allowed(allowed: &[String], origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| allowed.iter().any(|candidate| candidate == origin))
        .unwrap_or(false)
}

/// CORS headers for allowed origins.
pub fn layer(allowed: &[String]) -> CorsLayer {
    let origins = allowed
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok());

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
