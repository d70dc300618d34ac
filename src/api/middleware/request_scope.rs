//! Builds the per-request context handlers pass down to services

use axum::{
    extract::FromRequestParts,
    http::{Extensions, HeaderMap, HeaderName, request::Parts},
};
use tower_http::request_id::RequestId;

use crate::api::state::AppState;
use crate::domain::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extractor yielding a `RequestContext` carrying the request id and a
/// deadline derived from the configured request timeout
#[derive(Debug, Clone)]
pub struct RequestScope(pub RequestContext);

impl FromRequestParts<AppState> for RequestScope {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = request_id_of(&parts.headers, &parts.extensions);
        Ok(RequestScope(
            RequestContext::new(request_id).with_timeout(state.request_timeout),
        ))
    }
}

/// Request id assigned by `SetRequestIdLayer`, the inbound header, or a fresh one
pub(crate) fn request_id_of(headers: &HeaderMap, extensions: &Extensions) -> String {
    extensions
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .or_else(|| headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()))
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
