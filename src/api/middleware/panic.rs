//! Panic recovery for `CatchPanicLayer`

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::api::types::ApiError;

/// Turn a handler panic into `500 INTERNAL_ERROR` and log the payload
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Handler panicked");

    ApiError::internal().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_panic_becomes_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
