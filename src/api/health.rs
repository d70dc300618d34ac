//! Liveness endpoints

use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// `GET /` greeting
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, Json("Service 'team-registry' is online"))
}

/// Returns 200 while the process is serving
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
