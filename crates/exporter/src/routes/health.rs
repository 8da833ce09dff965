//! Liveness endpoint for the exporter itself.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — returns `ok` while the process is serving.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
