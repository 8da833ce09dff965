//! Static copies of the SpringXD management endpoints.
//!
//! Served from a local directory so the exporter can be exercised without
//! a SpringXD server.

use std::path::Path;

use axum::Router;
use common::Source;
use tower_http::services::ServeFile;

pub const HEALTH_FILE: &str = "management_health.json";
pub const METRICS_FILE: &str = "management_metrics.json";
pub const JOBS_FILE: &str = "jobs_executions.json";

/// Routes every default source path to its file under `dir`.
pub fn router(dir: &Path) -> Router {
    tracing::debug!(dir = %dir.display(), "serving fixture documents");

    Router::new()
        .route_service(&Source::health().path, ServeFile::new(dir.join(HEALTH_FILE)))
        .route_service(&Source::metrics().path, ServeFile::new(dir.join(METRICS_FILE)))
        .route_service(
            &Source::job_executions().path,
            ServeFile::new(dir.join(JOBS_FILE)),
        )
}
