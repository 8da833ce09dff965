//! Scrape endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::error::ApiError;

/// GET /metrics — runs one scrape of the SpringXD server.
///
/// Flatten mode answers with the default text content type; typed mode
/// answers with the Prometheus 0.0.4 content type.
pub async fn get(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state {
        AppState::Flatten(coordinator) => Ok(coordinator.scrape().await?.into_response()),
        AppState::Typed(collector) => Ok((
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            collector.scrape().await,
        )
            .into_response()),
    }
}
