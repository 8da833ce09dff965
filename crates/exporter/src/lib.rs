//! Prometheus exporter for SpringXD.
//!
//! Each `GET /metrics` fetches the SpringXD management documents and
//! republishes them as exposition text, either flattened field by field or
//! as a fixed set of typed gauges.

pub mod config;
pub mod error;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use collector::{FetchError, GaugeRegistry, HttpFetcher, ScrapeCoordinator, SharedFetcher, TypedCollector};
use tower_http::trace::TraceLayer;

use crate::config::{Config, Mode};

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub enum AppState {
    Flatten(Arc<ScrapeCoordinator<SharedFetcher>>),
    Typed(Arc<TypedCollector<SharedFetcher>>),
}

impl AppState {
    /// Builds the state for `config.mode` around `fetcher`.
    pub fn new(config: &Config, fetcher: SharedFetcher) -> Self {
        match config.mode {
            Mode::Flatten => AppState::Flatten(Arc::new(
                ScrapeCoordinator::new(fetcher, config.springxd_url.clone())
                    .with_namespace(config.namespace.clone()),
            )),
            Mode::Typed => AppState::Typed(Arc::new(TypedCollector::new(
                fetcher,
                config.springxd_url.clone(),
                Arc::new(GaugeRegistry::new()),
            ))),
        }
    }
}

/// Creates the default state, fetching over HTTP or HTTPS.
pub fn create_default_state(config: &Config) -> Result<AppState, FetchError> {
    let fetcher = HttpFetcher::new()?.with_timeout(config.fetch_timeout);
    Ok(AppState::new(config, Arc::new(fetcher)))
}

/// Creates the Axum application router, with fixture routes when `fixtures_dir` is set.
pub fn create_app(state: AppState, fixtures_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .route("/health", get(routes::health::check))
        .with_state(state);

    if let Some(dir) = fixtures_dir {
        app = app.merge(routes::fixtures::router(dir));
    }

    app.layer(TraceLayer::new_for_http())
}
