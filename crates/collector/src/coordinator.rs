//! Generic scrape-and-flatten cycle.

use std::fmt::Write;
use std::time::Instant;

use common::{DEFAULT_NAMESPACE, Source, SourceKind, default_sources};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, ScrapeError};
use crate::fetcher::Fetcher;

/// Fetches every configured source and flattens it into exposition text.
///
/// Sources are fetched one after another in configuration order. A source
/// that cannot be fetched contributes nothing; the scrape still completes.
/// Each call is independent, so concurrent scrapes share no state beyond
/// the fetcher.
pub struct ScrapeCoordinator<F: Fetcher> {
    fetcher: F,
    base_url: String,
    namespace: String,
    sources: Vec<Source>,
}

impl<F: Fetcher> ScrapeCoordinator<F> {
    /// Creates a coordinator for the default SpringXD sources under `springxd`.
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            sources: default_sources(),
        }
    }

    /// Overrides the metric namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Overrides the source list.
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    /// Runs one scrape and returns the exposition body.
    ///
    /// The body ends with `<namespace>_scrape_duration_seconds`. Fails only
    /// when a fetched document is not a JSON object.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn scrape(&self) -> Result<String> {
        let start = Instant::now();
        let mut body = String::new();

        for source in &self.sources {
            body.push_str(&self.collect(source).await?);
        }

        let elapsed = start.elapsed().as_secs_f64();
        let _ = writeln!(
            body,
            "{}_scrape_duration_seconds {elapsed:.6}",
            self.namespace
        );
        Ok(body)
    }

    async fn collect(&self, source: &Source) -> Result<String> {
        let url = source.url(&self.base_url);

        let raw = match self.fetcher.fetch(&url).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source = %source.name, error = %e, "error retrieving source");
                return Ok(String::new());
            }
        };

        // A malformed body still reaches the flattener, which rejects it.
        let document = serde_json::from_slice::<Value>(&raw).unwrap_or_else(|e| {
            warn!(source = %source.name, %url, error = %e, "malformed JSON document");
            Value::Null
        });

        match source.kind {
            SourceKind::Discard => {
                info!(source = %source.name, "retrieved document, nothing exported");
                Ok(String::new())
            }
            SourceKind::Flatten => flattener::flatten(&source.prefix(&self.namespace), &document)
                .map_err(|error| ScrapeError::Flatten {
                    source_name: source.name.clone(),
                    error,
                }),
        }
    }
}
