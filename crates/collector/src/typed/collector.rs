//! Scrape cycle for the typed gauge variant.

use std::sync::Arc;
use std::time::Instant;

use common::{ComponentStatus, Source};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::documents::{HealthDocument, ManagementMetrics, SCRAPE_DURATION, UP};
use super::registry::GaugeRegistry;
use crate::fetcher::Fetcher;

/// Populates a [`GaugeRegistry`] from the health and metrics documents.
pub struct TypedCollector<F: Fetcher> {
    fetcher: F,
    base_url: String,
    registry: Arc<GaugeRegistry>,
}

impl<F: Fetcher> TypedCollector<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>, registry: Arc<GaugeRegistry>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            registry,
        }
    }

    /// Refreshes every gauge and renders the registry.
    ///
    /// Gauges whose source fails keep their previous value.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn scrape(&self) -> String {
        let start = Instant::now();

        if let Some(health) = self.fetch_document::<HealthDocument>(&Source::health()).await {
            match ComponentStatus::parse(&health.status).as_sample_value() {
                Some(value) => self.registry.set(&UP, value),
                None => debug!(status = %health.status, "unrecognised health status"),
            }
        }

        if let Some(metrics) = self
            .fetch_document::<ManagementMetrics>(&Source::metrics())
            .await
        {
            for (spec, value) in metrics.readings() {
                self.registry.set(&spec, value);
            }
        }

        self.registry
            .set(&SCRAPE_DURATION, start.elapsed().as_secs_f64());
        self.registry.render()
    }

    async fn fetch_document<T: DeserializeOwned>(&self, source: &Source) -> Option<T> {
        let url = source.url(&self.base_url);

        let raw = match self.fetcher.fetch(&url).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source = %source.name, error = %e, "error retrieving source");
                self.registry.record_error(&source.name);
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(source = %source.name, %url, error = %e, "document does not match schema");
                self.registry.record_error(&source.name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::InMemoryFetcher;

    const BASE: &str = "http://xd:9393";

    fn collector(fetcher: InMemoryFetcher) -> TypedCollector<InMemoryFetcher> {
        TypedCollector::new(fetcher, BASE, Arc::new(GaugeRegistry::new()))
    }

    #[tokio::test]
    async fn sets_up_and_metric_gauges() {
        let fetcher = InMemoryFetcher::new()
            .with_body(format!("{BASE}/management/health"), r#"{"status":"UP"}"#)
            .with_body(
                format!("{BASE}/management/metrics"),
                r#"{"mem": 2048, "mem.free": 1024, "gc.g1_old_generation.count": 5}"#,
            );

        let out = collector(fetcher).scrape().await;

        assert!(out.contains("springxd_up 1"));
        assert!(out.contains("springxd_mem_total 2048"));
        assert!(out.contains("springxd_mem_free 1024"));
        assert!(out.contains(r#"springxd_gc_count{gen="g1 old"} 5"#));
        assert!(out.contains("springxd_scrape_duration_seconds "));
    }

    #[tokio::test]
    async fn down_status_sets_zero() {
        let fetcher = InMemoryFetcher::new()
            .with_body(format!("{BASE}/management/health"), r#"{"status":"DOWN"}"#);

        let out = collector(fetcher).scrape().await;
        assert!(out.contains("springxd_up 0"));
    }

    #[tokio::test]
    async fn unknown_status_leaves_gauge_unset() {
        let fetcher = InMemoryFetcher::new()
            .with_body(format!("{BASE}/management/health"), r#"{"status":"OUT_OF_SERVICE"}"#);

        let out = collector(fetcher).scrape().await;
        assert!(!out.lines().any(|l| l.starts_with("springxd_up ")));
    }

    #[tokio::test]
    async fn schema_mismatch_is_counted() {
        let fetcher = InMemoryFetcher::new()
            .with_body(format!("{BASE}/management/health"), r#"{"status":"UP"}"#)
            .with_body(format!("{BASE}/management/metrics"), r#"{"mem":"lots"}"#);

        let out = collector(fetcher).scrape().await;

        assert!(out.contains("springxd_up 1"));
        assert!(!out.lines().any(|l| l.starts_with("springxd_mem_total ")));
        assert!(out.contains(r#"springxd_scrape_errors_total{source="metrics"} 1"#));
    }

    #[tokio::test]
    async fn failed_source_keeps_previous_value() {
        let fetcher = InMemoryFetcher::new()
            .with_body(format!("{BASE}/management/health"), r#"{"status":"UP"}"#);
        let collector = collector(fetcher.clone());
        collector.scrape().await;

        fetcher.set_unreachable(format!("{BASE}/management/health"), "connection refused");
        let out = collector.scrape().await;

        assert!(out.contains("springxd_up 1"));
        assert!(out.contains(r#"springxd_scrape_errors_total{source="health"} 1"#));
    }
}
