//! Remote SpringXD endpoints polled on every scrape.

/// Namespace prepended to every exported metric name.
pub const DEFAULT_NAMESPACE: &str = "springxd";

/// What the scrape does with a fetched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Flatten the document into samples.
    Flatten,
    /// Fetch and parse the document but export nothing from it.
    Discard,
}

/// A remote endpoint relative to the SpringXD base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Name segment inserted after the namespace, e.g. `health`.
    pub name: String,
    /// Path appended to the base URL, e.g. `/management/health`.
    pub path: String,
    pub kind: SourceKind,
}

impl Source {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }

    /// `/management/health`, exported as `<ns>_health_*`.
    pub fn health() -> Self {
        Self::new("health", "/management/health", SourceKind::Flatten)
    }

    /// `/management/metrics`, exported as `<ns>_metrics_*`.
    pub fn metrics() -> Self {
        Self::new("metrics", "/management/metrics", SourceKind::Flatten)
    }

    /// `/jobs/executions`. Fetched but contributes no samples.
    pub fn job_executions() -> Self {
        Self::new("jobs", "/jobs/executions", SourceKind::Discard)
    }

    /// Returns the metric prefix for this source under `namespace`.
    pub fn prefix(&self, namespace: &str) -> String {
        format!("{namespace}_{}", self.name)
    }

    /// Joins this source's path onto `base_url`, tolerating a trailing slash.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Health, metrics, then job executions.
pub fn default_sources() -> Vec<Source> {
    vec![Source::health(), Source::metrics(), Source::job_executions()]
}
