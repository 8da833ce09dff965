//! Explicit gauge registry backed by a Prometheus recorder.

use metrics::Label;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use super::documents::{ALL_GAUGES, GaugeSpec};

const SCRAPE_ERRORS: &str = "springxd_scrape_errors_total";

/// Owns the gauges written by the typed collector.
///
/// The recorder is never installed globally; every write goes through
/// [`metrics::with_local_recorder`]. Values live in the recorder's atomic
/// storage, so concurrent scrapes may write while another request renders.
/// Interleaved scrapes can leave a mix of values from both; no ordering
/// between them is provided.
pub struct GaugeRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl GaugeRegistry {
    /// Creates a registry with help text for every known gauge.
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let registry = Self { recorder, handle };
        registry.describe();
        registry
    }

    fn describe(&self) {
        metrics::with_local_recorder(&self.recorder, || {
            for spec in ALL_GAUGES {
                metrics::describe_gauge!(spec.name, spec.help);
            }
            metrics::describe_counter!(SCRAPE_ERRORS, "Failed SpringXD document retrievals");
        });
    }

    /// Sets the gauge described by `spec`.
    pub fn set(&self, spec: &GaugeSpec, value: f64) {
        let labels: Vec<Label> = spec
            .labels
            .iter()
            .map(|(k, v)| Label::new(*k, *v))
            .collect();

        metrics::with_local_recorder(&self.recorder, || {
            metrics::gauge!(spec.name, labels).set(value);
        });
    }

    /// Counts a failed retrieval or parse of `source`.
    pub fn record_error(&self, source: &str) {
        let source = source.to_string();
        metrics::with_local_recorder(&self.recorder, || {
            metrics::counter!(SCRAPE_ERRORS, "source" => source).increment(1);
        });
    }

    /// Renders every written series in exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for GaugeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
