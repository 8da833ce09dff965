//! Typed views of the SpringXD management documents.

use serde::Deserialize;

/// Name, help text, and fixed labels of one exported gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [(&'static str, &'static str)],
}

impl GaugeSpec {
    const fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            labels: &[],
        }
    }

    const fn labelled(
        name: &'static str,
        help: &'static str,
        labels: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { name, help, labels }
    }
}

pub const UP: GaugeSpec = GaugeSpec::new("springxd_up", "SpringXD server status");
pub const MEM_TOTAL: GaugeSpec = GaugeSpec::new("springxd_mem_total", "SpringXD server memory");
pub const MEM_FREE: GaugeSpec = GaugeSpec::new("springxd_mem_free", "SpringXD free server memory");
pub const INSTANCE_UPTIME: GaugeSpec =
    GaugeSpec::new("springxd_instance_uptime", "SpringXD instance uptime");
pub const THREADS_PEAK: GaugeSpec = GaugeSpec::new("springxd_threads_peak", "SpringXD peak threads");
pub const THREADS_DAEMON: GaugeSpec =
    GaugeSpec::new("springxd_threads_daemon", "SpringXD daemon threads");
pub const THREADS_CURRENT: GaugeSpec =
    GaugeSpec::new("springxd_threads_current", "SpringXD current threads");
pub const DATASOURCE_ACTIVE: GaugeSpec =
    GaugeSpec::new("springxd_datasource_active", "SpringXD datasource active connections");
pub const DATASOURCE_USAGE: GaugeSpec =
    GaugeSpec::new("springxd_datasource_usage", "SpringXD datasource usage");
pub const GC_YOUNG_COUNT: GaugeSpec =
    GaugeSpec::labelled("springxd_gc_count", "SpringXD GC count", &[("gen", "g1 young")]);
pub const GC_YOUNG_TIME: GaugeSpec =
    GaugeSpec::labelled("springxd_gc_time", "SpringXD GC time", &[("gen", "g1 young")]);
pub const GC_OLD_COUNT: GaugeSpec =
    GaugeSpec::labelled("springxd_gc_count", "SpringXD GC count", &[("gen", "g1 old")]);
pub const GC_OLD_TIME: GaugeSpec =
    GaugeSpec::labelled("springxd_gc_time", "SpringXD GC time", &[("gen", "g1 old")]);
pub const SCRAPE_DURATION: GaugeSpec = GaugeSpec::new(
    "springxd_scrape_duration_seconds",
    "Time spent scraping SpringXD",
);

/// Every gauge the typed collector may write.
pub const ALL_GAUGES: &[GaugeSpec] = &[
    UP,
    MEM_TOTAL,
    MEM_FREE,
    INSTANCE_UPTIME,
    THREADS_PEAK,
    THREADS_DAEMON,
    THREADS_CURRENT,
    DATASOURCE_ACTIVE,
    DATASOURCE_USAGE,
    GC_YOUNG_COUNT,
    GC_YOUNG_TIME,
    GC_OLD_COUNT,
    GC_OLD_TIME,
    SCRAPE_DURATION,
];

/// `GET /management/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthDocument {
    pub status: String,
}

/// `GET /management/metrics`, restricted to the fields with a gauge.
///
/// Absent fields stay `None`; a field of the wrong type fails the whole
/// document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagementMetrics {
    #[serde(default)]
    pub mem: Option<f64>,
    #[serde(default, rename = "mem.free")]
    pub mem_free: Option<f64>,
    #[serde(default, rename = "instance.uptime")]
    pub instance_uptime: Option<f64>,
    #[serde(default, rename = "threads.peak")]
    pub threads_peak: Option<f64>,
    #[serde(default, rename = "threads.daemon")]
    pub threads_daemon: Option<f64>,
    #[serde(default)]
    pub threads: Option<f64>,
    #[serde(default, rename = "datasource.primary.active")]
    pub datasource_active: Option<f64>,
    #[serde(default, rename = "datasource.primary.usage")]
    pub datasource_usage: Option<f64>,
    #[serde(default, rename = "gc.g1_young_generation.count")]
    pub gc_young_count: Option<f64>,
    #[serde(default, rename = "gc.g1_young_generation.time")]
    pub gc_young_time: Option<f64>,
    #[serde(default, rename = "gc.g1_old_generation.count")]
    pub gc_old_count: Option<f64>,
    #[serde(default, rename = "gc.g1_old_generation.time")]
    pub gc_old_time: Option<f64>,
}

impl ManagementMetrics {
    /// Returns the gauges this document has values for.
    pub fn readings(&self) -> Vec<(GaugeSpec, f64)> {
        [
            (MEM_TOTAL, self.mem),
            (MEM_FREE, self.mem_free),
            (INSTANCE_UPTIME, self.instance_uptime),
            (THREADS_PEAK, self.threads_peak),
            (THREADS_DAEMON, self.threads_daemon),
            (THREADS_CURRENT, self.threads),
            (DATASOURCE_ACTIVE, self.datasource_active),
            (DATASOURCE_USAGE, self.datasource_usage),
            (GC_YOUNG_COUNT, self.gc_young_count),
            (GC_YOUNG_TIME, self.gc_young_time),
            (GC_OLD_COUNT, self.gc_old_count),
            (GC_OLD_TIME, self.gc_old_time),
        ]
        .into_iter()
        .filter_map(|(spec, value)| value.map(|v| (spec, v)))
        .collect()
    }
}
