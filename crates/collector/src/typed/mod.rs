//! Strongly-typed gauge variant.
//!
//! Instead of flattening arbitrary JSON, known SpringXD fields are
//! deserialized into [`ManagementMetrics`] and written to named gauges in a
//! [`GaugeRegistry`], which renders them in exposition format.

pub mod collector;
pub mod documents;
pub mod registry;

pub use collector::TypedCollector;
pub use documents::{GaugeSpec, HealthDocument, ManagementMetrics};
pub use registry::GaugeRegistry;
