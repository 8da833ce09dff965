//! JSON-to-exposition flattening.
//!
//! Walks an arbitrary JSON object and turns every numeric or up/down status
//! leaf into one `<prefix>_<path> <value>` line. Key segments are joined with
//! `_` after [`metric_segment`] sanitizes them.

pub mod error;
pub mod flatten;

pub use error::{FlattenError, Result};
pub use flatten::{collect_samples, flatten, metric_segment, render};
