//! Shared types for the SpringXD exporter.
//!
//! - [`ComponentStatus`]: tri-state parser for `Up`/`Down` status strings
//! - [`Sample`]: one line of exposition text
//! - [`Source`]: a remote management endpoint and how its payload is used

pub mod sample;
pub mod source;
pub mod status;

pub use sample::{Sample, SampleValue};
pub use source::{DEFAULT_NAMESPACE, Source, SourceKind, default_sources};
pub use status::ComponentStatus;
