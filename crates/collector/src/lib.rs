//! Scrape coordination for SpringXD management endpoints.
//!
//! Two ways to republish the remote documents:
//! - [`ScrapeCoordinator`]: flattens any JSON shape into exposition lines
//! - [`TypedCollector`]: deserializes known fields into a [`GaugeRegistry`]
//!
//! Both fetch through the [`Fetcher`] trait so tests can swap the network
//! for [`InMemoryFetcher`].

pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod typed;

pub use coordinator::ScrapeCoordinator;
pub use error::{FetchError, Result, ScrapeError};
pub use fetcher::{Fetcher, HttpFetcher, InMemoryFetcher, SharedFetcher};
pub use typed::{GaugeRegistry, HealthDocument, ManagementMetrics, TypedCollector};
