//! Collector error types.

use std::time::Duration;

use flattener::FlattenError;
use thiserror::Error;

/// Errors raised while retrieving a remote document.
///
/// None of these fail a scrape; the affected source contributes nothing.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: http::uri::InvalidUri,
    },

    /// The request could not be built.
    #[error("Failed to build request for {url}: {source}")]
    Build { url: String, source: http::Error },

    /// Connecting or sending the request failed.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        source: hyper_util::client::legacy::Error,
    },

    /// The remote answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: http::StatusCode,
    },

    /// Reading the response body failed.
    #[error("Failed to read body from {url}: {source}")]
    Body { url: String, source: hyper::Error },

    /// The configured fetch timeout elapsed.
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The TLS client configuration could not be built.
    #[error("TLS setup failed: {0}")]
    Tls(rustls::Error),

    /// The remote could not be reached.
    #[error("{url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },
}

/// Errors that abort a single scrape.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A source's document could not be flattened.
    #[error("Flattening source '{source_name}' failed: {error}")]
    Flatten {
        source_name: String,
        #[source]
        error: FlattenError,
    },
}

/// Result type for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
