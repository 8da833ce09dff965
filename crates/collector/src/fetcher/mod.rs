//! Retrieval of remote management documents.

pub mod client;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::FetchError;

pub use self::client::HttpFetcher;
pub use self::memory::InMemoryFetcher;

/// Trait for fetching the raw body behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a GET for `url` and returns the full response body.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// A fetcher shared between handlers.
pub type SharedFetcher = Arc<dyn Fetcher>;

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        (**self).fetch(url).await
    }
}
