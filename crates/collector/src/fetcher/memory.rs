//! In-memory fetcher for tests and demos.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;

use super::Fetcher;
use crate::error::FetchError;

#[derive(Debug, Default)]
struct InMemoryFetcherState {
    bodies: HashMap<String, Bytes>,
    unreachable: HashMap<String, String>,
    requests: Vec<String>,
}

/// Serves canned bodies keyed by URL.
///
/// URLs without a body, or marked unreachable, fail with
/// [`FetchError::Unreachable`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    state: Arc<RwLock<InMemoryFetcherState>>,
}

impl InMemoryFetcher {
    /// Creates an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `url`.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<Bytes>) {
        let url = url.into();
        let mut state = self.state.write().unwrap();
        state.unreachable.remove(&url);
        state.bodies.insert(url, body.into());
    }

    /// Builder form of [`InMemoryFetcher::insert`].
    pub fn with_body(self, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.insert(url, body);
        self
    }

    /// Makes `url` fail with `reason`.
    pub fn set_unreachable(&self, url: impl Into<String>, reason: impl Into<String>) {
        let url = url.into();
        let mut state = self.state.write().unwrap();
        state.bodies.remove(&url);
        state.unreachable.insert(url, reason.into());
    }

    /// Returns every requested URL in request order.
    pub fn requests(&self) -> Vec<String> {
        self.state.read().unwrap().requests.clone()
    }
}

#[async_trait]
impl Fetcher for InMemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let mut state = self.state.write().unwrap();
        state.requests.push(url.to_string());

        if let Some(reason) = state.unreachable.get(url) {
            return Err(FetchError::Unreachable {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }

        state
            .bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Unreachable {
                url: url.to_string(),
                reason: "no body registered".to_string(),
            })
    }
}
