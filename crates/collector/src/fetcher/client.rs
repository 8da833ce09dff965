//! HTTP/1 fetcher built on the hyper client, over plain TCP or rustls.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{ACCEPT, USER_AGENT};
use http_body_util::{BodyExt, Empty};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use super::Fetcher;
use crate::error::FetchError;

const AGENT: &str = concat!("springxd-exporter/", env!("CARGO_PKG_VERSION"));

/// Fetches documents over HTTP or HTTPS with a pooled hyper client.
///
/// HTTPS servers are verified against the bundled webpki roots. There is
/// no timeout unless one is set with [`HttpFetcher::with_timeout`],
/// so a remote that never answers holds the scrape open. No retries.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Creates a fetcher with no request timeout.
    ///
    /// Fails only if the ring crypto provider rejects the default TLS
    /// protocol versions.
    pub fn new() -> Result<Self, FetchError> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())
            .map_err(FetchError::Tls)?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
            timeout: None,
        })
    }

    /// Bounds each request, including the body read, by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get(&self, url: &str) -> Result<Bytes, FetchError> {
        let uri: http::Uri = url.parse().map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let req = http::Request::get(uri)
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|source| FetchError::Build {
                url: url.to_string(),
                source,
            })?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })?
            .to_bytes();

        debug!(%url, %status, bytes = body.len(), "fetched document");
        Ok(body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.get(url))
                .await
                .map_err(|_| FetchError::Timeout {
                    url: url.to_string(),
                    timeout,
                })?,
            None => self.get(url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch("http://bad host/").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_request_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch(&format!("http://{addr}/management/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn https_url_starts_tls_handshake() {
        // Reports the first byte the client sends; 0x16 is a TLS handshake record.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            use tokio::io::AsyncReadExt;

            let (mut stream, _) = listener.accept().await.unwrap();
            let mut first = [0u8; 1];
            stream.read_exact(&mut first).await.unwrap();
            let _ = tx.send(first[0]);
        });

        let fetcher = HttpFetcher::new()
            .unwrap()
            .with_timeout(Some(Duration::from_millis(500)));
        let _ = fetcher
            .fetch(&format!("https://{addr}/management/health"))
            .await;

        assert_eq!(rx.await.unwrap(), 0x16);
    }

    #[tokio::test]
    async fn uppercase_scheme_is_accepted() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::new()
            .unwrap()
            .fetch(&format!("HTTP://{addr}/management/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }

    #[tokio::test]
    async fn timeout_applies_to_silent_server() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let fetcher = HttpFetcher::new().unwrap().with_timeout(Some(Duration::from_millis(100)));
        let err = fetcher
            .fetch(&format!("http://{addr}/management/metrics"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
