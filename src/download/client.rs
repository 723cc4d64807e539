//! HTTP client wrapper for repository requests.
//!
//! This module provides the `HttpClient` struct which issues GET requests
//! with proper timeout configuration and error mapping. Status handling is
//! left to callers because the same non-200 response maps to different
//! error kinds depending on what is being fetched (checksum vs. content).

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use tracing::debug;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::FetchError;

/// User-Agent identifying the tool. Maven Central rejects requests
/// without a User-Agent header.
fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("artifetch/{version}")
}

/// HTTP client for repository requests with streaming support.
///
/// This client is designed to be created once and reused for the whole
/// dependency traversal, taking advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large artifacts)
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Issues a GET request, mapping transport failures to [`FetchError`].
    ///
    /// The response is returned regardless of status code; callers decide
    /// how a non-success status is classified.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] or [`FetchError::Network`] if the
    /// request does not produce a response.
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!(url = %url, "GET");
        self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })
    }

    /// Returns a reference to the underlying reqwest client.
    ///
    /// This can be used for advanced operations not covered by this wrapper.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
