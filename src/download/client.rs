//! HTTP client wrapper for fetching a single resource.
//!
//! This module provides the `HttpClient` struct which owns the configured
//! reqwest client (timeouts, redirect policy, User-Agent) and turns transport
//! failures and non-success statuses into [`TransferError`]s.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, MAX_REDIRECTS, READ_TIMEOUT_SECS};
use super::error::TransferError;
use crate::user_agent;

/// HTTP client used by the transfer worker.
///
/// Cheap to clone; clones share one connection pool.
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
    /// Creates a client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes between body reads
    /// - Redirects: up to 10 hops
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a client with explicit timeout values in seconds.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be initialized.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET for `url` and returns the response once headers arrived.
    ///
    /// Redirects are followed transparently; the body is left unread.
    ///
    /// # Errors
    ///
    /// - [`TransferError::InvalidUrl`] if `url` is not an absolute http(s) URL
    /// - [`TransferError::Network`] / [`TransferError::Timeout`] on transport failures
    /// - [`TransferError::HttpStatus`] if the final response is not 2xx
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, TransferError> {
        let parsed = parse_http_url(url)?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| TransferError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::http_status(url, status.as_u16()));
        }

        debug!(
            status = status.as_u16(),
            final_url = %response.url(),
            content_length = ?response.content_length(),
            "response headers received"
        );
        Ok(response)
    }
}

/// Parses `url`, accepting only `http` and `https`.
pub(crate) fn parse_http_url(url: &str) -> Result<Url, TransferError> {
    let parsed = Url::parse(url).map_err(|_| TransferError::invalid_url(url))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(TransferError::invalid_url(url)),
    }
}
