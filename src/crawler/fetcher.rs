//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client with bounded timeouts
//! - Single GET requests with no retries
//! - Classifying failures into request, network and body errors

use crate::config::FetcherConfig;
use crate::page::{Page, PageMetadata};
use crate::FetchError;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Default overall request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2500;

/// Default connection-establishment timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 3000;

/// Builds an HTTP client with the configured timeouts
///
/// The request timeout covers the whole exchange including connecting, so with
/// the defaults (2500 ms request, 3000 ms connect) the request timeout is the
/// one that fires first on a slow connection. The defaults keep that
/// relationship; a warning is logged whenever it is in effect.
///
/// No default headers are set and redirects follow the client's default policy.
///
/// # Example
///
/// ```no_run
/// use page_fetch::config::FetcherConfig;
/// use page_fetch::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, FetchError> {
    if config.request_timeout_ms < config.connect_timeout_ms {
        tracing::warn!(
            "Request timeout ({}ms) is shorter than connect timeout ({}ms); slow connects will hit the request timeout first",
            config.request_timeout_ms,
            config.connect_timeout_ms
        );
    }

    Client::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(FetchError::Client)
}

/// Fetches a URL and returns the page with its fetch time recorded
///
/// # Request Flow
///
/// 1. Build a GET request; a malformed URL fails here → `FetchError::Request`
/// 2. Send it; connect, DNS and timeout failures → `FetchError::Network`
/// 3. Record the current UTC time as the fetch time
/// 4. Drain the body; a read failure → `FetchError::Body`
///
/// The HTTP status is not inspected: an error page is still a page.
/// Link and image counts are left at zero for the caller to extract.
pub async fn fetch_page(client: &Client, url: &str) -> Result<Page, FetchError> {
    let request = client
        .get(url)
        .build()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .execute(request)
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    // Approximate completion time: headers are in, body not yet drained
    let fetched_at = Utc::now();

    tracing::debug!(
        "Received {} from {} ({})",
        response.status(),
        url,
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("no content-type")
    );

    let body = response.bytes().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;

    Ok(Page::new(body.to_vec(), PageMetadata::new(url, fetched_at)))
}
