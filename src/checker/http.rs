// src/checker/http.rs
// =============================================================================
// This module checks if remote URLs are alive by making HTTP requests.
//
// Key functionality:
// - One GET per distinct URL (callers hand us a set, so no duplicates)
// - A URL is alive when the final status code is below 400
// - Timeouts, DNS/connection failures and malformed URLs count as broken
// - Runs checks concurrently, never more than `concurrency` in flight
//
// A failing probe is a result, not an error: nothing in here aborts the run
// except failing to build the HTTP client in the first place.
// =============================================================================

use crate::error::LinkCheckError;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default number of probes in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 200;

// What happened when we probed a URL
//
// Only `Alive` counts as working; every other variant is reported as broken.
// The variants exist so the logs can say why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// Responded with a status below 400
    Alive(u16),
    /// Responded with 400 or above
    HttpError(u16),
    /// Request timed out
    Timeout,
    /// Could not resolve the host or connect to it
    Unreachable,
    /// The URL could not be parsed
    InvalidUrl,
    /// Any other request failure
    Error(String),
}

// The verdict for a single URL
#[derive(Debug, Clone)]
pub struct LinkCheckResult {
    pub url: String,
    pub status: LinkStatus,
}

impl LinkCheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Alive(_))
    }
}

// Probes every address and returns the ones that are broken
//
// Parameters:
//   addresses: distinct normalized URLs
//   concurrency: max simultaneous requests (0 is treated as 1)
//   timeout: per-request timeout
pub async fn probe_all(
    addresses: &BTreeSet<String>,
    concurrency: usize,
    timeout: Duration,
) -> Result<BTreeSet<String>, LinkCheckError> {
    let results = check_links(addresses.iter().cloned(), concurrency, timeout).await?;

    let broken: BTreeSet<String> = results
        .into_iter()
        .filter(|result| !result.is_ok())
        .map(|result| result.url)
        .collect();

    info!(
        checked = addresses.len(),
        broken = broken.len(),
        "remote links probed"
    );
    Ok(broken)
}

// Checks many URLs concurrently, one result per input URL
//
// The client is built once and cloned into every probe (a clone shares the
// same connection pool). buffer_unordered only pulls the next URL when a
// slot frees up, so in-flight requests never exceed `concurrency`.
pub async fn check_links<I>(
    urls: I,
    concurrency: usize,
    timeout: Duration,
) -> Result<Vec<LinkCheckResult>, LinkCheckError>
where
    I: IntoIterator<Item = String>,
{
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let futures = urls.into_iter().map(|url| {
        let client = client.clone();
        async move { check_single_link(&client, url).await }
    });

    Ok(stream::iter(futures)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await)
}

// Checks a single link and categorizes the outcome
async fn check_single_link(client: &Client, url: String) -> LinkCheckResult {
    // Nothing to fetch; treat as fine
    if url.is_empty() {
        return LinkCheckResult {
            url,
            status: LinkStatus::Alive(0),
        };
    }

    let status = match Url::parse(&url) {
        Ok(parsed) => match client.get(parsed).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                if code < 400 {
                    LinkStatus::Alive(code)
                } else {
                    LinkStatus::HttpError(code)
                }
            }
            Err(e) => categorize_error(e),
        },
        Err(_) => LinkStatus::InvalidUrl,
    };

    debug!(url = %url, status = ?status, "probed");
    LinkCheckResult { url, status }
}

// Maps a reqwest error onto a LinkStatus
fn categorize_error(error: reqwest::Error) -> LinkStatus {
    if error.is_timeout() {
        LinkStatus::Timeout
    } else if error.is_connect() {
        LinkStatus::Unreachable
    } else if error.is_builder() {
        LinkStatus::InvalidUrl
    } else {
        LinkStatus::Error(error.to_string())
    }
}
