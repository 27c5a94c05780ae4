//! HTTP client construction for feed requests.

use anyhow::Result;
use reqwest::cookie::Jar;
use std::sync::Arc;
use tracing::debug;

use super::types::REQUEST_TIMEOUT;
use crate::TARGET_WEB_REQUEST;

pub const FEED_ACCEPT: &str = "application/feed+json, application/json, application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9";
pub const FEED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Create the client used for all feed requests in a batch.
///
/// The request timeout bounds every source fetch so one unresponsive feed
/// cannot stall the batch. Each source gets exactly one attempt per batch;
/// the next scheduled batch is the retry mechanism.
pub fn create_http_client() -> Result<reqwest::Client> {
    let cookie_store = Jar::default();

    debug!(target: TARGET_WEB_REQUEST, "Creating feed HTTP client");

    reqwest::Client::builder()
        .cookie_store(true)
        .cookie_provider(Arc::new(cookie_store))
        .gzip(true)
        .timeout(REQUEST_TIMEOUT)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}
