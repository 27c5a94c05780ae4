//! Source fetching and the batch coordinator.

use anyhow::{anyhow, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use reqwest::header;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

use super::client::{create_http_client, FEED_ACCEPT, FEED_USER_AGENT};
use super::parser::parse_feed;
use super::types::{BatchSummary, ParsedEntries};
use super::util::is_valid_url;
use crate::config::Config;
use crate::db::{Database, StorageUnavailableExt};
use crate::feeds::{FeedSource, FEED_SOURCES};
use crate::{TARGET_DB, TARGET_WEB_REQUEST};

/// How many sources fetch concurrently within one batch. Sources share no
/// mutable state except the append-only insert path, so fan-out is safe.
const FETCH_CONCURRENCY: usize = 8;

/// Fetch and parse one feed source.
///
/// One attempt only: a timeout or connection failure is reported the same
/// way as a parse failure, and the next scheduled batch is the retry
/// mechanism.
pub async fn fetch_source(
    client: &reqwest::Client,
    source: &FeedSource,
    config: &Config,
) -> Result<ParsedEntries> {
    if !is_valid_url(source.url) {
        return Err(anyhow!("invalid feed url: {}", source.url));
    }

    debug!(target: TARGET_WEB_REQUEST, "Loading feed from {}", source.url);

    let response = client
        .get(source.url)
        .header(header::USER_AGENT, FEED_USER_AGENT)
        .header(header::ACCEPT, FEED_ACCEPT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "non-success status {} from {}",
            response.status(),
            source.url
        ));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.text().await?;

    parse_feed(&body, content_type.as_deref(), source, config)
}

/// Run one ingestion batch over the configured sources.
pub async fn run_batch(db: &Database, config: &Config) -> Result<BatchSummary> {
    run_batch_with(db, config, FEED_SOURCES).await
}

/// Run one ingestion batch over an explicit source list.
///
/// Failure isolation is per source and per article: an unreachable feed or
/// a rejected row is logged and counted, never allowed to abort the rest
/// of the batch. Only an unreachable store ends the batch early. Upserts
/// key on the link uniqueness constraint, so overlapping batches (manual
/// trigger racing the scheduled one) are safe without locking, and a rerun
/// against unchanged feeds inserts nothing.
pub async fn run_batch_with(
    db: &Database,
    config: &Config,
    sources: &[FeedSource],
) -> Result<BatchSummary> {
    info!(target: TARGET_WEB_REQUEST, "Starting feed batch over {} sources", sources.len());

    let client = create_http_client()?;
    let mut summary = BatchSummary::default();

    let results = stream::iter(sources.iter())
        .map(|source| {
            let client = client.clone();
            let config = config.clone();
            async move { (source, fetch_source(&client, source, &config).await) }
        })
        .buffer_unordered(FETCH_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

    for (source, result) in results {
        let parsed = match result {
            Ok(parsed) => parsed,
            Err(err) => {
                summary.failed_sources += 1;
                error!(target: TARGET_WEB_REQUEST, "Failed to fetch {} ({}): {}", source.source, source.url, err);
                continue;
            }
        };

        summary.malformed_entries += parsed.malformed;

        let mut new_from_source = 0;
        for article in parsed.articles {
            let fetched_date = Utc::now().to_rfc3339();

            match db
                .insert_article_if_absent(
                    &article.link,
                    &article.title,
                    &article.description,
                    &article.source,
                    &article.category,
                    article.published_date.as_deref(),
                    &fetched_date,
                    article.location.as_ref(),
                )
                .await
            {
                Ok(true) => {
                    summary.new_articles += 1;
                    new_from_source += 1;
                }
                Ok(false) => summary.duplicates += 1,
                Err(err) if err.is_storage_unavailable() => {
                    error!(target: TARGET_DB, "Storage unavailable, aborting batch: {}", err);
                    return Err(err.into());
                }
                Err(err) => {
                    warn!(target: TARGET_DB, "Failed to store article {}: {}", article.link, err);
                }
            }
        }

        if new_from_source > 0 {
            info!(target: TARGET_WEB_REQUEST, "Processed feed: {} - {} new articles added", source.url, new_from_source);
        } else {
            debug!(target: TARGET_WEB_REQUEST, "Processed feed: {} - no new articles added", source.url);
        }
    }

    info!(target: TARGET_WEB_REQUEST, "Feed batch complete: {}", summary);
    Ok(summary)
}

/// Fetch all configured feeds on the configured interval, forever.
///
/// A failed batch (including an unreachable store) is logged and retried
/// at the next tick rather than tearing the loop down.
pub async fn ingest_loop(db: &Database, config: &Config) {
    loop {
        if let Err(err) = run_batch(db, config).await {
            error!(target: TARGET_WEB_REQUEST, "Feed batch failed: {}", err);
        }

        debug!(
            target: TARGET_WEB_REQUEST,
            "Sleeping {} minutes before next fetch", config.refresh_interval_minutes
        );
        sleep(Duration::from_secs(config.refresh_interval_minutes * 60)).await;
    }
}
