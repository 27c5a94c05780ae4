//! Type definitions for the ingestion module.

use serde::Deserialize;
use std::fmt;
use tokio::time::Duration;

use crate::geo::GeoTag;

/// A normalized feed entry, ready for storage.
#[derive(Clone, Debug)]
pub struct RawArticle {
    pub title: String,
    pub description: String,
    pub link: String,
    pub source: String,
    pub category: String,
    pub published_date: Option<String>,
    pub location: Option<GeoTag>,
}

/// Entries extracted from one feed body, plus the count of entries that
/// had to be skipped for missing a link.
#[derive(Debug, Default)]
pub struct ParsedEntries {
    pub articles: Vec<RawArticle>,
    pub malformed: usize,
}

/// Outcome counters for one ingestion batch. Suppressed failures are
/// counted here so they stay observable without aborting the batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub new_articles: usize,
    pub duplicates: usize,
    pub malformed_entries: usize,
    pub failed_sources: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new, {} duplicate, {} malformed entries, {} sources failed",
            self.new_articles, self.duplicates, self.malformed_entries, self.failed_sources
        )
    }
}

/// JSON Feed structure for parsing
#[derive(Debug, Deserialize)]
pub struct JsonFeed {
    #[serde(default)]
    pub items: Vec<JsonFeedItem>,
}

/// JSON Feed item structure
#[derive(Debug, Deserialize)]
pub struct JsonFeedItem {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content_text: Option<String>,
    pub content_html: Option<String>,
    pub date_published: Option<String>,
}

// Constants
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const NO_TITLE_PLACEHOLDER: &str = "No Title";
