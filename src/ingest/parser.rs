//! Feed parsing: JSON Feed and RSS/Atom bodies into normalized entries.

use anyhow::{anyhow, Result};
use feed_rs::parser;
use std::io::Cursor;
use tracing::{debug, warn};

use super::types::{JsonFeed, ParsedEntries, RawArticle, NO_TITLE_PLACEHOLDER};
use super::util::{cleanup_xml, parse_date, strip_html, truncate_chars};
use crate::config::Config;
use crate::feeds::FeedSource;
use crate::geo;
use crate::TARGET_WEB_REQUEST;

/// Parse a feed body into normalized entries.
///
/// Bodies served with a JSON content type go through the JSON Feed path;
/// everything else is handed to feed-rs, with one salvage reparse against
/// cleaned-up XML when the raw body fails. Only the first
/// `feed_entry_cap` entries of a feed are considered.
pub fn parse_feed(
    text: &str,
    content_type: Option<&str>,
    source: &FeedSource,
    config: &Config,
) -> Result<ParsedEntries> {
    if let Some(ct) = content_type {
        if ct.contains("json") {
            debug!(target: TARGET_WEB_REQUEST, "Processing as JSON feed: {}", source.url);
            return parse_json_feed(text, source, config);
        }
    }

    debug!(target: TARGET_WEB_REQUEST, "Processing as XML feed: {}", source.url);
    match parser::parse(Cursor::new(text)) {
        Ok(feed) => Ok(collect_entries(feed, source, config)),
        Err(first_err) => {
            let cleaned = cleanup_xml(text);

            if cleaned.contains("<rss") || cleaned.contains("<feed") {
                match parser::parse(Cursor::new(cleaned.as_str())) {
                    Ok(feed) => {
                        debug!(target: TARGET_WEB_REQUEST, "Feed from {} parsed after XML cleanup", source.url);
                        Ok(collect_entries(feed, source, config))
                    }
                    Err(second_err) => Err(anyhow!(
                        "failed to parse feed from {} even after cleanup: {}; {}",
                        source.url,
                        first_err,
                        second_err
                    )),
                }
            } else {
                Err(anyhow!(
                    "content from {} is not RSS or Atom: {}",
                    source.url,
                    first_err
                ))
            }
        }
    }
}

fn collect_entries(
    feed: feed_rs::model::Feed,
    source: &FeedSource,
    config: &Config,
) -> ParsedEntries {
    let mut parsed = ParsedEntries::default();

    for entry in feed.entries.into_iter().take(config.feed_entry_cap) {
        match normalize_entry(entry, source, config) {
            Some(article) => parsed.articles.push(article),
            None => {
                parsed.malformed += 1;
                warn!(target: TARGET_WEB_REQUEST, "Feed entry from {} missing link, skipping", source.url);
            }
        }
    }

    parsed
}

/// Normalize one feed entry. Returns `None` when the entry has no link,
/// the one field an article cannot exist without.
fn normalize_entry(
    entry: feed_rs::model::Entry,
    source: &FeedSource,
    config: &Config,
) -> Option<RawArticle> {
    let link = entry.links.first().map(|l| l.href.clone())?;

    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string());

    // Summary first, content body as the fallback, stripped then truncated.
    let description_raw = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();
    let description = truncate_chars(&strip_html(&description_raw), config.max_description_length);

    let published_date = entry
        .published
        .or(entry.updated)
        .map(|d| d.to_rfc3339());

    let location = geo::resolve(&title, &description)
        .or_else(|| source.default_location.and_then(geo::resolve_key));

    Some(RawArticle {
        title,
        description,
        link,
        source: source.source.to_string(),
        category: source.category.to_string(),
        published_date,
        location,
    })
}

fn parse_json_feed(text: &str, source: &FeedSource, config: &Config) -> Result<ParsedEntries> {
    let feed: JsonFeed = serde_json::from_str(text)
        .map_err(|err| anyhow!("failed to parse JSON feed from {}: {}", source.url, err))?;

    let mut parsed = ParsedEntries::default();

    for item in feed.items.into_iter().take(config.feed_entry_cap) {
        let link = match item.url.or(item.id) {
            Some(link) => link,
            None => {
                parsed.malformed += 1;
                warn!(target: TARGET_WEB_REQUEST, "JSON feed item from {} missing url, skipping", source.url);
                continue;
            }
        };

        let title = item
            .title
            .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string());

        let description_raw = item
            .summary
            .or(item.content_text)
            .or(item.content_html)
            .unwrap_or_default();
        let description =
            truncate_chars(&strip_html(&description_raw), config.max_description_length);

        // Normalize the date when it parses; keep the raw string otherwise,
        // since published dates are informational and never filtered on.
        let published_date = item.date_published.map(|d| match parse_date(&d) {
            Some(dt) => dt.to_rfc3339(),
            None => d,
        });

        let location = geo::resolve(&title, &description)
            .or_else(|| source.default_location.and_then(geo::resolve_key));

        parsed.articles.push(RawArticle {
            title,
            description,
            link,
            source: source.source.to_string(),
            category: source.category.to_string(),
            published_date,
            location,
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_source(default_location: Option<&'static str>) -> FeedSource {
        FeedSource {
            url: "https://example.com/feed.xml",
            source: "Test Wire",
            category: "Geopolitics",
            default_location,
        }
    }

    fn rss_feed(items: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>Wire</title>{}</channel></rss>",
            items
        )
    }

    #[test]
    fn normalizes_title_description_and_link() {
        let xml = rss_feed(
            "<item><title>Russia strikes Kyiv power grid</title>\
             <link>https://example.com/a1</link>\
             <description>Overnight &lt;b&gt;strikes&lt;/b&gt; hit the grid</description>\
             <pubDate>Thu, 06 Aug 2026 10:00:00 GMT</pubDate></item>",
        );

        let parsed = parse_feed(&xml, Some("application/rss+xml"), &test_source(None), &Config::default()).unwrap();

        assert_eq!(parsed.malformed, 0);
        assert_eq!(parsed.articles.len(), 1);
        let article = &parsed.articles[0];
        assert_eq!(article.title, "Russia strikes Kyiv power grid");
        assert_eq!(article.description, "Overnight strikes hit the grid");
        assert_eq!(article.link, "https://example.com/a1");
        assert_eq!(article.source, "Test Wire");
        assert_eq!(article.category, "Geopolitics");
        assert!(article.published_date.as_deref().unwrap().starts_with("2026-08-06T10:00:00"));
        // "kyiv" resolves before the default would apply
        assert_eq!(article.location.as_ref().unwrap().name, "Ukraine");
    }

    #[test]
    fn entry_without_link_is_counted_malformed() {
        let xml = rss_feed(
            "<item><title>Orphan entry</title></item>\
             <item><title>Kept entry</title><link>https://example.com/a2</link></item>",
        );

        let parsed = parse_feed(&xml, None, &test_source(None), &Config::default()).unwrap();

        assert_eq!(parsed.malformed, 1);
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.articles[0].link, "https://example.com/a2");
    }

    #[test]
    fn missing_title_gets_placeholder() {
        let xml = rss_feed("<item><link>https://example.com/a3</link></item>");

        let parsed = parse_feed(&xml, None, &test_source(None), &Config::default()).unwrap();

        assert_eq!(parsed.articles[0].title, NO_TITLE_PLACEHOLDER);
    }

    #[test]
    fn description_is_stripped_before_truncation() {
        // 510 characters of text wrapped in tags: stripping first means the
        // stored description is the first 500 text characters.
        let body = "x".repeat(510);
        let xml = rss_feed(&format!(
            "<item><title>Long</title><link>https://example.com/a4</link>\
             <description>&lt;p&gt;{}&lt;/p&gt;</description></item>",
            body
        ));

        let parsed = parse_feed(&xml, None, &test_source(None), &Config::default()).unwrap();

        let description = &parsed.articles[0].description;
        assert_eq!(description.chars().count(), 500);
        assert!(!description.contains('<'));
    }

    #[test]
    fn entry_cap_limits_entries_per_feed() {
        let items: String = (0..30)
            .map(|i| {
                format!(
                    "<item><title>Entry {}</title><link>https://example.com/e{}</link></item>",
                    i, i
                )
            })
            .collect();

        let parsed = parse_feed(&rss_feed(&items), None, &test_source(None), &Config::default()).unwrap();

        assert_eq!(parsed.articles.len(), 20);
    }

    #[test]
    fn atom_updated_is_the_date_fallback() {
        let xml = r#"<?xml version="1.0"?>
            <feed xmlns="http://www.w3.org/2005/Atom">
              <title>Wire</title><id>urn:wire</id><updated>2026-08-06T00:00:00Z</updated>
              <entry>
                <title>Quiet day on the markets desk</title>
                <id>urn:e1</id>
                <link href="https://example.com/a5"/>
                <updated>2026-08-05T09:30:00Z</updated>
              </entry>
            </feed>"#;

        let parsed = parse_feed(xml, Some("application/atom+xml"), &test_source(None), &Config::default()).unwrap();

        assert!(parsed.articles[0]
            .published_date
            .as_deref()
            .unwrap()
            .starts_with("2026-08-05T09:30:00"));
    }

    #[test]
    fn default_location_applies_only_when_text_matches_nothing() {
        let xml = rss_feed(
            "<item><title>Monsoon session opens</title><link>https://example.com/a6</link></item>",
        );

        let parsed = parse_feed(&xml, None, &test_source(Some("India")), &Config::default()).unwrap();
        assert_eq!(parsed.articles[0].location.as_ref().unwrap().name, "India");

        // An unknown default key falls through to no location.
        let parsed = parse_feed(&xml, None, &test_source(Some("Europe")), &Config::default()).unwrap();
        assert!(parsed.articles[0].location.is_none());
    }

    #[test]
    fn json_feed_items_are_normalized() {
        let body = r#"{
            "version": "https://jsonfeed.org/version/1.1",
            "title": "Wire",
            "items": [
                {"id": "1", "url": "https://example.com/j1", "title": "Strait of Hormuz transit resumes",
                 "summary": "Tankers move again", "date_published": "2026-08-06T08:00:00Z"},
                {"id": "2", "title": "No url on this one"}
            ]
        }"#;

        let parsed = parse_feed(body, Some("application/feed+json"), &test_source(None), &Config::default()).unwrap();

        assert_eq!(parsed.articles.len(), 2);
        assert_eq!(parsed.articles[0].link, "https://example.com/j1");
        assert_eq!(parsed.articles[0].location.as_ref().unwrap().name, "Strait of Hormuz");
        // The second item falls back to its id for the link.
        assert_eq!(parsed.articles[1].link, "2");
        assert_eq!(parsed.malformed, 0);
    }

    #[test]
    fn garbage_body_is_an_error() {
        let result = parse_feed("<html><body>404</body></html>", None, &test_source(None), &Config::default());
        assert!(result.is_err());
    }
}
