//! Utility functions for feed processing.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches HTML/XML tags for the description cleanup pass.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<]+?>").expect("tag pattern"));

/// Helper function to validate a URL
pub fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = url::Url::parse(url) {
        parsed.scheme() == "http" || parsed.scheme() == "https"
    } else {
        false
    }
}

/// Parse a date string in the formats feeds actually serve.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339
    if let Ok(date) = DateTime::parse_from_rfc3339(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // Try RFC2822
    if let Ok(date) = DateTime::parse_from_rfc2822(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    None
}

/// Remove markup from a description. Stripping happens before truncation
/// so tags never count against the length cap.
pub fn strip_html(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Character-based truncation (never splits a code point).
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Clean up malformed XML enough for a salvage reparse.
pub fn cleanup_xml(xml: &str) -> String {
    let mut cleaned = xml.trim().to_string();

    // Remove any UTF-8 BOM if present
    if let Some(stripped) = cleaned.strip_prefix('\u{FEFF}') {
        cleaned = stripped.to_string();
    }

    // Remove any leading garbage before the document proper
    if let Some(xml_start) = cleaned.find("<?xml") {
        cleaned = cleaned[xml_start..].to_string();
    } else if let Some(rss_start) = cleaned.find("<rss") {
        cleaned = cleaned[rss_start..].to_string();
    } else if let Some(feed_start) = cleaned.find("<feed") {
        cleaned = cleaned[feed_start..].to_string();
    }

    // Replace entities that XML parsers reject but feeds commonly emit
    cleaned = cleaned
        .replace("&nbsp;", "&#160;")
        .replace("&ndash;", "&#8211;")
        .replace("&mdash;", "&#8212;")
        .replace("&rsquo;", "&#8217;")
        .replace("&lsquo;", "&#8216;")
        .replace("&rdquo;", "&#8221;")
        .replace("&ldquo;", "&#8220;")
        .replace("&amp;amp;", "&amp;")
        .replace("&apos;", "&#39;");

    // Drop characters outside the XML 1.0 range
    cleaned = cleaned
        .chars()
        .filter(|&c| {
            matches!(c,
                '\u{0009}' |
                '\u{000A}' |
                '\u{000D}' |
                '\u{0020}'..='\u{D7FF}' |
                '\u{E000}'..='\u{FFFD}' |
                '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect();

    if !cleaned.starts_with("<?xml") {
        cleaned = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", cleaned);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_text() {
        assert_eq!(
            strip_html("Overnight <b>strikes</b> hit the <a href=\"x\">grid</a>"),
            "Overnight strikes hit the grid"
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn parses_both_common_date_formats() {
        assert!(parse_date("2026-08-06T10:00:00Z").is_some());
        assert!(parse_date("Thu, 06 Aug 2026 10:00:00 GMT").is_some());
        assert!(parse_date("last tuesday").is_none());
    }

    #[test]
    fn cleanup_strips_bom_and_leading_garbage() {
        let cleaned = cleanup_xml("\u{FEFF}noise<?xml version=\"1.0\"?><rss></rss>");
        assert!(cleaned.starts_with("<?xml"));
        assert!(cleaned.contains("<rss>"));
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(is_valid_url("https://example.com/feed.xml"));
        assert!(!is_valid_url("ftp://example.com/feed.xml"));
        assert!(!is_valid_url("not a url"));
    }
}
