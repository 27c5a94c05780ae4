//! Static feed-source configuration.
//!
//! Sources are declared grouped by monitoring desk; the batch coordinator
//! walks them in declaration order. Labels and categories are assigned
//! here, never inferred from feed contents.

/// One configured syndication feed.
#[derive(Clone, Copy, Debug)]
pub struct FeedSource {
    pub url: &'static str,
    /// Provenance label stored on every article from this feed.
    pub source: &'static str,
    pub category: &'static str,
    /// Keyword key used when an article's text matches no location.
    pub default_location: Option<&'static str>,
}

const fn feed(
    url: &'static str,
    source: &'static str,
    category: &'static str,
    default_location: Option<&'static str>,
) -> FeedSource {
    FeedSource {
        url,
        source,
        category,
        default_location,
    }
}

pub const US_POLICY: &str = "US Policy";
pub const GEOPOLITICS: &str = "Geopolitics";
pub const CONFLICT_ZONES: &str = "Conflict Zones";
pub const DEFENSE_INTEL: &str = "Defense & Intelligence";
pub const ECONOMIC_STATECRAFT: &str = "Economic Statecraft";
pub const INDIA: &str = "India";
pub const MARKETS: &str = "Markets";
pub const CYBER_TECH: &str = "Cyber & Tech";

pub const FEED_SOURCES: &[FeedSource] = &[
    // US policy desk
    feed("https://www.whitehouse.gov/feed/", "White House", US_POLICY, Some("United States")),
    feed("https://rss.politico.com/playbook.xml", "POLITICO Playbook", US_POLICY, Some("United States")),
    feed("https://feeds.axios.com/api/feed", "Axios", US_POLICY, Some("United States")),
    feed("https://feeds.bbci.co.uk/news/world/us_and_canada/rss.xml", "BBC US & Canada", US_POLICY, Some("United States")),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Politics.xml", "NYT Politics", US_POLICY, Some("United States")),
    feed("https://www.reuters.com/arc/outboundfeeds/v3/all/rss.xml?outputType=xml", "Reuters", US_POLICY, Some("United States")),
    // Geopolitics desk
    feed("https://www.cfr.org/rss.xml", "Council on Foreign Relations", GEOPOLITICS, None),
    feed("https://foreignpolicy.com/feed/", "Foreign Policy", GEOPOLITICS, None),
    feed("https://www.aljazeera.com/xml/rss/all.xml", "Al Jazeera", GEOPOLITICS, None),
    feed("https://feeds.bbci.co.uk/news/world/rss.xml", "BBC World", GEOPOLITICS, None),
    feed("https://thediplomat.com/feed/", "The Diplomat", GEOPOLITICS, Some("Asia-Pacific")),
    feed("https://www.scmp.com/rss/91/feed", "South China Morning Post", GEOPOLITICS, Some("China")),
    feed("https://www.middleeasteye.net/rss", "Middle East Eye", GEOPOLITICS, Some("Middle East")),
    feed("https://warontherocks.com/feed/", "War on the Rocks", GEOPOLITICS, None),
    // Conflict zones desk
    feed("https://www.reuters.com/arc/outboundfeeds/v3/section/world/rss.xml?outputType=xml", "Reuters World", CONFLICT_ZONES, None),
    feed("https://www.aljazeera.com/xml/rss/all.xml", "Al Jazeera", CONFLICT_ZONES, None),
    feed("https://feeds.bbci.co.uk/news/world/middle_east/rss.xml", "BBC Middle East", CONFLICT_ZONES, Some("Middle East")),
    feed("https://feeds.bbci.co.uk/news/world/europe/rss.xml", "BBC Europe", CONFLICT_ZONES, Some("Europe")),
    feed("https://feeds.bbci.co.uk/news/world/africa/rss.xml", "BBC Africa", CONFLICT_ZONES, Some("Africa")),
    feed("https://feeds.bbci.co.uk/news/world/asia/rss.xml", "BBC Asia", CONFLICT_ZONES, Some("Asia")),
    feed("https://www.understandingwar.org/feed", "Institute for Study of War", CONFLICT_ZONES, None),
    // Defense & intelligence desk
    feed("https://www.defensenews.com/arc/outboundfeeds/rss/?outputType=xml", "Defense News", DEFENSE_INTEL, None),
    feed("https://breakingdefense.com/feed/", "Breaking Defense", DEFENSE_INTEL, None),
    feed("https://www.thedrive.com/the-war-zone/feed", "The War Zone", DEFENSE_INTEL, None),
    feed("https://www.c4isrnet.com/arc/outboundfeeds/rss/?outputType=xml", "C4ISRNET", DEFENSE_INTEL, None),
    feed("https://www.janes.com/feeds/news", "Janes", DEFENSE_INTEL, None),
    feed("https://www.bellingcat.com/feed/", "Bellingcat", DEFENSE_INTEL, None),
    // Economic statecraft desk
    feed("https://www.reuters.com/arc/outboundfeeds/v3/section/business/rss.xml?outputType=xml", "Reuters Business", ECONOMIC_STATECRAFT, None),
    feed("https://feeds.bloomberg.com/markets/news.rss", "Bloomberg Markets", ECONOMIC_STATECRAFT, None),
    feed("https://feeds.ft.com/rss/home/uk", "Financial Times", ECONOMIC_STATECRAFT, None),
    feed("https://www.economist.com/finance-and-economics/rss.xml", "The Economist", ECONOMIC_STATECRAFT, None),
    feed("https://www.business-standard.com/rss/home_page_top_stories.rss", "Business Standard", ECONOMIC_STATECRAFT, Some("India")),
    // India desk
    feed("https://www.thehindu.com/news/national/feeder/default.rss", "The Hindu National", INDIA, Some("India")),
    feed("https://www.thehindu.com/news/international/feeder/default.rss", "The Hindu International", INDIA, Some("India")),
    feed("https://timesofindia.indiatimes.com/rssfeeds/296589292.cms", "Times of India", INDIA, Some("India")),
    feed("https://www.hindustantimes.com/feeds/rss/india-news/rssfeed.xml", "Hindustan Times", INDIA, Some("India")),
    feed("https://indianexpress.com/section/india/feed/", "Indian Express", INDIA, Some("India")),
    feed("https://www.ndtv.com/rss/india", "NDTV India", INDIA, Some("India")),
    feed("https://economictimes.indiatimes.com/rssfeedstopstories.cms", "Economic Times", INDIA, Some("India")),
    feed("https://www.livemint.com/rss/news", "Mint", INDIA, Some("India")),
    // Markets desk
    feed("https://feeds.bloomberg.com/markets/news.rss", "Bloomberg Markets", MARKETS, None),
    feed("https://www.cnbc.com/id/10001147/device/rss/rss.html", "CNBC Markets", MARKETS, None),
    feed("https://feeds.marketwatch.com/marketwatch/topstories/", "MarketWatch", MARKETS, None),
    feed("https://www.investing.com/rss/news.rss", "Investing.com", MARKETS, None),
    feed("https://economictimes.indiatimes.com/markets/rssfeeds/1977021501.cms", "ET Markets", MARKETS, Some("India")),
    feed("https://www.moneycontrol.com/rss/latestnews.xml", "Moneycontrol", MARKETS, Some("India")),
    feed("https://finance.yahoo.com/news/rssindex", "Yahoo Finance", MARKETS, None),
    // Cyber & tech desk
    feed("https://www.wired.com/feed/category/security/latest/rss", "Wired Security", CYBER_TECH, None),
    feed("https://krebsonsecurity.com/feed/", "Krebs on Security", CYBER_TECH, None),
    feed("https://www.bleepingcomputer.com/feed/", "BleepingComputer", CYBER_TECH, None),
    feed("https://thehackernews.com/feeds/posts/default", "The Hacker News", CYBER_TECH, None),
    feed("https://www.darkreading.com/rss.xml", "Dark Reading", CYBER_TECH, None),
    feed("https://www.theregister.com/security/headlines.atom", "The Register", CYBER_TECH, None),
    feed("https://techcrunch.com/category/security/feed/", "TechCrunch Security", CYBER_TECH, None),
    feed("https://www.schneier.com/feed/", "Schneier on Security", CYBER_TECH, None),
    feed("https://semianalysis.com/feed/", "SemiAnalysis", CYBER_TECH, None),
];

/// The distinct category labels, in declaration order.
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for source in FEED_SOURCES {
        if !seen.contains(&source.category) {
            seen.push(source.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_in_declaration_order() {
        let cats = categories();
        assert_eq!(cats.first(), Some(&US_POLICY));
        assert_eq!(cats.last(), Some(&CYBER_TECH));
        assert_eq!(cats.len(), 8);
    }

    #[test]
    fn every_url_is_absolute() {
        for source in FEED_SOURCES {
            assert!(
                source.url.starts_with("http://") || source.url.starts_with("https://"),
                "relative feed url: {}",
                source.url
            );
        }
    }
}
