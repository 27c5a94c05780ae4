//! Keyword-based geographic tagging for the globe view.

use serde::Serialize;

/// A geographic tag attached to an article.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeoTag {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Ordered keyword table: (keyword, canonical name, lat, lng).
///
/// This is deliberately a slice and not a map. Matching is first-hit wins,
/// so iteration order is match precedence and must stay stable. Keywords
/// are matched as plain substrings of the lowercased text, which is
/// permissive on purpose ("uk" matches inside "trunk"); keep parity with
/// that behavior rather than making the matcher smarter.
pub const LOCATION_KEYWORDS: &[(&str, &str, f64, f64)] = &[
    ("ukraine", "Ukraine", 48.3794, 31.1656),
    ("russia", "Russia", 61.5240, 105.3188),
    ("china", "China", 35.8617, 104.1954),
    ("taiwan", "Taiwan", 23.6978, 120.9605),
    ("israel", "Israel", 31.0461, 34.8516),
    ("gaza", "Gaza", 31.3547, 34.3088),
    ("palestine", "Palestine", 31.9522, 35.2332),
    ("iran", "Iran", 32.4279, 53.6880),
    ("syria", "Syria", 34.8021, 38.9968),
    ("yemen", "Yemen", 15.5527, 48.5164),
    ("north korea", "North Korea", 40.3399, 127.5101),
    ("south korea", "South Korea", 35.9078, 127.7669),
    ("japan", "Japan", 36.2048, 138.2529),
    ("india", "India", 20.5937, 78.9629),
    ("pakistan", "Pakistan", 30.3753, 69.3451),
    ("afghanistan", "Afghanistan", 33.9391, 67.7100),
    ("iraq", "Iraq", 33.2232, 43.6793),
    ("saudi arabia", "Saudi Arabia", 23.8859, 45.0792),
    ("turkey", "Turkey", 38.9637, 35.2433),
    ("egypt", "Egypt", 26.8206, 30.8025),
    ("libya", "Libya", 26.3351, 17.2283),
    ("sudan", "Sudan", 12.8628, 30.2176),
    ("ethiopia", "Ethiopia", 9.1450, 40.4897),
    ("somalia", "Somalia", 5.1521, 46.1996),
    ("nigeria", "Nigeria", 9.0820, 8.6753),
    ("south africa", "South Africa", -30.5595, 22.9375),
    ("venezuela", "Venezuela", 6.4238, -66.5897),
    ("brazil", "Brazil", -14.2350, -51.9253),
    ("mexico", "Mexico", 23.6345, -102.5528),
    ("canada", "Canada", 56.1304, -106.3468),
    ("united states", "United States", 37.0902, -95.7129),
    ("usa", "United States", 37.0902, -95.7129),
    ("america", "United States", 37.0902, -95.7129),
    ("trump", "United States", 37.0902, -95.7129),
    ("biden", "United States", 37.0902, -95.7129),
    ("washington", "United States", 38.9072, -77.0369),
    ("pentagon", "United States", 38.8719, -77.0563),
    ("nato", "Europe", 50.8503, 4.3517),
    ("european union", "Europe", 50.8503, 4.3517),
    ("eu", "Europe", 50.8503, 4.3517),
    ("brussels", "Belgium", 50.8503, 4.3517),
    ("london", "United Kingdom", 51.5074, -0.1278),
    ("uk", "United Kingdom", 55.3781, -3.4360),
    ("britain", "United Kingdom", 55.3781, -3.4360),
    ("germany", "Germany", 51.1657, 10.4515),
    ("france", "France", 46.2276, 2.2137),
    ("poland", "Poland", 51.9194, 19.1451),
    ("crimea", "Crimea", 44.9521, 34.1024),
    ("donbas", "Donbas", 48.0159, 37.8028),
    ("kyiv", "Ukraine", 50.4501, 30.5234),
    ("kiev", "Ukraine", 50.4501, 30.5234),
    ("moscow", "Russia", 55.7558, 37.6173),
    ("beijing", "China", 39.9042, 116.4074),
    ("taipei", "Taiwan", 25.0330, 121.5654),
    ("tehran", "Iran", 35.6892, 51.3890),
    ("pyongyang", "North Korea", 39.0392, 125.7625),
    ("south china sea", "South China Sea", 12.0, 114.0),
    ("red sea", "Red Sea", 20.0, 38.0),
    ("strait of hormuz", "Strait of Hormuz", 26.5, 56.5),
    ("arctic", "Arctic", 90.0, 0.0),
    ("houthi", "Yemen", 15.5527, 48.5164),
    ("hezbollah", "Lebanon", 33.8547, 35.8623),
    ("lebanon", "Lebanon", 33.8547, 35.8623),
    ("myanmar", "Myanmar", 21.9162, 95.9560),
    ("philippines", "Philippines", 12.8797, 121.7740),
    ("indonesia", "Indonesia", -0.7893, 113.9213),
    ("australia", "Australia", -25.2744, 133.7751),
    ("aukus", "Australia", -25.2744, 133.7751),
];

fn geo_tag(entry: &(&str, &str, f64, f64)) -> GeoTag {
    GeoTag {
        name: entry.1.to_string(),
        lat: entry.2,
        lng: entry.3,
    }
}

/// Scan the article text for the first known location keyword.
///
/// Title and description are concatenated and lowercased; the keyword table
/// is walked in declaration order and the first substring hit wins.
pub fn resolve(title: &str, description: &str) -> Option<GeoTag> {
    let text = format!("{} {}", title, description).to_lowercase();

    LOCATION_KEYWORDS
        .iter()
        .find(|(keyword, _, _, _)| text.contains(keyword))
        .map(geo_tag)
}

/// Look up a keyword directly, bypassing substring search.
///
/// Used for feed-source default locations. Keys with no table entry
/// resolve to `None`; that is not a configuration error.
pub fn resolve_key(key: &str) -> Option<GeoTag> {
    let key = key.to_lowercase();

    LOCATION_KEYWORDS
        .iter()
        .find(|(keyword, _, _, _)| *keyword == key)
        .map(geo_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_table_entry_wins() {
        // "ukraine" precedes "russia" in the table, so it wins even though
        // "Russia" appears first in the text.
        let tag = resolve("Russia sends troops to Ukraine", "").unwrap();
        assert_eq!(tag.name, "Ukraine");
        assert_eq!(tag.lat, 48.3794);
        assert_eq!(tag.lng, 31.1656);
    }

    #[test]
    fn matches_in_description_too() {
        let tag = resolve("Markets update", "Shipping rerouted around the Red Sea").unwrap();
        assert_eq!(tag.name, "Red Sea");
    }

    #[test]
    fn no_match_returns_none() {
        assert_eq!(resolve("Quarterly earnings beat expectations", ""), None);
    }

    #[test]
    fn substring_matching_is_permissive() {
        // Known false positive kept for parity: "uk" inside "trunk".
        let tag = resolve("Elephant trunk study published", "").unwrap();
        assert_eq!(tag.name, "United Kingdom");
    }

    #[test]
    fn key_lookup_is_exact() {
        let tag = resolve_key("India").unwrap();
        assert_eq!(tag.name, "India");
        assert_eq!(tag.lat, 20.5937);
        assert_eq!(tag.lng, 78.9629);

        // "Europe" is a canonical name but not a keyword; lookup misses.
        assert_eq!(resolve_key("Europe"), None);
    }
}
