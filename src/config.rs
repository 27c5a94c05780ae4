use std::env;
use std::str::FromStr;

/// Runtime configuration, sourced from environment variables. Every knob has
/// a default suitable for a single-node deployment.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_path: String,
    /// Retention horizon: articles fetched longer ago than this are
    /// invisible to every read path.
    pub max_article_age_days: i64,
    pub refresh_interval_minutes: u64,
    pub max_description_length: usize,
    /// Only the first N entries of each feed are considered per batch.
    pub feed_entry_cap: usize,
    pub similarity_threshold: f64,
    pub breaking_window_hours: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: "sitrep.db".to_string(),
            max_article_age_days: 7,
            refresh_interval_minutes: 30,
            max_description_length: 500,
            feed_entry_cap: 20,
            similarity_threshold: 0.4,
            breaking_window_hours: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            max_article_age_days: parse_env("MAX_ARTICLE_AGE_DAYS", defaults.max_article_age_days),
            refresh_interval_minutes: parse_env(
                "REFRESH_INTERVAL_MINUTES",
                defaults.refresh_interval_minutes,
            ),
            max_description_length: parse_env(
                "MAX_DESCRIPTION_LENGTH",
                defaults.max_description_length,
            ),
            feed_entry_cap: parse_env("FEED_ENTRY_CAP", defaults.feed_entry_cap),
            similarity_threshold: parse_env("SIMILARITY_THRESHOLD", defaults.similarity_threshold),
            breaking_window_hours: parse_env(
                "BREAKING_WINDOW_HOURS",
                defaults.breaking_window_hours,
            ),
        }
    }
}

fn parse_env<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = Config::default();
        assert_eq!(config.max_article_age_days, 7);
        assert_eq!(config.refresh_interval_minutes, 30);
        assert_eq!(config.max_description_length, 500);
        assert_eq!(config.feed_entry_cap, 20);
        assert_eq!(config.similarity_threshold, 0.4);
        assert_eq!(config.breaking_window_hours, 2);
    }
}
