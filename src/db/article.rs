use serde::Serialize;
use tracing::{debug, error, instrument};
use url::Url;

use super::core::Database;
use crate::geo::GeoTag;
use crate::TARGET_DB;

/// A stored article row. Field names match the column names exactly so the
/// serialized payload stays wire-compatible with the dashboard client.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub source: String,
    pub category: String,
    pub published_date: Option<String>,
    pub fetched_date: String,
    pub location_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

impl Article {
    /// The location triple, when one was assigned at ingest time.
    pub fn location(&self) -> Option<GeoTag> {
        match (&self.location_name, self.location_lat, self.location_lng) {
            (Some(name), Some(lat), Some(lng)) => Some(GeoTag {
                name: name.clone(),
                lat,
                lng,
            }),
            _ => None,
        }
    }
}

impl Database {
    /// Insert an article unless its link is already stored.
    ///
    /// The UNIQUE constraint on `link` is the sole deduplication and
    /// concurrency-correctness mechanism: a conflicting insert is a silent
    /// no-op, never an update, so a row's location and fetch time are
    /// immutable once written. Returns `Ok(true)` only when a row was
    /// actually inserted.
    #[allow(clippy::too_many_arguments)]
    #[instrument(target = "db", level = "info", skip_all, fields(link = link))]
    pub async fn insert_article_if_absent(
        &self,
        link: &str,
        title: &str,
        description: &str,
        source: &str,
        category: &str,
        published_date: Option<&str>,
        fetched_date: &str,
        location: Option<&GeoTag>,
    ) -> Result<bool, sqlx::Error> {
        if let Err(e) = Url::parse(link) {
            error!(target: TARGET_DB, "Attempted to store an article with an invalid link ({}): {}", link, e);
            return Err(sqlx::Error::Protocol("Invalid link provided".into()));
        }

        debug!(target: TARGET_DB, "Storing article: {}", link);

        let result = sqlx::query(
            r#"
            INSERT INTO articles
                (title, description, link, source, category, published_date, fetched_date,
                 location_name, location_lat, location_lng)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(link) DO NOTHING
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(link)
        .bind(source)
        .bind(category)
        .bind(published_date)
        .bind(fetched_date)
        .bind(location.map(|l| l.name.as_str()))
        .bind(location.map(|l| l.lat))
        .bind(location.map(|l| l.lng))
        .execute(self.pool())
        .await?;

        let inserted = result.rows_affected() > 0;
        if inserted {
            debug!(target: TARGET_DB, "Article stored: {}", link);
        } else {
            debug!(target: TARGET_DB, "Article already stored, skipping: {}", link);
        }
        Ok(inserted)
    }
}
