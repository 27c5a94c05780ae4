//! Read paths for the dashboard views. Every query is implicitly bounded
//! by the retention horizon on `fetched_date`.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::Row;
use std::collections::HashMap;
use tracing::debug;

use super::article::Article;
use super::core::Database;
use crate::cluster::{self, StoryGroup};
use crate::TARGET_DB;

/// Maximum number of representative titles carried per location rollup.
const AGGREGATE_TITLE_CAP: usize = 5;

/// Maximum rows served by the breaking view.
const BREAKING_LIMIT: i64 = 10;

/// RFC 3339 timestamp of the oldest article the read paths will serve.
pub fn age_cutoff(max_age_days: i64) -> String {
    (Utc::now() - Duration::days(max_age_days)).to_rfc3339()
}

/// Optional filters for article listings.
#[derive(Clone, Debug)]
pub struct ArticleFilter {
    pub category: Option<String>,
    pub source: Option<String>,
    /// Substring match over title and description.
    pub search: Option<String>,
    pub limit: i64,
}

impl Default for ArticleFilter {
    fn default() -> Self {
        ArticleFilter {
            category: None,
            source: None,
            search: None,
            limit: 100,
        }
    }
}

/// Per-location rollup for the globe view.
#[derive(Debug, Serialize)]
pub struct LocationAggregate {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub count: i64,
    pub titles: Vec<String>,
    pub categories: Vec<String>,
}

/// In-window summary statistics for the dashboard header.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_articles: i64,
    pub categories: HashMap<String, i64>,
    pub sources_count: i64,
    pub locations_count: i64,
}

impl Database {
    /// List in-window articles, newest fetch first.
    pub async fn list_articles(
        &self,
        filter: &ArticleFilter,
        max_age_days: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let cutoff = age_cutoff(max_age_days);

        let mut sql = String::from("SELECT * FROM articles WHERE fetched_date >= ?");
        if filter.category.is_some() {
            sql.push_str(" AND category = ?");
        }
        if filter.source.is_some() {
            sql.push_str(" AND source = ?");
        }
        if filter.search.is_some() {
            sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
        }
        sql.push_str(" ORDER BY fetched_date DESC LIMIT ?");

        debug!(target: TARGET_DB, "Listing articles: {:?}", filter);

        let mut query = sqlx::query_as::<_, Article>(&sql).bind(&cutoff);
        if let Some(category) = &filter.category {
            query = query.bind(category);
        }
        if let Some(source) = &filter.source {
            query = query.bind(source);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.bind(pattern.clone()).bind(pattern);
        }

        query.bind(filter.limit).fetch_all(self.pool()).await
    }

    /// Distinct sources present in the freshness window, alphabetical.
    pub async fn list_sources(&self, max_age_days: i64) -> Result<Vec<String>, sqlx::Error> {
        let cutoff = age_cutoff(max_age_days);

        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT source FROM articles WHERE fetched_date >= ?1 ORDER BY source",
        )
        .bind(&cutoff)
        .fetch_all(self.pool())
        .await
    }

    /// Group located articles by location name, busiest first.
    pub async fn location_aggregates(
        &self,
        max_age_days: i64,
    ) -> Result<Vec<LocationAggregate>, sqlx::Error> {
        let cutoff = age_cutoff(max_age_days);

        let rows = sqlx::query(
            r#"
            SELECT location_name, location_lat, location_lng,
                   COUNT(*) as count,
                   GROUP_CONCAT(title, '|||') as titles,
                   GROUP_CONCAT(category, '|||') as categories
            FROM articles
            WHERE location_name IS NOT NULL AND fetched_date >= ?1
            GROUP BY location_name
            ORDER BY count DESC
            "#,
        )
        .bind(&cutoff)
        .fetch_all(self.pool())
        .await?;

        let mut aggregates = Vec::with_capacity(rows.len());
        for row in rows {
            let titles: String = row.get("titles");
            let categories: String = row.get("categories");

            // Distinct categories, first-seen order.
            let mut distinct = Vec::new();
            for category in categories.split("|||") {
                if !distinct.iter().any(|c| c == category) {
                    distinct.push(category.to_string());
                }
            }

            aggregates.push(LocationAggregate {
                name: row.get("location_name"),
                lat: row.get("location_lat"),
                lng: row.get("location_lng"),
                count: row.get("count"),
                titles: titles
                    .split("|||")
                    .take(AGGREGATE_TITLE_CAP)
                    .map(|t| t.to_string())
                    .collect(),
                categories: distinct,
            });
        }

        Ok(aggregates)
    }

    /// Articles fetched within the breaking window, newest first.
    pub async fn breaking(&self, window_hours: i64) -> Result<Vec<Article>, sqlx::Error> {
        let cutoff = (Utc::now() - Duration::hours(window_hours)).to_rfc3339();

        sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE fetched_date > ?1
            ORDER BY fetched_date DESC
            LIMIT ?2
            "#,
        )
        .bind(&cutoff)
        .bind(BREAKING_LIMIT)
        .fetch_all(self.pool())
        .await
    }

    /// Summary statistics over the freshness window.
    pub async fn stats(&self, max_age_days: i64) -> Result<Stats, sqlx::Error> {
        let cutoff = age_cutoff(max_age_days);

        let total_articles: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE fetched_date >= ?1")
                .bind(&cutoff)
                .fetch_one(self.pool())
                .await?;

        let sources_count: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT source) FROM articles WHERE fetched_date >= ?1")
                .bind(&cutoff)
                .fetch_one(self.pool())
                .await?;

        let locations_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT location_name) FROM articles WHERE location_name IS NOT NULL AND fetched_date >= ?1",
        )
        .bind(&cutoff)
        .fetch_one(self.pool())
        .await?;

        let category_rows = sqlx::query(
            "SELECT category, COUNT(*) as count FROM articles WHERE fetched_date >= ?1 GROUP BY category",
        )
        .bind(&cutoff)
        .fetch_all(self.pool())
        .await?;

        let mut categories = HashMap::new();
        for row in category_rows {
            categories.insert(row.get::<String, _>("category"), row.get::<i64, _>("count"));
        }

        Ok(Stats {
            total_articles,
            categories,
            sources_count,
            locations_count,
        })
    }

    /// Near-duplicate story groups over the in-window listing.
    ///
    /// Fetches twice the requested number of groups as candidates so the
    /// quadratic grouping pass stays bounded, then groups greedily in
    /// recency order.
    pub async fn grouped_articles(
        &self,
        filter: &ArticleFilter,
        threshold: f64,
        max_age_days: i64,
    ) -> Result<Vec<StoryGroup>, sqlx::Error> {
        let candidate_filter = ArticleFilter {
            limit: filter.limit * 2,
            ..filter.clone()
        };
        let articles = self.list_articles(&candidate_filter, max_age_days).await?;

        Ok(cluster::group_articles(
            articles,
            threshold,
            filter.limit as usize,
        ))
    }
}
