//! Greedy near-duplicate grouping of recency-ordered articles.

use serde::Serialize;

use crate::db::Article;
use crate::similarity;

/// Default similarity score above which two titles are considered the same
/// story.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;

/// One story: the newest article plus the near-duplicates it absorbed.
#[derive(Debug, Serialize)]
pub struct StoryGroup {
    pub main: Article,
    pub related: Vec<Article>,
}

/// Group near-duplicate articles with a single left-to-right greedy pass.
///
/// The caller supplies articles pre-sorted by recency descending; each
/// unconsumed article opens a group as `main`, and every later unconsumed
/// article whose title scores above `threshold` against the main title
/// joins `related`. Consumption state is local to this call. Grouping is
/// order-dependent by design: transitive similarity (A~B, B~C, but not
/// A~C) is not chased, so C joins B's group only if B itself opens one.
///
/// No more than `limit` groups are produced; the group being built when
/// the limit is reached is still completed, never left partial.
pub fn group_articles(articles: Vec<Article>, threshold: f64, limit: usize) -> Vec<StoryGroup> {
    let mut used = vec![false; articles.len()];
    let mut grouped = Vec::new();

    for i in 0..articles.len() {
        if used[i] {
            continue;
        }

        let mut related = Vec::new();
        for j in (i + 1)..articles.len() {
            if used[j] {
                continue;
            }
            if similarity::score(&articles[i].title, &articles[j].title) > threshold {
                related.push(articles[j].clone());
                used[j] = true;
            }
        }

        used[i] = true;
        grouped.push(StoryGroup {
            main: articles[i].clone(),
            related,
        });

        if grouped.len() >= limit {
            break;
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, title: &str) -> Article {
        Article {
            id,
            title: title.to_string(),
            description: None,
            link: format!("https://example.com/{}", id),
            source: "Test Wire".to_string(),
            category: "Geopolitics".to_string(),
            published_date: None,
            fetched_date: "2026-08-06T00:00:00+00:00".to_string(),
            location_name: None,
            location_lat: None,
            location_lng: None,
        }
    }

    #[test]
    fn similar_titles_collapse_into_one_group() {
        let articles = vec![
            article(1, "Russia strikes Kyiv power grid"),
            article(2, "Russian strikes hit Kyiv power grid"),
            article(3, "Markets rally on rate cut"),
            article(4, "Russia strikes power grid around Kyiv"),
        ];

        let groups = group_articles(articles, DEFAULT_SIMILARITY_THRESHOLD, 10);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].main.id, 1);
        let related_ids: Vec<i64> = groups[0].related.iter().map(|a| a.id).collect();
        assert_eq!(related_ids, vec![2, 4]);
        assert_eq!(groups[1].main.id, 3);
        assert!(groups[1].related.is_empty());
    }

    #[test]
    fn limit_caps_groups_but_never_truncates_one() {
        let articles = vec![
            article(1, "Ceasefire talks resume in Cairo"),
            article(2, "Markets rally on rate cut"),
            article(3, "Cairo ceasefire talks resume today"),
            article(4, "Typhoon nears Philippine coast"),
        ];

        let groups = group_articles(articles, DEFAULT_SIMILARITY_THRESHOLD, 2);

        // Two groups max, and the first still absorbed its later duplicate.
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].main.id, 1);
        assert_eq!(groups[0].related.len(), 1);
        assert_eq!(groups[0].related[0].id, 3);
        assert_eq!(groups[1].main.id, 2);
    }

    #[test]
    fn consumed_articles_never_open_groups() {
        let articles = vec![
            article(1, "Russia strikes Kyiv power grid"),
            article(2, "Russian strikes hit Kyiv power grid"),
        ];

        let groups = group_articles(articles, DEFAULT_SIMILARITY_THRESHOLD, 10);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].related.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_articles(Vec::new(), DEFAULT_SIMILARITY_THRESHOLD, 10).is_empty());
    }
}
