//! Lexical title similarity used for near-duplicate story grouping.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "in", "on", "at", "to", "for", "of", "and", "is", "are", "was", "were",
    ]
    .into_iter()
    .collect()
});

/// Reduce a title to its set of significant tokens.
///
/// Lowercases, strips everything that is neither a word character nor
/// whitespace, splits on whitespace, and drops stopwords and tokens of two
/// characters or fewer.
pub fn tokenize(title: &str) -> HashSet<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word) && word.chars().count() > 2)
        .map(|word| word.to_string())
        .collect()
}

/// Jaccard index of the two titles' token sets, in [0, 1].
///
/// An empty token set on either side scores 0; that is defined behavior,
/// not an error.
pub fn score(title_a: &str, title_b: &str) -> f64 {
    let words_a = tokenize(title_a);
    let words_b = tokenize(title_b);

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f64 / union as f64
}
