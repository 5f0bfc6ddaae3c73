//! Keyword aggregation across review sets.

use std::collections::HashMap;

use reviewdeck_models::CanonicalReview;
use serde::{Deserialize, Serialize};

/// Articles, pronouns and auxiliary verbs that carry no signal when mining
/// free text. Pre-tagged keyword lists bypass this set entirely.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we",
    "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their", "is",
    "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "shall", "should", "can", "could", "may", "might", "must", "and", "or",
    "but", "with", "for", "not", "very",
];

/// Tokens shorter than this are dropped when extracting from free text.
const MIN_TOKEN_LEN: usize = 4;

/// Default list size for standard reports.
pub const TOP_KEYWORDS: usize = 10;
/// List size for detailed reports.
pub const TOP_KEYWORDS_DETAILED: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Aggregate the pre-tagged keyword lists of a review set.
///
/// Keywords are lowercased and counted as-is (no stop-word or length
/// filtering; they were already curated upstream). Returns the top `limit`
/// by frequency, ties broken by first-seen order.
pub fn aggregate_keywords(reviews: &[CanonicalReview], limit: usize) -> Vec<KeywordCount> {
    let tokens = reviews
        .iter()
        .flat_map(|r| r.keywords.iter())
        .map(|k| k.to_lowercase());
    top_by_frequency(tokens, limit)
}

/// Mine keywords out of free review text.
///
/// Lowercases, splits on non-alphanumeric boundaries, drops stop words and
/// tokens shorter than four characters, then returns the top `limit` by
/// frequency with first-seen tie-breaking.
pub fn extract_keywords(reviews: &[CanonicalReview], limit: usize) -> Vec<KeywordCount> {
    let tokens = reviews
        .iter()
        .filter_map(|r| r.text.as_deref())
        .flat_map(|text| {
            text.to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()));
    top_by_frequency(tokens, limit)
}

fn top_by_frequency(tokens: impl Iterator<Item = String>, limit: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    // First-seen order is the tie-break, so remember arrival positions.
    let mut order: Vec<String> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let entry = counts.entry(token.clone()).or_insert(0);
        if *entry == 0 {
            order.push(token);
        }
        *entry += 1;
    }

    let mut ranked: Vec<(usize, String)> = order.into_iter().enumerate().collect();
    ranked.sort_by(|(seen_a, token_a), (seen_b, token_b)| {
        counts[token_b]
            .cmp(&counts[token_a])
            .then(seen_a.cmp(seen_b))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, keyword)| {
            let count = counts[&keyword];
            KeywordCount { keyword, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::review;
    use reviewdeck_models::Platform;

    #[test]
    fn test_pretagged_keywords_counted_as_is() {
        let mut a = review(Platform::Google, 5.0);
        a.keywords = vec!["Coffee".to_string(), "tea".to_string()];
        let mut b = review(Platform::Google, 4.0);
        b.keywords = vec!["coffee".to_string()];

        let top = aggregate_keywords(&[a, b], TOP_KEYWORDS);
        assert_eq!(top[0].keyword, "coffee");
        assert_eq!(top[0].count, 2);
        // "tea" is below the free-text minimum token length; pre-tagged
        // lists are counted as-is with no stop-word or length filtering.
        assert_eq!(top[1].keyword, "tea");
    }

    #[test]
    fn test_free_text_drops_stop_words_and_short_tokens() {
        let mut r = review(Platform::Google, 5.0);
        r.text = Some("The staff were amazing and the staff remembered us".to_string());

        let top = extract_keywords(&[r], TOP_KEYWORDS);
        let words: Vec<&str> = top.iter().map(|k| k.keyword.as_str()).collect();
        assert!(words.contains(&"staff"));
        assert!(words.contains(&"amazing"));
        assert!(!words.contains(&"the"));
        assert!(!words.contains(&"and"));
        assert!(!words.contains(&"us"));
        assert_eq!(top[0].keyword, "staff");
        assert_eq!(top[0].count, 2);
    }

    #[test]
    fn test_ties_break_by_first_seen_order() {
        let mut r = review(Platform::Google, 5.0);
        r.text = Some("garden terrace garden terrace breakfast".to_string());

        let top = extract_keywords(&[r], 2);
        assert_eq!(top[0].keyword, "garden");
        assert_eq!(top[1].keyword, "terrace");
    }

    #[test]
    fn test_limit_truncates() {
        let mut r = review(Platform::Google, 5.0);
        r.keywords = (0..30).map(|i| format!("keyword{i}")).collect();
        assert_eq!(aggregate_keywords(&[r.clone()], TOP_KEYWORDS).len(), 10);
        assert_eq!(aggregate_keywords(&[r], TOP_KEYWORDS_DETAILED).len(), 20);
    }
}
