use chrono::{DateTime, Utc};
use reviewdeck_models::review::{extras, ANONYMOUS_AUTHOR};
use reviewdeck_models::{CanonicalReview, Platform, ReviewFilter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::StoreQuery;

/// A Facebook page recommendation row.
///
/// Facebook dropped star ratings in 2018; rows carry only the boolean
/// recommendation plus page-level engagement counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacebookReviewRow {
    pub id: String,
    pub reviewer_name: Option<String>,
    pub reviewer_picture_url: Option<String>,
    pub recommended: bool,
    pub review_text: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub page_reply: Option<FacebookPageReply>,
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_important: bool,
    pub permalink: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacebookPageReply {
    pub message: String,
    pub created_time: Option<DateTime<Utc>>,
}

/// Facebook has no star rating; `recommended` maps to 5.0 and not-recommended
/// to 1.0. This is a lossy, intentional simplification carried over from the
/// source system (there is no "no opinion" case), kept rather than fixed so
/// cross-platform distributions stay comparable with historical data. The
/// original boolean is preserved in `extras` for the recommendation-rate
/// breakdown.
pub fn normalize(row: FacebookReviewRow) -> CanonicalReview {
    let (reply_text, reply_at) = match row.page_reply {
        Some(reply) => (Some(reply.message), reply.created_time),
        None => (None, None),
    };

    let mut extras_map = Map::new();
    extras_map.insert(extras::RECOMMENDED.to_string(), Value::Bool(row.recommended));
    extras_map.insert(extras::LIKES.to_string(), Value::from(row.likes_count));
    extras_map.insert(extras::COMMENTS.to_string(), Value::from(row.comments_count));

    CanonicalReview {
        id: row.id,
        platform: Platform::Facebook,
        author: row
            .reviewer_name
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        author_image_url: row.reviewer_picture_url,
        rating: if row.recommended { 5.0 } else { 1.0 },
        text: row.review_text,
        published_at: row.created_time,
        images: row.attachments,
        reply_text,
        reply_at,
        sentiment: row.sentiment_score,
        keywords: row.keywords,
        is_read: row.is_read,
        is_important: row.is_important,
        source_url: row.permalink,
        extras: extras_map,
    }
}

/// The 1-5 rating filter becomes a recommendation filter: buckets 4-5 select
/// recommending reviews, 1-2 the rest. Facebook rows only ever project to 5
/// or 1, so 4 is an approximation of 5 and 2 of 1; a filter naming both sides
/// cannot narrow anything and is dropped. A filter no Facebook row can match
/// (only the unmapped 3) must be caught with [`filter_satisfiable`] before
/// querying — translating it would silently widen to all rows.
pub fn translate_filter(filter: &ReviewFilter) -> StoreQuery {
    let recommended = filter.rating_in.as_ref().and_then(|buckets| {
        let wants_positive = buckets.iter().any(|b| *b >= 4);
        let wants_negative = buckets.iter().any(|b| *b <= 2);
        match (wants_positive, wants_negative) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    });

    StoreQuery {
        rating_in: None,
        recommended,
        sentiment: filter.sentiment,
        text_contains: filter.text_contains.clone(),
        date_range: filter.date_range,
        is_read: filter.is_read,
        is_important: filter.is_important,
        has_response: filter.has_response,
        sort_by: filter.sort_by,
        sort_order: filter.sort_order,
        offset: None,
        limit: None,
    }
}

/// Whether any Facebook row can match the rating filter at all.
///
/// Projected ratings are exactly 5 (recommended) or 1 (not), so a rating
/// filter is satisfiable only if it names a bucket on either side of the
/// unmapped 3. Callers skip the platform entirely when this is false instead
/// of letting the dropped filter return every row.
pub fn filter_satisfiable(filter: &ReviewFilter) -> bool {
    match &filter.rating_in {
        Some(buckets) => buckets.iter().any(|b| *b != 3),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(recommended: bool) -> FacebookReviewRow {
        FacebookReviewRow {
            id: "f1".to_string(),
            reviewer_name: None,
            reviewer_picture_url: None,
            recommended,
            review_text: Some("Lovely staff".to_string()),
            created_time: Some(Utc.with_ymd_and_hms(2024, 2, 1, 18, 30, 0).unwrap()),
            attachments: Vec::new(),
            page_reply: None,
            sentiment_score: None,
            keywords: Vec::new(),
            likes_count: 3,
            comments_count: 1,
            is_read: false,
            is_important: false,
            permalink: None,
        }
    }

    #[test]
    fn test_recommendation_maps_to_rating() {
        assert_eq!(normalize(row(true)).rating, 5.0);
        assert_eq!(normalize(row(false)).rating, 1.0);
    }

    #[test]
    fn test_engagement_and_flag_preserved_in_extras() {
        let review = normalize(row(true));
        assert_eq!(review.extras.get(extras::RECOMMENDED), Some(&Value::Bool(true)));
        assert_eq!(review.extra_f64(extras::LIKES), Some(3.0));
        assert_eq!(review.extra_f64(extras::COMMENTS), Some(1.0));
    }

    #[test]
    fn test_rating_filter_becomes_recommendation_filter() {
        let positive = ReviewFilter::new().with_rating_in(vec![4, 5]);
        assert_eq!(translate_filter(&positive).recommended, Some(true));

        let negative = ReviewFilter::new().with_rating_in(vec![1]);
        assert_eq!(translate_filter(&negative).recommended, Some(false));

        let both = ReviewFilter::new().with_rating_in(vec![1, 5]);
        assert_eq!(translate_filter(&both).recommended, None);

        let neutral_only = ReviewFilter::new().with_rating_in(vec![3]);
        assert_eq!(translate_filter(&neutral_only).recommended, None);
    }

    #[test]
    fn test_neutral_only_rating_filter_is_unsatisfiable() {
        assert!(!filter_satisfiable(
            &ReviewFilter::new().with_rating_in(vec![3])
        ));
        assert!(!filter_satisfiable(
            &ReviewFilter::new().with_rating_in(Vec::new())
        ));
        assert!(filter_satisfiable(
            &ReviewFilter::new().with_rating_in(vec![3, 4])
        ));
        assert!(filter_satisfiable(&ReviewFilter::new()));
    }
}
