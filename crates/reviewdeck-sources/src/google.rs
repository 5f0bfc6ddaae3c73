use chrono::{DateTime, Utc};
use reviewdeck_models::review::ANONYMOUS_AUTHOR;
use reviewdeck_models::{CanonicalReview, Platform, ReviewFilter};
use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::adapter::clamp_native_rating;
use crate::query::StoreQuery;

/// A Google review row as persisted from the Business Profile scrape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleReviewRow {
    #[serde(rename = "review_id")]
    pub review_id: String,
    pub author_name: Option<String>,
    pub author_photo_url: Option<String>,
    /// Native 1-5 stars.
    pub star_rating: f64,
    pub text: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub reply: Option<GoogleReply>,
    /// NLP score attached upstream, in [-1, 1].
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_important: bool,
    pub review_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleReply {
    pub text: String,
    pub replied_at: Option<DateTime<Utc>>,
}

/// Google ratings are already on the shared 1-5 scale and pass through
/// unchanged (clamped against off-scale scraper noise).
pub fn normalize(row: GoogleReviewRow) -> CanonicalReview {
    let (reply_text, reply_at) = match row.reply {
        Some(reply) => (Some(reply.text), reply.replied_at),
        None => (None, None),
    };

    CanonicalReview {
        id: row.review_id,
        platform: Platform::Google,
        author: row.author_name.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        author_image_url: row.author_photo_url,
        rating: clamp_native_rating(Platform::Google, row.star_rating),
        text: row.text,
        published_at: row.published_at,
        images: row.photos,
        reply_text,
        reply_at,
        sentiment: row.sentiment_score,
        keywords: row.keywords,
        is_read: row.is_read,
        is_important: row.is_important,
        source_url: row.review_url,
        extras: Map::new(),
    }
}

/// Google's store speaks the shared 1-5 scale, so the filter maps across
/// without scale conversion.
pub fn translate_filter(filter: &ReviewFilter) -> StoreQuery {
    StoreQuery {
        rating_in: filter.rating_in.clone(),
        recommended: None,
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
