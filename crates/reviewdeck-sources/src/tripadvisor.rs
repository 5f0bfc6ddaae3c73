use chrono::{DateTime, Utc};
use reviewdeck_models::review::{extras, ANONYMOUS_AUTHOR};
use reviewdeck_models::{CanonicalReview, Platform, ReviewFilter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::adapter::clamp_native_rating;
use crate::query::StoreQuery;

/// A TripAdvisor review row from the location scrape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripadvisorReviewRow {
    pub id: String,
    pub user_name: Option<String>,
    pub user_avatar_url: Option<String>,
    /// Native 1-5 bubbles.
    pub rating: f64,
    pub title: Option<String>,
    pub text: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub owner_response: Option<TripadvisorOwnerResponse>,
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// FAMILY, COUPLES, SOLO, BUSINESS or FRIENDS.
    pub trip_type: Option<String>,
    /// service/food/value/atmosphere/cleanliness/location/rooms/sleep_quality,
    /// each 1-5; not every review carries every field.
    #[serde(default)]
    pub subratings: BTreeMap<String, f64>,
    #[serde(default)]
    pub helpful_votes: u64,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_important: bool,
    pub review_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripadvisorOwnerResponse {
    pub text: String,
    pub published_date: Option<DateTime<Utc>>,
}

/// TripAdvisor ratings pass through unchanged (native 1-5). The title is
/// folded into the text body; trip type, sub-ratings and helpful votes ride
/// along in `extras`.
pub fn normalize(row: TripadvisorReviewRow) -> CanonicalReview {
    let (reply_text, reply_at) = match row.owner_response {
        Some(resp) => (Some(resp.text), resp.published_date),
        None => (None, None),
    };

    let text = match (row.title, row.text) {
        (Some(title), Some(body)) => Some(format!("{title}\n{body}")),
        (Some(title), None) => Some(title),
        (None, body) => body,
    };

    let mut extras_map = Map::new();
    if let Some(trip_type) = row.trip_type {
        extras_map.insert(extras::TRIP_TYPE.to_string(), Value::String(trip_type));
    }
    if !row.subratings.is_empty() {
        let subratings: Map<String, Value> = row
            .subratings
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        extras_map.insert(extras::SUBRATINGS.to_string(), Value::Object(subratings));
    }
    extras_map.insert(
        extras::HELPFUL_VOTES.to_string(),
        Value::from(row.helpful_votes),
    );

    CanonicalReview {
        id: row.id,
        platform: Platform::Tripadvisor,
        author: row.user_name.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        author_image_url: row.user_avatar_url,
        rating: clamp_native_rating(Platform::Tripadvisor, row.rating),
        text,
        published_at: row.published_date,
        images: row.photos,
        reply_text,
        reply_at,
        sentiment: row.sentiment_score,
        keywords: row.keywords,
        is_read: row.is_read,
        is_important: row.is_important,
        source_url: row.review_url,
        extras: extras_map,
    }
}

/// Same 1-5 scale as the shared filter, so ratings map across directly.
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
