use chrono::{DateTime, Utc};
use reviewdeck_models::review::{extras, ANONYMOUS_AUTHOR};
use reviewdeck_models::{CanonicalReview, Platform, ReviewFilter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::adapter::clamp_native_rating;
use crate::query::StoreQuery;

/// A Booking.com guest review row.
///
/// Booking splits the body into liked/disliked halves and scores on 1-10.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingReviewRow {
    pub review_id: String,
    pub guest_name: Option<String>,
    pub guest_avatar_url: Option<String>,
    /// Native 1-10 score.
    pub rating: f64,
    pub headline: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub property_response: Option<BookingPropertyResponse>,
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// solo, couple, family_with_young_children, family_with_older_children,
    /// group_of_friends or business.
    pub guest_type: Option<String>,
    /// cleanliness/comfort/location/facilities/staff/value/wifi, each 1-10;
    /// wifi in particular is often absent.
    #[serde(default)]
    pub subratings: BTreeMap<String, f64>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_important: bool,
    pub review_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingPropertyResponse {
    pub text: String,
    pub responded_at: Option<DateTime<Utc>>,
}

/// Booking keeps its native 1-10 value in `rating`; the 1-5 bucket used for
/// cross-platform comparison is derived on demand by
/// [`CanonicalReview::normalized_rating`] (`clamp(round(r / 2), 1, 5)`), never
/// written back over the native score.
pub fn normalize(row: BookingReviewRow) -> CanonicalReview {
    let (reply_text, reply_at) = match row.property_response {
        Some(resp) => (Some(resp.text), resp.responded_at),
        None => (None, None),
    };

    let text = join_review_body(row.headline, row.pros, row.cons);

    let mut extras_map = Map::new();
    if let Some(guest_type) = row.guest_type {
        extras_map.insert(extras::GUEST_TYPE.to_string(), Value::String(guest_type));
    }
    if !row.subratings.is_empty() {
        let subratings: Map<String, Value> = row
            .subratings
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        extras_map.insert(extras::SUBRATINGS.to_string(), Value::Object(subratings));
    }

    CanonicalReview {
        id: row.review_id,
        platform: Platform::Booking,
        author: row.guest_name.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        author_image_url: row.guest_avatar_url,
        rating: clamp_native_rating(Platform::Booking, row.rating),
        text,
        published_at: row.reviewed_at,
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

fn join_review_body(
    headline: Option<String>,
    pros: Option<String>,
    cons: Option<String>,
) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(headline) = headline {
        parts.push(headline);
    }
    if let Some(pros) = pros {
        parts.push(format!("Liked: {pros}"));
    }
    if let Some(cons) = cons {
        parts.push(format!("Disliked: {cons}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Expand each requested 1-5 bucket into the 1-10 scores that round into it,
/// so the store can match on native values. Bucket `b` covers
/// `2b - 1 ..= 2b` (bucket 1 additionally covers the score 1).
pub fn translate_filter(filter: &ReviewFilter) -> StoreQuery {
    let rating_in = filter.rating_in.as_ref().map(|buckets| {
        let mut native: Vec<u8> = Vec::new();
        for bucket in buckets {
            for score in 1..=10u8 {
                if ((score as f64 / 2.0).round() as i64).clamp(1, 5) as u8 == *bucket {
                    native.push(score);
                }
            }
        }
        native.sort_unstable();
        native.dedup();
        native
    });

    StoreQuery {
        rating_in,
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
