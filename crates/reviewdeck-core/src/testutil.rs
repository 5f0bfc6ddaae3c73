//! Shared constructors for the calculator and bucketer tests.

use chrono::{TimeZone, Utc};
use reviewdeck_models::review::ANONYMOUS_AUTHOR;
use reviewdeck_models::{CanonicalReview, Platform};
use serde_json::Map;

pub fn review(platform: Platform, rating: f64) -> CanonicalReview {
    CanonicalReview {
        id: format!("{platform}-{rating}"),
        platform,
        author: ANONYMOUS_AUTHOR.to_string(),
        author_image_url: None,
        rating,
        text: None,
        published_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()),
        images: Vec::new(),
        reply_text: None,
        reply_at: None,
        sentiment: None,
        keywords: Vec::new(),
        is_read: false,
        is_important: false,
        source_url: None,
        extras: Map::new(),
    }
}

pub fn review_on_day(platform: Platform, rating: f64, y: i32, m: u32, d: u32) -> CanonicalReview {
    let mut r = review(platform, rating);
    r.id = format!("{platform}-{y}-{m}-{d}");
    r.published_at = Some(Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap());
    r
}
