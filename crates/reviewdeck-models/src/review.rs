use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::platform::Platform;

/// The platform-agnostic review record.
///
/// Instances are computed fresh from persisted platform rows on every read and
/// discarded after serialization; nothing mutates a canonical review in place.
/// `rating` always stays on the platform's native scale (1-10 for Booking) —
/// the 1-5 projection used for cross-platform comparison is derived on demand
/// via [`CanonicalReview::normalized_rating`] so the native value is never lost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalReview {
    /// Source-system primary key, opaque to us.
    pub id: String,
    pub platform: Platform,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_image_url: Option<String>,
    /// Rating on the platform's native scale.
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Mandatory upstream, but scraped rows occasionally arrive without it.
    /// Such rows are counted and dropped by the trend bucketer and sort as
    /// the oldest entries in the unified inbox.
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_at: Option<DateTime<Utc>>,
    /// NLP score in [-1, 1] when one was computed upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Platform-specific extension fields (sub-ratings, trip/guest type,
    /// helpful votes). Kept as an open side-map instead of widening the
    /// struct with optional-everything fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

/// Default author when the source row has none.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Well-known keys inside [`CanonicalReview::extras`]. Adapters write them,
/// calculators read them; nothing else should invent keys ad hoc.
pub mod extras {
    /// JSON object of sub-rating name -> numeric value (TripAdvisor, Booking).
    pub const SUBRATINGS: &str = "subratings";
    /// TripAdvisor trip type (FAMILY, COUPLES, SOLO, BUSINESS, FRIENDS).
    pub const TRIP_TYPE: &str = "trip_type";
    /// Booking guest type (solo, couple, family_with_young_children, ...).
    pub const GUEST_TYPE: &str = "guest_type";
    /// Facebook recommendation flag, preserved losslessly next to the
    /// projected 1-5 rating.
    pub const RECOMMENDED: &str = "recommended";
    pub const LIKES: &str = "likes";
    pub const COMMENTS: &str = "comments";
    /// TripAdvisor helpful-vote count.
    pub const HELPFUL_VOTES: &str = "helpful_votes";
}

impl CanonicalReview {
    pub fn has_reply(&self) -> bool {
        self.reply_text.is_some()
    }

    /// Project the native rating onto the shared 1-5 integer scale.
    ///
    /// Booking's 1-10 halves into 1-5 by rounding (`9 -> 5`, `5 -> 3`); the
    /// other platforms round their native value. Always clamped into [1, 5]
    /// so off-scale upstream noise cannot escape the buckets.
    pub fn normalized_rating(&self) -> u8 {
        let projected = match self.platform {
            Platform::Booking => self.rating / 2.0,
            _ => self.rating,
        };
        (projected.round() as i64).clamp(1, 5) as u8
    }

    /// Read a numeric extension field (e.g. a sub-rating or vote count).
    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extras.get(key).and_then(Value::as_f64)
    }

    /// Read a string extension field (e.g. trip type or guest type).
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(Value::as_str)
    }
}
