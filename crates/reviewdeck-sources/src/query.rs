use reviewdeck_models::{DateRange, Platform, SentimentLabel, SortKey, SortOrder};
use serde::{Deserialize, Serialize};

use crate::booking::BookingReviewRow;
use crate::facebook::FacebookReviewRow;
use crate::google::GoogleReviewRow;
use crate::tripadvisor::TripadvisorReviewRow;

/// A persisted review row as one platform's store returns it.
///
/// The four platform schemas are a closed set of variant shapes with no
/// common base type upstream, so they are modeled as a tagged union and the
/// adapters dispatch on the tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum RawReviewRow {
    Google(GoogleReviewRow),
    Facebook(FacebookReviewRow),
    Tripadvisor(TripadvisorReviewRow),
    Booking(BookingReviewRow),
}

impl RawReviewRow {
    pub fn platform(&self) -> Platform {
        match self {
            RawReviewRow::Google(_) => Platform::Google,
            RawReviewRow::Facebook(_) => Platform::Facebook,
            RawReviewRow::Tripadvisor(_) => Platform::Tripadvisor,
            RawReviewRow::Booking(_) => Platform::Booking,
        }
    }
}

/// A [`ReviewFilter`](reviewdeck_models::ReviewFilter) translated into one
/// platform's native terms.
///
/// Scale conversion happens here, at the adapter boundary, so stores never
/// reinterpret rating values: `rating_in` already holds native-scale values
/// (1-10 for Booking) and Facebook's rating filter arrives as `recommended`.
/// `offset`/`limit` are only set for single-platform queries; the unified
/// inbox paginates the merged list in memory instead.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoreQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_in: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_response: Option<bool>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}
