use reviewdeck_models::{CanonicalReview, Platform, ReviewFilter};
use tracing::warn;

use crate::query::{RawReviewRow, StoreQuery};
use crate::{booking, facebook, google, tripadvisor};

/// Convert one persisted platform row into the canonical form.
///
/// Pure and infallible: adapters default missing optional fields instead of
/// erroring and clamp off-scale ratings instead of rejecting the row.
pub fn normalize_row(row: RawReviewRow) -> CanonicalReview {
    match row {
        RawReviewRow::Google(row) => google::normalize(row),
        RawReviewRow::Facebook(row) => facebook::normalize(row),
        RawReviewRow::Tripadvisor(row) => tripadvisor::normalize(row),
        RawReviewRow::Booking(row) => booking::normalize(row),
    }
}

/// Translate the shared filter into one platform's native query terms.
pub fn translate_filter(platform: Platform, filter: &ReviewFilter) -> StoreQuery {
    match platform {
        Platform::Google => google::translate_filter(filter),
        Platform::Facebook => facebook::translate_filter(filter),
        Platform::Tripadvisor => tripadvisor::translate_filter(filter),
        Platform::Booking => booking::translate_filter(filter),
    }
}

/// Whether any row on this platform can match the filter.
///
/// Only Facebook has unreachable rating buckets (rows project to exactly 5 or
/// 1); callers skip a platform with an unsatisfiable filter instead of
/// querying it with a filter that no longer narrows.
pub fn filter_satisfiable(platform: Platform, filter: &ReviewFilter) -> bool {
    match platform {
        Platform::Facebook => facebook::filter_satisfiable(filter),
        _ => true,
    }
}

/// Clamp a rating into the platform's native range.
///
/// Upstream scraping produces the occasional off-scale value; those are noise
/// to be contained, not errors to surface.
pub(crate) fn clamp_native_rating(platform: Platform, value: f64) -> f64 {
    let max = platform.native_scale().max();
    if !(1.0..=max).contains(&value) {
        warn!(
            platform = %platform,
            rating = value,
            "rating outside native 1-{max} range, clamping"
        );
    }
    value.clamp(1.0, max)
}
