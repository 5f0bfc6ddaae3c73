//! Cross-platform merged review inbox.
//!
//! One request fans out into at most four concurrent store fetches, then
//! everything is normalized, merged, sorted once globally and paginated as an
//! in-memory slice. Per-platform `LIMIT` would be wrong here: a correct page
//! needs a single ordering across heterogeneous sources.

use futures::future::join_all;
use reviewdeck_config::InboxOptions;
use reviewdeck_models::{
    AggregateReport, CanonicalReview, PageInfo, Pagination, Platform, ReviewFilter, SortKey,
    SortOrder,
};
use reviewdeck_sources::{filter_satisfiable, normalize_row, translate_filter, StoreRegistry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::report::compute_report;

/// One platform's fetch failed during a unified call. Recovered locally (the
/// platform contributes an empty result) and surfaced as response metadata
/// for observability; never fails the whole request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceFailure {
    pub platform: Platform,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedInbox {
    pub reviews: Vec<CanonicalReview>,
    /// Computed over the full filtered set, not the page slice, so the
    /// numbers do not change while paging.
    pub stats: AggregateReport,
    pub pagination: PageInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_errors: Vec<SourceFailure>,
}

/// Fetch and normalize reviews from every requested-and-registered platform
/// concurrently. Platforms that are filtered out or unregistered never cost
/// a round trip. Shared by the inbox and the unified trend.
pub(crate) async fn fetch_unified(
    registry: &StoreRegistry,
    filter: &ReviewFilter,
) -> (Vec<CanonicalReview>, Vec<SourceFailure>) {
    let mut platforms: Vec<Platform> = filter
        .enabled_platforms()
        .into_iter()
        .filter(|p| registry.is_registered(*p))
        .filter(|p| {
            let satisfiable = filter_satisfiable(*p, filter);
            if !satisfiable {
                debug!(platform = %p, "no row can match the rating filter, skipping platform");
            }
            satisfiable
        })
        .collect();
    platforms.sort();
    platforms.dedup();

    let fetches: Vec<_> = platforms
        .into_iter()
        .filter_map(|platform| registry.get(platform).map(|store| (platform, store)))
        .map(|(platform, store)| {
            let query = translate_filter(platform, filter);
            async move {
                let result = store.query(&query).await;
                (platform, result)
            }
        })
        .collect();

    let results = join_all(fetches).await;

    let mut reviews = Vec::new();
    let mut failures = Vec::new();
    for (platform, result) in results {
        match result {
            Ok(rows) => {
                debug!(platform = %platform, rows = rows.len(), "platform fetch succeeded");
                reviews.extend(rows.into_iter().map(normalize_row));
            }
            Err(e) => {
                warn!(platform = %platform, error = %e, "platform fetch failed, continuing without it");
                failures.push(SourceFailure {
                    platform,
                    error: e.to_string(),
                });
            }
        }
    }
    (reviews, failures)
}

/// Merge all enabled platforms into one sorted, paginated inbox.
pub async fn unified_inbox(
    registry: &StoreRegistry,
    filter: &ReviewFilter,
    pagination: Pagination,
    options: &InboxOptions,
) -> UnifiedInbox {
    let (mut reviews, source_errors) = fetch_unified(registry, filter).await;

    sort_unified(&mut reviews, filter.sort_by, filter.sort_order);

    let total = reviews.len();
    let stats = compute_report(&reviews);

    let limit = if pagination.limit == 0 {
        options.default_page_size
    } else {
        pagination.limit.min(options.max_page_size)
    };
    let start = pagination.offset.min(total);
    let end = (start + limit).min(total);
    let page = reviews[start..end].to_vec();

    UnifiedInbox {
        reviews: page,
        stats,
        pagination: PageInfo {
            offset: pagination.offset,
            limit,
            total,
        },
        source_errors,
    }
}

/// Sort the merged list by the requested key and direction.
///
/// Ties always break by platform name ascending and then by review id; the
/// tie-break is deliberately direction-independent so a repeated call pages
/// through an identical ordering.
fn sort_unified(reviews: &mut [CanonicalReview], key: SortKey, order: SortOrder) {
    reviews.sort_by(|a, b| {
        let primary = match key {
            SortKey::Date => a.published_at.cmp(&b.published_at),
            SortKey::Rating => a
                .normalized_rating()
                .cmp(&b.normalized_rating())
                .then_with(|| a.rating.total_cmp(&b.rating)),
            SortKey::Sentiment => sentiment_key(a).total_cmp(&sentiment_key(b)),
            SortKey::Platform => a.platform.cmp(&b.platform),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary
            .then_with(|| secondary_date(a, b))
            .then_with(|| a.platform.cmp(&b.platform))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn secondary_date(a: &CanonicalReview, b: &CanonicalReview) -> Ordering {
    // Newest first as the secondary criterion for non-date keys.
    b.published_at.cmp(&a.published_at)
}

fn sentiment_key(review: &CanonicalReview) -> f64 {
    // Reviews without a score sort below any scored review.
    review.sentiment.unwrap_or(f64::NEG_INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use reviewdeck_models::Platform;
    use reviewdeck_sources::booking::BookingReviewRow;
    use reviewdeck_sources::facebook::FacebookReviewRow;
    use reviewdeck_sources::google::GoogleReviewRow;
    use reviewdeck_sources::{RawReviewRow, ReviewStore, StoreError, StoreQuery};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn google_row(id: &str, rating: f64, published_at: DateTime<Utc>) -> RawReviewRow {
        RawReviewRow::Google(GoogleReviewRow {
            review_id: id.to_string(),
            author_name: None,
            author_photo_url: None,
            star_rating: rating,
            text: None,
            published_at: Some(published_at),
            photos: Vec::new(),
            reply: None,
            sentiment_score: None,
            keywords: Vec::new(),
            is_read: false,
            is_important: false,
            review_url: None,
        })
    }

    fn booking_row(id: &str, rating: f64, published_at: DateTime<Utc>) -> RawReviewRow {
        RawReviewRow::Booking(BookingReviewRow {
            review_id: id.to_string(),
            guest_name: None,
            guest_avatar_url: None,
            rating,
            headline: None,
            pros: None,
            cons: None,
            reviewed_at: Some(published_at),
            photos: Vec::new(),
            property_response: None,
            sentiment_score: None,
            keywords: Vec::new(),
            guest_type: None,
            subratings: BTreeMap::new(),
            is_read: false,
            is_important: false,
            review_url: None,
        })
    }

    fn facebook_row(id: &str, recommended: bool, published_at: DateTime<Utc>) -> RawReviewRow {
        RawReviewRow::Facebook(FacebookReviewRow {
            id: id.to_string(),
            reviewer_name: None,
            reviewer_picture_url: None,
            recommended,
            review_text: None,
            created_time: Some(published_at),
            attachments: Vec::new(),
            page_reply: None,
            sentiment_score: None,
            keywords: Vec::new(),
            likes_count: 0,
            comments_count: 0,
            is_read: false,
            is_important: false,
            permalink: None,
        })
    }

    struct FixedStore {
        platform: Platform,
        rows: Vec<RawReviewRow>,
        calls: AtomicUsize,
    }

    impl FixedStore {
        fn new(platform: Platform, rows: Vec<RawReviewRow>) -> Self {
            Self {
                platform,
                rows,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReviewStore for FixedStore {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn query(&self, _query: &StoreQuery) -> Result<Vec<RawReviewRow>, StoreError> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(self.rows.clone())
        }
    }

    struct FailingStore(Platform);

    #[async_trait]
    impl ReviewStore for FailingStore {
        fn platform(&self) -> Platform {
            self.0
        }

        async fn query(&self, _query: &StoreQuery) -> Result<Vec<RawReviewRow>, StoreError> {
            Err(StoreError::query(self.0, "connection reset"))
        }
    }

    #[tokio::test]
    async fn test_mixed_platform_stats_use_normalized_buckets() {
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(FixedStore::new(
            Platform::Google,
            vec![
                google_row("g1", 5.0, ts(2024, 1, 1, 10)),
                google_row("g2", 3.0, ts(2024, 1, 2, 10)),
            ],
        )));
        registry.register(Arc::new(FixedStore::new(
            Platform::Booking,
            vec![
                booking_row("b1", 8.0, ts(2024, 1, 3, 10)),
                booking_row("b2", 2.0, ts(2024, 1, 4, 10)),
            ],
        )));

        let filter =
            ReviewFilter::new().with_platforms(vec![Platform::Google, Platform::Booking]);
        let inbox = unified_inbox(
            &registry,
            &filter,
            Pagination::default(),
            &InboxOptions::default(),
        )
        .await;

        assert_eq!(inbox.stats.total_reviews, 4);
        let dist = &inbox.stats.rating_distribution;
        assert_eq!(dist.get(5), 1);
        assert_eq!(dist.get(4), 1); // booking 8 -> 4
        assert_eq!(dist.get(3), 1);
        assert_eq!(dist.get(1), 1); // booking 2 -> 1
        assert_eq!(dist.total(), 4);
        assert!(inbox.source_errors.is_empty());
    }

    #[tokio::test]
    async fn test_date_tie_breaks_by_platform_ascending_across_calls() {
        let tie = ts(2024, 5, 1, 12);
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(FixedStore::new(
            Platform::Google,
            vec![google_row("g1", 4.0, tie)],
        )));
        registry.register(Arc::new(FixedStore::new(
            Platform::Facebook,
            vec![facebook_row("f1", true, tie)],
        )));

        let filter = ReviewFilter::new().with_sort(SortKey::Date, SortOrder::Desc);
        for _ in 0..3 {
            let inbox = unified_inbox(
                &registry,
                &filter,
                Pagination::default(),
                &InboxOptions::default(),
            )
            .await;
            let platforms: Vec<Platform> =
                inbox.reviews.iter().map(|r| r.platform).collect();
            // facebook < google in the fixed alphabetical tie-break.
            assert_eq!(platforms, vec![Platform::Facebook, Platform::Google]);
        }
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_platforms() {
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(FixedStore::new(
            Platform::Google,
            vec![google_row("g1", 5.0, ts(2024, 1, 1, 8))],
        )));
        registry.register(Arc::new(FixedStore::new(
            Platform::Booking,
            vec![booking_row("b1", 9.0, ts(2024, 1, 2, 8))],
        )));
        registry.register(Arc::new(FailingStore(Platform::Facebook)));

        let inbox = unified_inbox(
            &registry,
            &ReviewFilter::new(),
            Pagination::default(),
            &InboxOptions::default(),
        )
        .await;

        assert_eq!(inbox.reviews.len(), 2);
        assert_eq!(inbox.source_errors.len(), 1);
        assert_eq!(inbox.source_errors[0].platform, Platform::Facebook);
        assert!(inbox.source_errors[0].error.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_stats_cover_full_set_not_page_slice() {
        let rows: Vec<RawReviewRow> = (0..5)
            .map(|i| google_row(&format!("g{i}"), 4.0, ts(2024, 1, 1 + i, 9)))
            .collect();
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(FixedStore::new(Platform::Google, rows)));

        let inbox = unified_inbox(
            &registry,
            &ReviewFilter::new(),
            Pagination { offset: 0, limit: 2 },
            &InboxOptions::default(),
        )
        .await;

        assert_eq!(inbox.reviews.len(), 2);
        assert_eq!(inbox.stats.total_reviews, 5);
        assert_eq!(inbox.pagination.total, 5);
        assert_eq!(inbox.pagination.limit, 2);
    }

    #[tokio::test]
    async fn test_offset_beyond_total_yields_empty_page() {
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(FixedStore::new(
            Platform::Google,
            vec![google_row("g1", 4.0, ts(2024, 1, 1, 9))],
        )));

        let inbox = unified_inbox(
            &registry,
            &ReviewFilter::new(),
            Pagination { offset: 10, limit: 5 },
            &InboxOptions::default(),
        )
        .await;
        assert!(inbox.reviews.is_empty());
        assert_eq!(inbox.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_excluded_platform_never_queried() {
        let google = Arc::new(FixedStore::new(
            Platform::Google,
            vec![google_row("g1", 4.0, ts(2024, 1, 1, 9))],
        ));
        let booking = Arc::new(FixedStore::new(
            Platform::Booking,
            vec![booking_row("b1", 8.0, ts(2024, 1, 1, 9))],
        ));
        let mut registry = StoreRegistry::new();
        registry.register(google.clone());
        registry.register(booking.clone());

        let filter = ReviewFilter::new().with_platforms(vec![Platform::Google]);
        let inbox = unified_inbox(
            &registry,
            &filter,
            Pagination::default(),
            &InboxOptions::default(),
        )
        .await;

        assert_eq!(inbox.reviews.len(), 1);
        assert_eq!(google.calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(booking.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_neutral_rating_filter_skips_facebook() {
        let google = Arc::new(FixedStore::new(
            Platform::Google,
            vec![google_row("g1", 3.0, ts(2024, 1, 1, 9))],
        ));
        let facebook = Arc::new(FixedStore::new(
            Platform::Facebook,
            vec![facebook_row("f1", true, ts(2024, 1, 2, 9))],
        ));
        let mut registry = StoreRegistry::new();
        registry.register(google.clone());
        registry.register(facebook.clone());

        // No Facebook row can land in bucket 3, so the platform is skipped
        // instead of queried with a rating filter that no longer narrows.
        let filter = ReviewFilter::new().with_rating_in(vec![3]);
        let inbox = unified_inbox(
            &registry,
            &filter,
            Pagination::default(),
            &InboxOptions::default(),
        )
        .await;

        assert_eq!(facebook.calls.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(google.calls.load(AtomicOrdering::SeqCst), 1);
        assert!(inbox.reviews.iter().all(|r| r.platform == Platform::Google));
        assert!(inbox.source_errors.is_empty());
    }

    #[tokio::test]
    async fn test_limit_clamped_to_max_page_size() {
        let rows: Vec<RawReviewRow> = (0..5)
            .map(|i| google_row(&format!("g{i}"), 4.0, ts(2024, 1, 1 + i, 9)))
            .collect();
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(FixedStore::new(Platform::Google, rows)));

        let options = InboxOptions {
            default_page_size: 2,
            max_page_size: 3,
        };
        let inbox = unified_inbox(
            &registry,
            &ReviewFilter::new(),
            Pagination { offset: 0, limit: 50 },
            &options,
        )
        .await;
        assert_eq!(inbox.pagination.limit, 3);
        assert_eq!(inbox.reviews.len(), 3);

        let defaulted = unified_inbox(
            &registry,
            &ReviewFilter::new(),
            Pagination { offset: 0, limit: 0 },
            &options,
        )
        .await;
        assert_eq!(defaulted.pagination.limit, 2);
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let mut reviews = vec![
            crate::testutil::review(Platform::Google, 3.0),
            crate::testutil::review(Platform::Booking, 9.0),
            crate::testutil::review(Platform::Google, 5.0),
        ];
        sort_unified(&mut reviews, SortKey::Rating, SortOrder::Desc);
        let buckets: Vec<u8> = reviews.iter().map(|r| r.normalized_rating()).collect();
        assert_eq!(buckets, vec![5, 5, 3]);
        // Equal buckets: booking 9.0 has the higher native value underneath.
        assert_eq!(reviews[0].platform, Platform::Booking);
    }
}
