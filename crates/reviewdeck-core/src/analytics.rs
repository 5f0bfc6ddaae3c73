//! Single-platform and cross-platform analytics entry points.

use reviewdeck_models::{AggregateReport, CanonicalReview, DateRange, Platform, ReviewFilter};
use reviewdeck_sources::{normalize_row, translate_filter, StoreRegistry};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::CoreError;
use crate::inbox::{fetch_unified, SourceFailure};
use crate::report::compute_report;
use crate::trend::{
    bucket_by_day, bucket_recommendations_by_day, RecommendationTrendReport, TrendReport,
};

fn platform_filter(platform: Platform, date_range: Option<DateRange>) -> ReviewFilter {
    let filter = ReviewFilter::new().with_platforms(vec![platform]);
    match date_range {
        Some(range) => filter.with_date_range(range),
        None => filter,
    }
}

async fn fetch_platform(
    registry: &StoreRegistry,
    platform: Platform,
    date_range: Option<DateRange>,
) -> Result<Vec<CanonicalReview>, CoreError> {
    let store = registry
        .get(platform)
        .ok_or(CoreError::NotFound(platform))?;
    let query = translate_filter(platform, &platform_filter(platform, date_range));
    let rows = store.query(&query).await?;
    Ok(rows.into_iter().map(normalize_row).collect())
}

/// Full aggregate report for one platform. An empty result set produces a
/// zeroed report; only a missing platform connection is a hard error.
#[instrument(skip(registry))]
pub async fn platform_analytics(
    registry: &StoreRegistry,
    platform: Platform,
    date_range: Option<DateRange>,
) -> Result<AggregateReport, CoreError> {
    let reviews = fetch_platform(registry, platform, date_range).await?;
    Ok(compute_report(&reviews))
}

/// Gap-filled daily trend for one platform over the given range.
#[instrument(skip(registry))]
pub async fn platform_trend(
    registry: &StoreRegistry,
    platform: Platform,
    date_range: DateRange,
) -> Result<TrendReport, CoreError> {
    let reviews = fetch_platform(registry, platform, Some(date_range)).await?;
    Ok(bucket_by_day(
        &reviews,
        date_range.from.date_naive(),
        date_range.to.date_naive(),
    ))
}

/// Facebook's trend variant: recommended/not-recommended per day instead of
/// a rating average.
#[instrument(skip(registry))]
pub async fn facebook_recommendation_trend(
    registry: &StoreRegistry,
    date_range: DateRange,
) -> Result<RecommendationTrendReport, CoreError> {
    let reviews = fetch_platform(registry, Platform::Facebook, Some(date_range)).await?;
    Ok(bucket_recommendations_by_day(
        &reviews,
        date_range.from.date_naive(),
        date_range.to.date_naive(),
    ))
}

/// Cross-platform trend with the unified inbox's failure semantics: a broken
/// platform drops out with a note instead of failing the series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedTrend {
    pub trend: TrendReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_errors: Vec<SourceFailure>,
}

#[instrument(skip(registry))]
pub async fn unified_trend(registry: &StoreRegistry, date_range: DateRange) -> UnifiedTrend {
    let filter = ReviewFilter::new().with_date_range(date_range);
    let (reviews, source_errors) = fetch_unified(registry, &filter).await;
    UnifiedTrend {
        trend: bucket_by_day(
            &reviews,
            date_range.from.date_naive(),
            date_range.to.date_naive(),
        ),
        source_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use reviewdeck_sources::google::GoogleReviewRow;
    use reviewdeck_sources::{RawReviewRow, ReviewStore, StoreError, StoreQuery};
    use std::sync::Arc;

    struct OneReviewStore;

    #[async_trait]
    impl ReviewStore for OneReviewStore {
        fn platform(&self) -> Platform {
            Platform::Google
        }

        async fn query(&self, _query: &StoreQuery) -> Result<Vec<RawReviewRow>, StoreError> {
            Ok(vec![RawReviewRow::Google(GoogleReviewRow {
                review_id: "g1".to_string(),
                author_name: None,
                author_photo_url: None,
                star_rating: 5.0,
                text: None,
                published_at: Some(Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()),
                photos: Vec::new(),
                reply: None,
                sentiment_score: None,
                keywords: Vec::new(),
                is_read: false,
                is_important: false,
                review_url: None,
            })])
        }
    }

    fn range() -> DateRange {
        DateRange {
            from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_platform_is_not_found() {
        let registry = StoreRegistry::new();
        let err = platform_analytics(&registry, Platform::Google, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(Platform::Google)));
    }

    #[tokio::test]
    async fn test_platform_trend_gap_fills_range() {
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(OneReviewStore));

        let report = platform_trend(&registry, Platform::Google, range())
            .await
            .unwrap();
        assert_eq!(report.buckets.len(), 5);
        assert_eq!(report.buckets[2].count, 1);
        assert_eq!(report.dropped_rows, 0);
    }

    #[tokio::test]
    async fn test_unified_trend_survives_missing_stores() {
        let mut registry = StoreRegistry::new();
        registry.register(Arc::new(OneReviewStore));

        // Only google is registered; the other three silently contribute
        // nothing and no failure is recorded for them.
        let unified = unified_trend(&registry, range()).await;
        assert!(unified.source_errors.is_empty());
        assert_eq!(unified.trend.buckets.len(), 5);
    }
}
