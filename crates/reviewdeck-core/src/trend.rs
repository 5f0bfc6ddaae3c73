//! Gap-filled per-day trend series.
//!
//! All variants share one skeleton: pre-initialize a bucket for every
//! calendar day in the range (so zero-review days still appear), truncate
//! each review's timestamp to its UTC date, assign, then emit ascending by
//! date. Only the per-bucket payload differs between the rating variant and
//! Facebook's recommendation variant.

use chrono::NaiveDate;
use reviewdeck_models::review::extras;
use reviewdeck_models::{
    CanonicalReview, DailyBucket, RatingScale, RecommendationBucket, SentimentLabel,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::metrics::classify_rating;

/// A bucketed series plus the number of rows that could not be bucketed
/// because their mandatory `published_at` was missing upstream. Dropped rows
/// are reported, never silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendReport {
    pub buckets: Vec<DailyBucket>,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationTrendReport {
    pub buckets: Vec<RecommendationBucket>,
    pub dropped_rows: usize,
}

/// One pre-initialized empty bucket per day from `start` to `end` inclusive.
/// `BTreeMap` keeps the emitted series sorted ascending by date regardless
/// of assignment order.
fn day_buckets<B, F>(start: NaiveDate, end: NaiveDate, empty: F) -> BTreeMap<NaiveDate, B>
where
    F: Fn(NaiveDate) -> B,
{
    let mut buckets = BTreeMap::new();
    let mut day = start;
    while day <= end {
        buckets.insert(day, empty(day));
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    buckets
}

/// Truncate to the UTC calendar day, discarding time-of-day.
fn bucket_date(review: &CanonicalReview) -> Option<NaiveDate> {
    review.published_at.map(|ts| ts.date_naive())
}

/// Bucket reviews per day with count, running rating average and a
/// three-way sentiment split (rating-based classification only, so trend
/// sentiment follows one rule regardless of which rows carry NLP scores).
pub fn bucket_by_day(
    reviews: &[CanonicalReview],
    start: NaiveDate,
    end: NaiveDate,
) -> TrendReport {
    struct Accum {
        count: usize,
        rating_sum: f64,
        positive: usize,
        neutral: usize,
        negative: usize,
    }

    let mut buckets = day_buckets(start, end, |_| Accum {
        count: 0,
        rating_sum: 0.0,
        positive: 0,
        neutral: 0,
        negative: 0,
    });
    let mut dropped = 0usize;

    for review in reviews {
        let Some(date) = bucket_date(review) else {
            dropped += 1;
            continue;
        };
        let Some(bucket) = buckets.get_mut(&date) else {
            continue; // outside the requested range
        };
        bucket.count += 1;
        // Normalized 1-5 value so Booking's 1-10 does not skew mixed series.
        bucket.rating_sum += review.normalized_rating() as f64;
        match classify_rating(review.normalized_rating() as f64, RatingScale::Five) {
            SentimentLabel::Positive => bucket.positive += 1,
            SentimentLabel::Neutral => bucket.neutral += 1,
            SentimentLabel::Negative => bucket.negative += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "rows without published_at excluded from trend");
    }

    let buckets = buckets
        .into_iter()
        .map(|(date, accum)| DailyBucket {
            date,
            count: accum.count,
            average_rating: (accum.count > 0).then(|| accum.rating_sum / accum.count as f64),
            sentiment: reviewdeck_models::SentimentCounts {
                positive: accum.positive,
                neutral: accum.neutral,
                negative: accum.negative,
            },
        })
        .collect();

    TrendReport {
        buckets,
        dropped_rows: dropped,
    }
}

/// Facebook variant: same day skeleton, recommended/not-recommended payload.
pub fn bucket_recommendations_by_day(
    reviews: &[CanonicalReview],
    start: NaiveDate,
    end: NaiveDate,
) -> RecommendationTrendReport {
    let mut buckets = day_buckets(start, end, RecommendationBucket::empty);
    let mut dropped = 0usize;

    for review in reviews {
        let Some(date) = bucket_date(review) else {
            dropped += 1;
            continue;
        };
        let Some(bucket) = buckets.get_mut(&date) else {
            continue;
        };
        bucket.count += 1;
        let recommended = review
            .extras
            .get(extras::RECOMMENDED)
            .and_then(Value::as_bool)
            .unwrap_or(review.rating >= 3.0);
        if recommended {
            bucket.recommended += 1;
        } else {
            bucket.not_recommended += 1;
        }
    }

    RecommendationTrendReport {
        buckets: buckets.into_values().collect(),
        dropped_rows: dropped,
    }
}
