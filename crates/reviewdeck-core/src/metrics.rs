//! Pure metric calculators over canonical review slices.
//!
//! Every function here takes immutable input and returns a new value; nothing
//! is cached or incrementally maintained. Reports are recomputed wholesale on
//! every call because the upstream system has no invalidation protocol.

use reviewdeck_models::review::extras;
use reviewdeck_models::{
    CanonicalReview, ContentMetrics, EngagementMetrics, RatingDistribution, RatingScale,
    ResponseMetrics, SentimentLabel, SentimentSummary,
};

/// Count reviews per 1-5 star bucket.
///
/// Ratings are projected onto the shared scale via
/// [`CanonicalReview::normalized_rating`], which rounds and clamps, so the
/// bucket counts always sum to the input length.
pub fn rating_distribution(reviews: &[CanonicalReview]) -> RatingDistribution {
    let mut dist = RatingDistribution::default();
    for review in reviews {
        dist.add(review.normalized_rating());
    }
    dist
}

/// Arithmetic mean of a rating list. `None` for empty input so callers can
/// tell "no data" apart from an average of zero.
pub fn average_rating(ratings: &[f64]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

/// Mean of the native-scale ratings of a review set.
pub fn average_native_rating(reviews: &[CanonicalReview]) -> Option<f64> {
    let ratings: Vec<f64> = reviews.iter().map(|r| r.rating).collect();
    average_rating(&ratings)
}

/// Classify a star rating on its explicit scale.
///
/// Scale 5: >= 4 positive, == 3 neutral, else negative.
/// Scale 10: >= 7 positive, >= 5 neutral, else negative.
/// Thresholds are fixed constants, not per-call configuration.
pub fn classify_rating(rating: f64, scale: RatingScale) -> SentimentLabel {
    match scale {
        RatingScale::Five => {
            if rating >= 4.0 {
                SentimentLabel::Positive
            } else if rating >= 3.0 {
                SentimentLabel::Neutral
            } else {
                SentimentLabel::Negative
            }
        }
        RatingScale::Ten => {
            if rating >= 7.0 {
                SentimentLabel::Positive
            } else if rating >= 5.0 {
                SentimentLabel::Neutral
            } else {
                SentimentLabel::Negative
            }
        }
    }
}

/// Classify a numeric NLP score in [-1, 1]: >= 0.5 positive, >= -0.5 neutral,
/// else negative.
pub fn classify_score(score: f64) -> SentimentLabel {
    if score >= 0.5 {
        SentimentLabel::Positive
    } else if score >= -0.5 {
        SentimentLabel::Neutral
    } else {
        SentimentLabel::Negative
    }
}

/// The canonical per-review rule used by report-level sentiment summaries:
/// the NLP score wins when present, the native-scale rating otherwise. The
/// two paths are never mixed for one review, and trend buckets use the
/// rating path exclusively (see `trend`), so each metric applies exactly one
/// rule across a report.
pub fn review_sentiment(review: &CanonicalReview) -> SentimentLabel {
    match review.sentiment {
        Some(score) => classify_score(score),
        None => classify_rating(review.rating, review.platform.native_scale()),
    }
}

pub fn sentiment_summary(reviews: &[CanonicalReview]) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    let mut score_sum = 0.0;
    let mut score_count = 0usize;

    for review in reviews {
        match review_sentiment(review) {
            SentimentLabel::Positive => summary.positive += 1,
            SentimentLabel::Neutral => summary.neutral += 1,
            SentimentLabel::Negative => summary.negative += 1,
        }
        if let Some(score) = review.sentiment {
            score_sum += score;
            score_count += 1;
        }
    }

    if score_count > 0 {
        summary.average_score = Some(score_sum / score_count as f64);
    }
    summary
}

/// Response rate and mean reply latency.
///
/// The rate counts every review with a reply. The latency average only uses
/// reviews where both timestamps exist and the reply does not predate the
/// review; a negative gap means corrupted source data and is discarded, not
/// clamped to zero, so it cannot drag the average down.
pub fn response_metrics(reviews: &[CanonicalReview]) -> ResponseMetrics {
    if reviews.is_empty() {
        return ResponseMetrics::default();
    }

    let replied = reviews.iter().filter(|r| r.has_reply()).count();
    let mut latency_sum_hours = 0.0;
    let mut latency_count = 0usize;

    for review in reviews {
        let (Some(published), Some(replied_at)) = (review.published_at, review.reply_at) else {
            continue;
        };
        let gap = replied_at.signed_duration_since(published);
        if gap.num_seconds() < 0 {
            continue;
        }
        latency_sum_hours += gap.num_seconds() as f64 / 3600.0;
        latency_count += 1;
    }

    ResponseMetrics {
        response_rate: replied as f64 / reviews.len() as f64 * 100.0,
        average_response_hours: (latency_count > 0)
            .then(|| latency_sum_hours / latency_count as f64),
    }
}

pub fn content_metrics(reviews: &[CanonicalReview]) -> ContentMetrics {
    let with_photos = reviews.iter().filter(|r| !r.images.is_empty()).count();
    let lengths: Vec<f64> = reviews
        .iter()
        .filter_map(|r| r.text.as_ref())
        .map(|t| t.chars().count() as f64)
        .collect();

    ContentMetrics {
        with_photos,
        with_text: lengths.len(),
        average_text_length: average_rating(&lengths),
    }
}

pub fn engagement_metrics(reviews: &[CanonicalReview]) -> EngagementMetrics {
    let mut metrics = EngagementMetrics::default();
    if reviews.is_empty() {
        return metrics;
    }

    for review in reviews {
        metrics.total_likes += review.extra_f64(extras::LIKES).unwrap_or(0.0) as u64;
        metrics.total_comments += review.extra_f64(extras::COMMENTS).unwrap_or(0.0) as u64;
    }
    metrics.average_likes = metrics.total_likes as f64 / reviews.len() as f64;
    metrics.average_comments = metrics.total_comments as f64 / reviews.len() as f64;
    metrics
}
