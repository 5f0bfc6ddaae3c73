use reviewdeck_models::{AggregateReport, CanonicalReview};

use crate::breakdowns::compute_breakdowns;
use crate::metrics::{
    average_native_rating, content_metrics, engagement_metrics, rating_distribution,
    response_metrics, sentiment_summary,
};

/// Build the full aggregate snapshot for a review set.
///
/// Always computed over the complete caller-supplied set (the unified inbox
/// passes the pre-pagination list); an empty set yields a zeroed report with
/// `None` averages rather than an error.
pub fn compute_report(reviews: &[CanonicalReview]) -> AggregateReport {
    AggregateReport {
        total_reviews: reviews.len(),
        rating_distribution: rating_distribution(reviews),
        average_rating: average_native_rating(reviews),
        sentiment: sentiment_summary(reviews),
        response: response_metrics(reviews),
        content: content_metrics(reviews),
        engagement: engagement_metrics(reviews),
        breakdowns: compute_breakdowns(reviews),
    }
}
