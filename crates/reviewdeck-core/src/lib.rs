pub mod analytics;
pub mod breakdowns;
pub mod error;
pub mod inbox;
pub mod keywords;
pub mod metrics;
pub mod report;
pub mod trend;

#[cfg(test)]
mod testutil;

pub use analytics::{
    facebook_recommendation_trend, platform_analytics, platform_trend, unified_trend, UnifiedTrend,
};
pub use error::CoreError;
pub use inbox::{unified_inbox, SourceFailure, UnifiedInbox};
pub use keywords::{aggregate_keywords, extract_keywords, KeywordCount};
pub use report::compute_report;
pub use trend::{
    bucket_by_day, bucket_recommendations_by_day, RecommendationTrendReport, TrendReport,
};
