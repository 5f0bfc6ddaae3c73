pub mod bucket;
pub mod filter;
pub mod platform;
pub mod report;
pub mod review;
pub mod sentiment;

pub use bucket::{DailyBucket, RecommendationBucket, SentimentCounts};
pub use filter::{DateRange, PageInfo, Pagination, ReviewFilter, SortKey, SortOrder};
pub use platform::{Platform, RatingScale};
pub use report::{
    AggregateReport, BookingSubratings, ContentMetrics, EngagementMetrics, PlatformBreakdowns,
    RatingDistribution, ResponseMetrics, SentimentSummary, SubratingAverage, TripadvisorSubratings,
};
pub use review::CanonicalReview;
pub use sentiment::SentimentLabel;
