use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// One calendar day of a gap-filled trend series. Days with no reviews still
/// appear with `count == 0` so callers never see gaps in the range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: usize,
    /// `None` for empty days; never reported as zero.
    pub average_rating: Option<f64>,
    pub sentiment: SentimentCounts,
}

impl DailyBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            average_rating: None,
            sentiment: SentimentCounts::default(),
        }
    }
}

/// Facebook's per-day payload: no stars, so the bucket tracks the
/// recommended/not-recommended split instead of a rating sum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationBucket {
    pub date: NaiveDate,
    pub count: usize,
    pub recommended: usize,
    pub not_recommended: usize,
}

impl RecommendationBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            recommended: 0,
            not_recommended: 0,
        }
    }
}
