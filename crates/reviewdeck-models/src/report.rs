use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable aggregate snapshot over a caller-supplied review set.
///
/// Always recomputed wholesale from the full set; there is no incremental
/// maintenance because the upstream system has no invalidation protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateReport {
    pub total_reviews: usize,
    pub rating_distribution: RatingDistribution,
    /// `None` when the input set is empty; callers must be able to tell
    /// "no data" apart from an average of zero.
    pub average_rating: Option<f64>,
    pub sentiment: SentimentSummary,
    pub response: ResponseMetrics,
    pub content: ContentMetrics,
    pub engagement: EngagementMetrics,
    pub breakdowns: PlatformBreakdowns,
}

/// Counts per 1-5 star bucket. The sum of all buckets equals the number of
/// rated reviews that went in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RatingDistribution {
    pub one: usize,
    pub two: usize,
    pub three: usize,
    pub four: usize,
    pub five: usize,
}

impl RatingDistribution {
    pub fn add(&mut self, bucket: u8) {
        match bucket {
            1 => self.one += 1,
            2 => self.two += 1,
            3 => self.three += 1,
            4 => self.four += 1,
            5 => self.five += 1,
            _ => {}
        }
    }

    pub fn get(&self, bucket: u8) -> usize {
        match bucket {
            1 => self.one,
            2 => self.two,
            3 => self.three,
            4 => self.four,
            5 => self.five,
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.one + self.two + self.three + self.four + self.five
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SentimentSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Mean of the numeric scores where present, `None` if none were.
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ResponseMetrics {
    /// Percentage of reviews carrying an owner reply.
    pub response_rate: f64,
    /// Mean publish-to-reply latency in hours, over reviews with both
    /// timestamps and a non-negative gap. `None` when no usable pair exists.
    pub average_response_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContentMetrics {
    pub with_photos: usize,
    pub with_text: usize,
    pub average_text_length: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EngagementMetrics {
    pub total_likes: u64,
    pub total_comments: u64,
    pub average_likes: f64,
    pub average_comments: f64,
}

/// Per-field average where each field keeps its own denominator: a review
/// missing a sub-rating never deflates that sub-rating's average.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SubratingAverage {
    pub average: f64,
    pub count: usize,
}

impl SubratingAverage {
    pub fn add(&mut self, value: f64) {
        let sum = self.average * self.count as f64 + value;
        self.count += 1;
        self.average = sum / self.count as f64;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TripadvisorSubratings {
    pub service: SubratingAverage,
    pub food: SubratingAverage,
    pub value: SubratingAverage,
    pub atmosphere: SubratingAverage,
    pub cleanliness: SubratingAverage,
    pub location: SubratingAverage,
    pub rooms: SubratingAverage,
    pub sleep_quality: SubratingAverage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookingSubratings {
    pub cleanliness: SubratingAverage,
    pub comfort: SubratingAverage,
    pub location: SubratingAverage,
    pub facilities: SubratingAverage,
    pub staff: SubratingAverage,
    pub value: SubratingAverage,
    pub wifi: SubratingAverage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlatformBreakdowns {
    /// TripAdvisor trip types (FAMILY, COUPLES, SOLO, BUSINESS, FRIENDS).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub trip_types: HashMap<String, usize>,
    /// Booking guest types (solo, couple, family_with_young_children, ...).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub guest_types: HashMap<String, usize>,
    /// Share of Facebook reviews that recommend, as a percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_rate: Option<f64>,
    pub tripadvisor_subratings: TripadvisorSubratings,
    pub booking_subratings: BookingSubratings,
}
