use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::sentiment::SentimentLabel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.from && ts <= self.to
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Rating,
    Sentiment,
    Platform,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter for review queries, shared across all platforms.
///
/// Built once and passed by value into each store query; per-platform field
/// renames and scale conversion happen at the adapter boundary, not here.
/// Intentionally immutable after construction (`with_*` builders return a new
/// value) so no query path can accumulate clauses in place.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReviewFilter {
    /// 1-5 scale buckets; translated to native ranges per platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_in: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_response: Option<bool>,
    /// Platforms to include; `None` means all four.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Platform>>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ReviewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rating_in(mut self, ratings: Vec<u8>) -> Self {
        self.rating_in = Some(ratings);
        self
    }

    pub fn with_sentiment(mut self, sentiment: SentimentLabel) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_text_contains(mut self, needle: impl Into<String>) -> Self {
        self.text_contains = Some(needle.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_is_read(mut self, is_read: impl Into<BoolParam>) -> Self {
        self.is_read = is_read.into().normalize();
        self
    }

    pub fn with_is_important(mut self, is_important: impl Into<BoolParam>) -> Self {
        self.is_important = is_important.into().normalize();
        self
    }

    pub fn with_has_response(mut self, has_response: impl Into<BoolParam>) -> Self {
        self.has_response = has_response.into().normalize();
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = Some(platforms);
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    /// The platforms this filter targets, defaulting to all four.
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        match &self.platforms {
            Some(list) => list.clone(),
            None => Platform::ALL.to_vec(),
        }
    }

    pub fn includes_platform(&self, platform: Platform) -> bool {
        match &self.platforms {
            Some(list) => list.contains(&platform),
            None => true,
        }
    }
}

/// Boolean-looking filter input as it arrives from callers.
///
/// Upstream clients send native booleans, the strings "true"/"false", or
/// nothing at all; everything funnels through [`BoolParam::normalize`] before
/// matching so store implementations only ever see `Option<bool>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BoolParam {
    Bool(bool),
    Text(String),
    Absent,
}

impl BoolParam {
    pub fn normalize(&self) -> Option<bool> {
        match self {
            BoolParam::Bool(b) => Some(*b),
            BoolParam::Text(s) => match s.trim() {
                "" => None,
                t if t.eq_ignore_ascii_case("true") => Some(true),
                t if t.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            },
            BoolParam::Absent => None,
        }
    }
}

impl From<bool> for BoolParam {
    fn from(b: bool) -> Self {
        BoolParam::Bool(b)
    }
}

impl From<&str> for BoolParam {
    fn from(s: &str) -> Self {
        BoolParam::Text(s.to_string())
    }
}

impl From<Option<bool>> for BoolParam {
    fn from(opt: Option<bool>) -> Self {
        match opt {
            Some(b) => BoolParam::Bool(b),
            None => BoolParam::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

/// Echoed back on paginated responses alongside the total match count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}
