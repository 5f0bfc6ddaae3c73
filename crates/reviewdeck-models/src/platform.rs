use serde::{Deserialize, Serialize};

/// The four review platforms we ingest from.
///
/// Variant order is alphabetical; `Ord` on this enum is the fixed tie-break
/// used when two reviews share a timestamp in the unified inbox, so pagination
/// stays stable across repeated calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Booking,
    Facebook,
    Google,
    Tripadvisor,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Booking,
        Platform::Facebook,
        Platform::Google,
        Platform::Tripadvisor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Booking => "booking",
            Platform::Facebook => "facebook",
            Platform::Google => "google",
            Platform::Tripadvisor => "tripadvisor",
        }
    }

    /// The rating range the platform originally reports in.
    ///
    /// Facebook has no stars; its boolean recommendation is projected onto the
    /// 1-5 scale at the adapter boundary, so it reports `Five` here.
    pub fn native_scale(&self) -> RatingScale {
        match self {
            Platform::Booking => RatingScale::Ten,
            Platform::Facebook | Platform::Google | Platform::Tripadvisor => RatingScale::Five,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RatingScale {
    Five,
    Ten,
}

impl RatingScale {
    pub fn max(&self) -> f64 {
        match self {
            RatingScale::Five => 5.0,
            RatingScale::Ten => 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_ordering_is_alphabetical() {
        let mut platforms = vec![Platform::Tripadvisor, Platform::Google, Platform::Booking];
        platforms.sort();
        assert_eq!(
            platforms,
            vec![Platform::Booking, Platform::Google, Platform::Tripadvisor]
        );
    }

    #[test]
    fn test_native_scales() {
        assert_eq!(Platform::Booking.native_scale(), RatingScale::Ten);
        assert_eq!(Platform::Google.native_scale(), RatingScale::Five);
        assert_eq!(Platform::Facebook.native_scale().max(), 5.0);
    }
}
