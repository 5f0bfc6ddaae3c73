//! Platform-specific breakdowns: sub-rating averages, trip/guest type
//! distributions and the Facebook recommendation rate.

use reviewdeck_models::review::extras;
use reviewdeck_models::{
    BookingSubratings, CanonicalReview, PlatformBreakdowns, Platform, SubratingAverage,
    TripadvisorSubratings,
};
use serde_json::Value;
use std::collections::HashMap;

pub fn compute_breakdowns(reviews: &[CanonicalReview]) -> PlatformBreakdowns {
    PlatformBreakdowns {
        trip_types: type_distribution(reviews, Platform::Tripadvisor, extras::TRIP_TYPE),
        guest_types: type_distribution(reviews, Platform::Booking, extras::GUEST_TYPE),
        recommendation_rate: recommendation_rate(reviews),
        tripadvisor_subratings: tripadvisor_subratings(reviews),
        booking_subratings: booking_subratings(reviews),
    }
}

fn type_distribution(
    reviews: &[CanonicalReview],
    platform: Platform,
    key: &str,
) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for review in reviews.iter().filter(|r| r.platform == platform) {
        if let Some(kind) = review.extra_str(key) {
            *counts.entry(kind.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Share of Facebook reviews that recommend, as a percentage. `None` when the
/// set holds no Facebook reviews at all.
pub fn recommendation_rate(reviews: &[CanonicalReview]) -> Option<f64> {
    let facebook: Vec<&CanonicalReview> = reviews
        .iter()
        .filter(|r| r.platform == Platform::Facebook)
        .collect();
    if facebook.is_empty() {
        return None;
    }
    let recommended = facebook
        .iter()
        .filter(|r| {
            r.extras
                .get(extras::RECOMMENDED)
                .and_then(Value::as_bool)
                // The adapter's projected rating doubles as a fallback flag.
                .unwrap_or(r.rating >= 3.0)
        })
        .count();
    Some(recommended as f64 / facebook.len() as f64 * 100.0)
}

/// Each field averages only over reviews that actually carry it: a review
/// missing "wifi" must not deflate the wifi average.
fn subrating_field(
    reviews: &[CanonicalReview],
    platform: Platform,
    field: &str,
) -> SubratingAverage {
    let mut avg = SubratingAverage::default();
    for review in reviews.iter().filter(|r| r.platform == platform) {
        let value = review
            .extras
            .get(extras::SUBRATINGS)
            .and_then(Value::as_object)
            .and_then(|subs| subs.get(field))
            .and_then(Value::as_f64);
        if let Some(value) = value {
            avg.add(value);
        }
    }
    avg
}

pub fn tripadvisor_subratings(reviews: &[CanonicalReview]) -> TripadvisorSubratings {
    let p = Platform::Tripadvisor;
    TripadvisorSubratings {
        service: subrating_field(reviews, p, "service"),
        food: subrating_field(reviews, p, "food"),
        value: subrating_field(reviews, p, "value"),
        atmosphere: subrating_field(reviews, p, "atmosphere"),
        cleanliness: subrating_field(reviews, p, "cleanliness"),
        location: subrating_field(reviews, p, "location"),
        rooms: subrating_field(reviews, p, "rooms"),
        sleep_quality: subrating_field(reviews, p, "sleep_quality"),
    }
}

pub fn booking_subratings(reviews: &[CanonicalReview]) -> BookingSubratings {
    let p = Platform::Booking;
    BookingSubratings {
        cleanliness: subrating_field(reviews, p, "cleanliness"),
        comfort: subrating_field(reviews, p, "comfort"),
        location: subrating_field(reviews, p, "location"),
        facilities: subrating_field(reviews, p, "facilities"),
        staff: subrating_field(reviews, p, "staff"),
        value: subrating_field(reviews, p, "value"),
        wifi: subrating_field(reviews, p, "wifi"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::review;
    use serde_json::{json, Map};

    fn with_subratings(platform: Platform, fields: &[(&str, f64)]) -> CanonicalReview {
        let mut r = review(platform, 8.0);
        let mut subs = Map::new();
        for (name, value) in fields {
            subs.insert(name.to_string(), json!(value));
        }
        r.extras.insert(extras::SUBRATINGS.to_string(), Value::Object(subs));
        r
    }

    #[test]
    fn test_independent_denominators_per_subrating() {
        let with_wifi = with_subratings(Platform::Booking, &[("wifi", 10.0), ("staff", 8.0)]);
        let without_wifi = with_subratings(Platform::Booking, &[("staff", 6.0)]);

        let subs = booking_subratings(&[with_wifi, without_wifi]);
        // wifi averaged over 1 review, staff over 2.
        assert_eq!(subs.wifi.count, 1);
        assert_eq!(subs.wifi.average, 10.0);
        assert_eq!(subs.staff.count, 2);
        assert_eq!(subs.staff.average, 7.0);
    }

    #[test]
    fn test_trip_type_distribution_only_counts_tripadvisor() {
        let mut ta = review(Platform::Tripadvisor, 4.0);
        ta.extras
            .insert(extras::TRIP_TYPE.to_string(), json!("FAMILY"));
        let mut ta2 = review(Platform::Tripadvisor, 5.0);
        ta2.extras
            .insert(extras::TRIP_TYPE.to_string(), json!("FAMILY"));
        let mut booking = review(Platform::Booking, 8.0);
        booking
            .extras
            .insert(extras::GUEST_TYPE.to_string(), json!("couple"));

        let breakdowns = compute_breakdowns(&[ta, ta2, booking]);
        assert_eq!(breakdowns.trip_types.get("FAMILY"), Some(&2));
        assert_eq!(breakdowns.guest_types.get("couple"), Some(&1));
    }

    #[test]
    fn test_recommendation_rate_over_facebook_only() {
        let mut yes = review(Platform::Facebook, 5.0);
        yes.extras
            .insert(extras::RECOMMENDED.to_string(), Value::Bool(true));
        let mut no = review(Platform::Facebook, 1.0);
        no.extras
            .insert(extras::RECOMMENDED.to_string(), Value::Bool(false));
        let google = review(Platform::Google, 5.0);

        assert_eq!(recommendation_rate(&[yes, no, google]), Some(50.0));
        assert_eq!(recommendation_rate(&[review(Platform::Google, 4.0)]), None);
    }
}
