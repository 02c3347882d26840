//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::entities::{AlertRule, Metric, Observation, Operator};
use domain::value_objects::{
    Condition, GeoLocation, Humidity, LocationId, ObservationTimestamp, Temperature, WindSpeed,
};
use proptest::prelude::*;

// ============================================================================
// GeoLocation
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}

// ============================================================================
// Measured values
// ============================================================================

mod measurement_tests {
    use super::*;

    proptest! {
        #[test]
        fn in_range_temperatures_accepted(c in -100.0f64..=65.0f64) {
            let t = Temperature::new(c);
            prop_assert!(t.is_ok());
            prop_assert!((t.unwrap().celsius() - c).abs() < f64::EPSILON);
        }

        #[test]
        fn out_of_range_temperatures_rejected(
            c in prop_oneof![(-10_000.0f64..-100.01f64), (65.01f64..10_000.0f64)]
        ) {
            prop_assert!(Temperature::new(c).is_err());
        }

        #[test]
        fn humidity_accepts_exactly_0_to_100(value in 0u8..=255u8) {
            let result = Humidity::new(value);
            prop_assert_eq!(result.is_ok(), value <= 100);
        }

        #[test]
        fn wind_speed_never_negative(mps in -1000.0f64..=1000.0f64) {
            let result = WindSpeed::new(mps);
            prop_assert_eq!(result.is_ok(), (0.0..=120.0).contains(&mps));
        }

        #[test]
        fn wind_speed_kmh_conversion_is_monotonic(
            a in 0.0f64..=119.0f64,
            delta in 0.001f64..=1.0f64
        ) {
            let slow = WindSpeed::new(a).unwrap();
            let fast = WindSpeed::new(a + delta).unwrap();
            prop_assert!(fast.kmh() > slow.kmh());
        }
    }
}

// ============================================================================
// Timestamps
// ============================================================================

mod timestamp_tests {
    use super::*;
    use chrono::Timelike;

    proptest! {
        #[test]
        fn truncation_is_idempotent(secs in 0i64..=4_000_000_000i64) {
            let ts = ObservationTimestamp::from_unix(secs).unwrap();
            let again = ObservationTimestamp::new(ts.as_datetime());
            prop_assert_eq!(ts, again);
            prop_assert_eq!(ts.as_datetime().second(), 0);
        }

        #[test]
        fn offset_preserves_minute_precision(
            secs in 0i64..=4_000_000_000i64,
            minutes in -10_000i64..=10_000i64
        ) {
            let ts = ObservationTimestamp::from_unix(secs).unwrap();
            let shifted = ts.offset_minutes(minutes);
            prop_assert_eq!(shifted.as_datetime().second(), 0);
        }
    }
}

// ============================================================================
// Alert rule evaluation
// ============================================================================

mod alert_rule_tests {
    use super::*;

    fn observation_with_temp(c: f64) -> Observation {
        Observation::new(
            LocationId::new("station").unwrap(),
            ObservationTimestamp::from_unix(1_700_000_000).unwrap(),
            Temperature::new(c).unwrap(),
            Humidity::new(50).unwrap(),
            WindSpeed::new(1.0).unwrap(),
            Condition::Clear,
        )
    }

    proptest! {
        #[test]
        fn greater_and_less_or_equal_partition(
            temp in -100.0f64..=65.0f64,
            threshold in -100.0f64..=65.0f64
        ) {
            let obs = observation_with_temp(temp);
            let gt = AlertRule::new(Metric::Temperature, Operator::GreaterThan, threshold);
            let le = AlertRule::new(Metric::Temperature, Operator::LessOrEqual, threshold);
            // Exactly one of > and <= holds for any value
            prop_assert_ne!(gt.matches(&obs), le.matches(&obs));
        }

        #[test]
        fn evaluation_is_deterministic(
            temp in -100.0f64..=65.0f64,
            threshold in -100.0f64..=65.0f64
        ) {
            let obs = observation_with_temp(temp);
            let rule = AlertRule::new(Metric::Temperature, Operator::GreaterOrEqual, threshold);
            prop_assert_eq!(rule.matches(&obs), rule.matches(&obs));
        }
    }
}

// ============================================================================
// LocationId
// ============================================================================

mod location_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_slugs_accepted(slug in "[a-z0-9_-]{1,64}") {
            let id = LocationId::new(slug.clone());
            prop_assert!(id.is_ok());
            let id = id.unwrap();
            prop_assert_eq!(id.as_str(), slug.as_str());
        }

        #[test]
        fn uppercase_slugs_rejected(slug in "[A-Z]{1,16}") {
            prop_assert!(LocationId::new(slug).is_err());
        }
    }
}
