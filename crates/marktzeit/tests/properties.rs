//! Property tests for the conversion laws that should hold across the whole
//! input space, not just the hand-picked vectors in the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use marktzeit::{
    ConversionConfiguration, DateTimeConfiguration, EndDateTimeKind, GasTagConverter,
};
use proptest::prelude::*;

fn berlin() -> GasTagConverter {
    GasTagConverter::new("Europe/Berlin").unwrap()
}

/// One structurally valid descriptor with the Sparte fixed by the caller.
fn descriptor(is_gas: bool) -> impl Strategy<Value = DateTimeConfiguration> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        move |(is_end_date, inclusive, aware, strip_time)| DateTimeConfiguration {
            is_end_date,
            end_date_time_kind: is_end_date.then_some(if inclusive {
                EndDateTimeKind::Inclusive
            } else {
                EndDateTimeKind::Exclusive
            }),
            is_gas,
            is_gas_tag_aware: is_gas.then_some(aware),
            strip_time,
        },
    )
}

/// A structurally valid request: both sides share one Sparte.
fn request() -> impl Strategy<Value = ConversionConfiguration> {
    any::<bool>().prop_flat_map(|is_gas| {
        (descriptor(is_gas), descriptor(is_gas))
            .prop_map(|(source, target)| ConversionConfiguration { source, target })
    })
}

/// Second-precision instants through 2020-2029.
fn any_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3653, 0u32..24, 0u32..60, 0u32..60).prop_map(|(day, hour, minute, second)| {
        Utc.with_ymd_and_hms(2020, 1, 1, hour, minute, second).unwrap() + Duration::days(day)
    })
}

/// Instants whose Berlin wall time is neither on a day boundary nor inside
/// the 02:00-03:00 DST window, so every conversion step is exactly
/// invertible.
fn off_boundary_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3653, 3u32..21, 1u32..60, 0u32..60).prop_map(|(day, hour, minute, second)| {
        Utc.with_ymd_and_hms(2020, 1, 1, hour, minute, second).unwrap() + Duration::days(day)
    })
}

proptest! {
    #[test]
    fn invert_is_an_involution(request in request()) {
        prop_assert_eq!(request.invert().invert(), request);
    }

    #[test]
    fn generated_requests_and_their_inverses_validate(request in request()) {
        prop_assert!(request.validate().is_ok());
        prop_assert!(request.invert().validate().is_ok());
    }

    #[test]
    fn valid_requests_never_error(request in request(), instant in any_instant()) {
        prop_assert!(berlin().convert(instant, &request).is_ok());
    }

    #[test]
    fn strip_time_is_idempotent(instant in any_instant()) {
        let converter = berlin();
        let stripped = converter.strip_time(instant);
        prop_assert_eq!(converter.strip_time(stripped), stripped);
        prop_assert!(converter.is_local_midnight(stripped));
    }

    #[test]
    fn six_am_round_trips_through_midnight(instant in any_instant()) {
        let converter = berlin();
        let six_am = converter
            .midnight_to_six_am(converter.strip_time(instant))
            .unwrap();
        let midnight = converter.six_am_to_midnight(six_am).unwrap();
        prop_assert_eq!(converter.midnight_to_six_am(midnight).unwrap(), six_am);
    }

    #[test]
    fn conversions_round_trip_off_boundary(
        request in request(),
        instant in off_boundary_instant(),
    ) {
        // stripping is lossy, so the law is stated without it
        let request = ConversionConfiguration {
            source: DateTimeConfiguration { strip_time: false, ..request.source },
            target: DateTimeConfiguration { strip_time: false, ..request.target },
        };
        let converter = berlin();
        let there = converter.convert(instant, &request).unwrap();
        let back = converter.convert(there, &request.invert()).unwrap();
        prop_assert_eq!(back, instant);
    }

    #[test]
    fn identical_conventions_are_identity(
        side in any::<bool>().prop_flat_map(descriptor),
        instant in any_instant(),
    ) {
        let side = DateTimeConfiguration { strip_time: false, ..side };
        let request = ConversionConfiguration { source: side, target: side };
        prop_assert_eq!(berlin().convert(instant, &request).unwrap(), instant);
    }

    #[test]
    fn requests_survive_json_round_trip(request in request()) {
        let json = serde_json::to_string(&request).unwrap();
        let decoded: ConversionConfiguration = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, request);
    }
}
