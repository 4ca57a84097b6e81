use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use govwatch_engine::is_active;
use govwatch_types::Proposal;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn proposal(start: DateTime<Utc>, end: DateTime<Utc>) -> Proposal {
    Proposal {
        id: "1".into(),
        title: String::new(),
        voting_start_time: start,
        voting_end_time: end,
    }
}

proptest! {
    /// is_active agrees with direct interval arithmetic for arbitrary
    /// windows and probe instants.
    #[test]
    fn activity_matches_interval_membership(
        start_offset in 0i64..1_000_000,
        window_len in 0i64..1_000_000,
        probe_offset in -1_000_000i64..2_000_000,
    ) {
        let start = epoch() + Duration::seconds(start_offset);
        let end = start + Duration::seconds(window_len);
        let now = epoch() + Duration::seconds(probe_offset);
        let expected = start <= now && now <= end;
        prop_assert_eq!(is_active(&proposal(start, end), now), expected);
    }

    /// Both window bounds are inclusive.
    #[test]
    fn window_bounds_are_inclusive(
        start_offset in 0i64..1_000_000,
        window_len in 0i64..1_000_000,
    ) {
        let start = epoch() + Duration::seconds(start_offset);
        let end = start + Duration::seconds(window_len);
        let p = proposal(start, end);
        prop_assert!(is_active(&p, start));
        prop_assert!(is_active(&p, end));
    }

    /// The instant just outside either bound is inactive.
    #[test]
    fn instants_outside_bounds_are_inactive(
        start_offset in 0i64..1_000_000,
        window_len in 0i64..1_000_000,
    ) {
        let start = epoch() + Duration::seconds(start_offset);
        let end = start + Duration::seconds(window_len);
        let p = proposal(start, end);
        prop_assert!(!is_active(&p, start - Duration::nanoseconds(1)));
        prop_assert!(!is_active(&p, end + Duration::nanoseconds(1)));
    }
}
