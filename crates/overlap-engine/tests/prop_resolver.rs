//! Property-based tests for the availability resolver using proptest.
//!
//! These verify invariants that must hold for *any* busy-interval input, not
//! just the hand-picked scenarios in `resolver_tests.rs`: returned slots
//! never overlap anyone's busy time, have exactly the requested duration, lie
//! inside the range and business hours, avoid weekends, and arrive sorted.

use std::collections::HashMap;

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc, Weekday};
use proptest::prelude::*;

use overlap_engine::{
    AvailabilityQuery, AvailabilityResolver, BusinessHoursPolicy, BusyInterval,
};

// ---------------------------------------------------------------------------
// Strategies — random busy sets over the week of 2026-03-16 (Mon-Sun)
// ---------------------------------------------------------------------------

/// One busy interval: a day offset into the week, a start minute within
/// 07:00-19:00, and a length of 15 minutes to 3 hours.
fn arb_busy() -> impl Strategy<Value = BusyInterval> {
    (0u32..7, 0i64..=720, 15i64..=180).prop_map(|(day, offset, length)| {
        let start = Utc.with_ymd_and_hms(2026, 3, 16 + day, 7, 0, 0).unwrap()
            + Duration::minutes(offset);
        BusyInterval::new(start, start + Duration::minutes(length))
    })
}

/// One to three participants, each with up to 12 busy intervals.
fn arb_participants() -> impl Strategy<Value = HashMap<String, Vec<BusyInterval>>> {
    prop::collection::vec(prop::collection::vec(arb_busy(), 0..12), 1..=3).prop_map(|lists| {
        lists
            .into_iter()
            .enumerate()
            .map(|(i, list)| (format!("participant-{i}"), list))
            .collect()
    })
}

/// Duration on or off the grid, 15-120 minutes.
fn arb_duration_minutes() -> impl Strategy<Value = i64> {
    15i64..=120
}

fn config() -> ProptestConfig {
    ProptestConfig { cases: 256, ..ProptestConfig::default() }
}

fn week_query(participants: &HashMap<String, Vec<BusyInterval>>, duration_minutes: i64) -> AvailabilityQuery {
    AvailabilityQuery {
        participant_ids: participants.keys().cloned().collect(),
        range_start: Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
        range_end: Utc.with_ymd_and_hms(2026, 3, 23, 0, 0, 0).unwrap(),
        duration_seconds: duration_minutes * 60,
    }
}

proptest! {
    #![proptest_config(config())]

    // No returned slot overlaps any busy interval of any participant.
    #[test]
    fn no_slot_overlaps_any_busy_interval(
        participants in arb_participants(),
        duration in arb_duration_minutes(),
    ) {
        let query = week_query(&participants, duration);
        let slots = AvailabilityResolver::default()
            .find_mutual_availability(&participants, &query)
            .unwrap();

        for slot in &slots {
            for (id, intervals) in &participants {
                for b in intervals {
                    prop_assert!(
                        !b.overlaps(slot.start, slot.end),
                        "slot {:?} overlaps {}'s busy interval {:?}",
                        slot, id, b
                    );
                }
            }
        }
    }

    // Every slot has exactly the requested duration and lies inside the range.
    #[test]
    fn slots_have_exact_duration_and_range_containment(
        participants in arb_participants(),
        duration in arb_duration_minutes(),
    ) {
        let query = week_query(&participants, duration);
        let slots = AvailabilityResolver::default()
            .find_mutual_availability(&participants, &query)
            .unwrap();

        for slot in &slots {
            prop_assert_eq!(slot.end - slot.start, Duration::minutes(duration));
            prop_assert!(slot.start >= query.range_start);
            prop_assert!(slot.end <= query.range_end);
        }
    }

    // Weekends never appear, and both slot endpoints respect business hours.
    #[test]
    fn slots_respect_weekdays_and_business_hours(
        participants in arb_participants(),
        duration in arb_duration_minutes(),
    ) {
        let query = week_query(&participants, duration);
        let slots = AvailabilityResolver::default()
            .find_mutual_availability(&participants, &query)
            .unwrap();

        for slot in &slots {
            let weekday = slot.start.weekday();
            prop_assert!(
                weekday != Weekday::Sat && weekday != Weekday::Sun,
                "weekend slot {:?}", slot
            );
            // Default policy is UTC, so hour-of-day reads directly.
            let start_minutes = slot.start.hour() * 60 + slot.start.minute();
            let end_minutes = slot.end.hour() * 60 + slot.end.minute();
            prop_assert!(start_minutes >= 9 * 60);
            prop_assert!(end_minutes <= 18 * 60 && end_minutes > 9 * 60);
        }
    }

    // Result is sorted ascending by start with no duplicates.
    #[test]
    fn result_is_strictly_ordered(
        participants in arb_participants(),
        duration in arb_duration_minutes(),
    ) {
        let query = week_query(&participants, duration);
        let slots = AvailabilityResolver::default()
            .find_mutual_availability(&participants, &query)
            .unwrap();

        for window in slots.windows(2) {
            prop_assert!(
                window[0].start < window[1].start,
                "slots out of order: {:?} then {:?}",
                window[0], window[1]
            );
        }
    }

    // Filtering can only remove slots: the result is a subset of the
    // no-busy-data maximal result, and with no busy data it equals it.
    #[test]
    fn result_is_subset_of_maximal_result(
        participants in arb_participants(),
        duration in arb_duration_minutes(),
    ) {
        let query = week_query(&participants, duration);
        let resolver = AvailabilityResolver::default();

        let filtered = resolver.find_mutual_availability(&participants, &query).unwrap();
        let maximal = resolver.find_mutual_availability(&HashMap::new(), &query).unwrap();

        prop_assert!(filtered.len() <= maximal.len());
        for slot in &filtered {
            prop_assert!(maximal.contains(slot), "slot {:?} not a generated candidate", slot);
        }
    }
}
