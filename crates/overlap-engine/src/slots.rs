//! Candidate slot generation on the business-hours grid.
//!
//! Walks each calendar day of the search range on the policy timezone's wall
//! clock, skips non-working weekdays, and emits one candidate per grid
//! boundary whose slot still fits inside business hours and the range.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::BusinessHoursPolicy;

/// A generated time window of exactly the requested duration, aligned to the
/// policy grid within business hours of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    /// Start of the slot (inclusive).
    pub start: DateTime<Utc>,
    /// End of the slot (exclusive). Always `start + duration`.
    pub end: DateTime<Utc>,
}

impl CandidateSlot {
    /// Length of the slot.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Generate all candidate slots of `duration` within `[range_start, range_end)`.
///
/// For each working day of the range (judged on the policy timezone's wall
/// clock), candidate starts are emitted at every `grid_minutes` boundary from
/// the start of business, as long as the slot's wall-clock end stays within
/// business close and the slot lies fully inside the range.
///
/// Wall-clock times that do not exist due to a DST spring-forward gap are
/// skipped; ambiguous times during fall-back resolve to the earlier offset.
///
/// The caller is expected to have validated `policy` and to pass a positive
/// `duration`; the range may be empty or reversed, which yields no slots.
pub fn generate_candidate_slots(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration: Duration,
    policy: &BusinessHoursPolicy,
) -> Vec<CandidateSlot> {
    let mut slots = Vec::new();
    if range_start >= range_end || duration <= Duration::zero() {
        return slots;
    }

    let tz = policy.timezone;
    let first_day = range_start.with_timezone(&tz).date_naive();
    let last_day = range_end.with_timezone(&tz).date_naive();

    let mut day = first_day;
    while day <= last_day {
        if policy.working_weekdays.contains(&day.weekday()) {
            slots.extend(day_slots(day, range_start, range_end, duration, policy));
        }
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }

    slots
}

/// Candidate slots for a single working day.
fn day_slots(
    day: NaiveDate,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration: Duration,
    policy: &BusinessHoursPolicy,
) -> Vec<CandidateSlot> {
    let mut slots = Vec::new();

    let Some(open) = day.and_hms_opt(policy.start_hour, 0, 0) else {
        return slots;
    };
    // end_hour may be 24, which chrono cannot express as an hour-of-day.
    let close = if policy.end_hour == 24 {
        match day.succ_opt() {
            Some(next) => next.and_time(chrono::NaiveTime::MIN),
            None => return slots,
        }
    } else {
        match day.and_hms_opt(policy.end_hour, 0, 0) {
            Some(close) => close,
            None => return slots,
        }
    };

    let grid = Duration::minutes(i64::from(policy.grid_minutes));
    let mut cursor = open;
    loop {
        // An unrepresentable wall-clock end means the duration cannot fit any
        // day; produce no slots rather than overflow.
        let Some(slot_close) = cursor.checked_add_signed(duration) else {
            break;
        };
        if slot_close > close {
            break;
        }

        // Resolve the wall-clock start to an instant; skip DST-gap times.
        let start = match policy.timezone.from_local_datetime(&cursor) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earlier, _) => Some(earlier),
            LocalResult::None => None,
        };

        if let Some(start) = start {
            let start = start.with_timezone(&Utc);
            if let Some(end) = start.checked_add_signed(duration) {
                if start >= range_start && end <= range_end {
                    slots.push(CandidateSlot { start, end });
                }
            }
        }

        cursor += grid;
    }

    slots
}
