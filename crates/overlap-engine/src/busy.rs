//! Busy intervals and busy-period merging.
//!
//! A [`BusyInterval`] is one occupied period for one participant, as reported
//! by a calendar provider. Intervals are half-open `[start, end)`: an
//! interval ending exactly when another begins does not overlap it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One occupied period for one participant, sourced from a calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    /// Start of the busy period (inclusive).
    pub start: DateTime<Utc>,
    /// End of the busy period (exclusive).
    pub end: DateTime<Utc>,
    /// Optional provider-supplied label (e.g. an event title).
    pub label: Option<String>,
    /// Whether the source event was an all-day event.
    pub all_day: bool,
}

impl BusyInterval {
    /// Create a plain busy interval with no label.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end, label: None, all_day: false }
    }

    /// Half-open overlap test against `[start, end)`.
    ///
    /// Two intervals `[a,b)` and `[c,d)` overlap iff `max(a,c) < min(b,d)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start.max(start) < self.end.min(end)
    }
}

/// Merge overlapping or adjacent busy intervals, clipped to the given window.
///
/// Intervals entirely outside the window are discarded; the rest are clipped,
/// sorted by `(start, end)`, and coalesced. Returns a sorted, non-overlapping
/// list of `(start, end)` pairs.
///
/// Merging never changes what a candidate slot overlaps with; it only reduces
/// the number of comparisons the resolver performs.
pub fn merge_busy_intervals(
    intervals: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut clipped: Vec<(DateTime<Utc>, DateTime<Utc>)> = intervals
        .iter()
        .filter(|b| b.start < window_end && b.end > window_start)
        .map(|b| (b.start.max(window_start), b.end.min(window_end)))
        .collect();

    if clipped.is_empty() {
        return Vec::new();
    }

    clipped.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in clipped {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                // Touches or overlaps the previous block; widen it instead of
                // starting a new one.
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}
