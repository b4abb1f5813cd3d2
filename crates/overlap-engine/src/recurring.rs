//! Expansion of recurring busy schedules into concrete busy intervals.
//!
//! Calendar providers deliver standing appointments as RFC 5545 recurrence
//! rules rather than enumerated events. This module expands such a rule into
//! the concrete [`BusyInterval`]s a resolver query can test against, wrapping
//! the `rrule` crate with `chrono-tz` for correct local-time handling.

use chrono::{DateTime, Duration, Utc};
use rrule::RRuleSet;

use crate::busy::BusyInterval;
use crate::error::{OverlapError, Result};

/// Hard cap on expanded instances when the rule carries no COUNT of its own.
const MAX_INSTANCES: u16 = 500;

/// A recurring busy schedule, as reported by a provider adapter.
#[derive(Debug, Clone)]
pub struct RecurrenceSpec<'a> {
    /// RFC 5545 RRULE string (e.g. `"FREQ=WEEKLY;BYDAY=TU,TH"`).
    pub rrule: &'a str,
    /// Local start datetime of the first occurrence (e.g. `"2026-02-17T14:00:00"`).
    pub dtstart: &'a str,
    /// Duration of each occurrence in minutes.
    pub duration_minutes: u32,
    /// IANA timezone the rule is anchored in (e.g. `"Europe/Berlin"`).
    pub timezone: &'a str,
    /// Optional expansion boundary, same local format as `dtstart`.
    pub until: Option<&'a str>,
    /// Optional maximum number of occurrences (overrides COUNT in the rule).
    pub count: Option<u32>,
    /// Exception dates excluded from the set (RFC 5545 §3.8.5.1), same local
    /// format as `dtstart`.
    pub exdates: Vec<&'a str>,
    /// Label stamped on every produced interval.
    pub label: Option<&'a str>,
}

impl<'a> RecurrenceSpec<'a> {
    /// A weekly-style spec with no UNTIL/COUNT/EXDATE refinements.
    pub fn new(rrule: &'a str, dtstart: &'a str, duration_minutes: u32, timezone: &'a str) -> Self {
        Self {
            rrule,
            dtstart,
            duration_minutes,
            timezone,
            until: None,
            count: None,
            exdates: Vec::new(),
            label: None,
        }
    }
}

/// Expand a recurring busy schedule into concrete busy intervals.
///
/// Occurrences are produced in chronological order, each
/// `spec.duration_minutes` long, converted to UTC. Expansion is capped at
/// `spec.count` (plus an EXDATE buffer, since the `rrule` crate's limit
/// counts instances before exclusion) or at 500 instances when unbounded;
/// counts beyond `u16::MAX` clamp to `u16::MAX`, the most the `rrule` crate
/// expands in one call.
///
/// # Errors
/// Returns `OverlapError::InvalidRule` if the RRULE string is empty or
/// unparseable, and `OverlapError::InvalidTimezone` if the timezone is not a
/// valid IANA identifier.
pub fn expand_recurring_busy(spec: &RecurrenceSpec<'_>) -> Result<Vec<BusyInterval>> {
    if spec.rrule.is_empty() {
        return Err(OverlapError::InvalidRule("empty RRULE string".to_string()));
    }
    if spec.count == Some(0) {
        return Ok(Vec::new());
    }

    // Validate the timezone eagerly; the rrule crate's own error for a bad
    // TZID is much less direct.
    let _tz: chrono_tz::Tz = spec
        .timezone
        .parse()
        .map_err(|_| OverlapError::InvalidTimezone(spec.timezone.to_string()))?;

    let rrule_set: RRuleSet = build_rrule_text(spec)
        .parse()
        .map_err(|e| OverlapError::InvalidRule(format!("{}", e)))?;

    let exdate_buffer = u16::try_from(spec.exdates.len()).unwrap_or(u16::MAX);
    let max_count: u16 = spec
        .count
        .map(|c| u16::try_from(c).unwrap_or(u16::MAX).saturating_add(exdate_buffer))
        .unwrap_or(MAX_INSTANCES);

    let duration = Duration::minutes(i64::from(spec.duration_minutes));
    let mut intervals: Vec<BusyInterval> = rrule_set
        .all(max_count)
        .dates
        .into_iter()
        .map(|dt| {
            let start: DateTime<Utc> = dt.with_timezone(&Utc);
            BusyInterval {
                start,
                end: start + duration,
                label: spec.label.map(str::to_string),
                all_day: false,
            }
        })
        .collect();

    // The rrule crate's `.all(limit)` caps instances before EXDATE filtering,
    // so an external count limit still needs a post-expansion truncate.
    if let Some(c) = spec.count {
        intervals.truncate(c as usize);
    }

    Ok(intervals)
}

/// Assemble the iCalendar text block the `rrule` crate parses: a DTSTART
/// line, the RRULE (with COUNT/UNTIL injected when the caller supplied them
/// externally), and optional EXDATE lines.
fn build_rrule_text(spec: &RecurrenceSpec<'_>) -> String {
    // "2026-02-17T14:00:00" → iCalendar "20260217T140000".
    let dtstart_ical = spec.dtstart.replace(['-', ':'], "");

    let mut rrule_str = spec.rrule.to_string();
    if let Some(c) = spec.count {
        if !rrule_str.to_uppercase().contains("COUNT=") {
            rrule_str = format!("{};COUNT={}", rrule_str, c);
        }
    }
    if let Some(until) = spec.until {
        if !rrule_str.to_uppercase().contains("UNTIL=") {
            // UNTIL must share DTSTART's timezone; UTC additionally needs the
            // "Z" suffix.
            let mut until_ical = until.replace(['-', ':'], "");
            if spec.timezone == "UTC" {
                until_ical.push('Z');
            }
            rrule_str = format!("{};UNTIL={}", rrule_str, until_ical);
        }
    }

    let mut text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        spec.timezone, dtstart_ical, rrule_str
    );

    if !spec.exdates.is_empty() {
        let exdate_icals: Vec<String> = spec
            .exdates
            .iter()
            .map(|d| d.replace(['-', ':'], ""))
            .collect();
        text.push_str(&format!(
            "\nEXDATE;TZID={}:{}",
            spec.timezone,
            exdate_icals.join(",")
        ));
    }

    text
}
