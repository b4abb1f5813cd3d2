//! Mutual availability resolution.
//!
//! Two deterministic phases: generate grid-aligned candidate slots within the
//! query range (see [`crate::slots`]), then retain the candidates that no
//! participant's busy intervals overlap. The resolver owns no long-lived
//! state and is a pure function of its inputs, safe to call concurrently.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::busy::{merge_busy_intervals, BusyInterval};
use crate::error::{OverlapError, Result};
use crate::policy::{AbsentPolicy, BusinessHoursPolicy};
use crate::slots::{generate_candidate_slots, CandidateSlot};

/// A request for mutually free time windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// The participants whose calendars must all be free.
    pub participant_ids: BTreeSet<String>,
    /// Start of the search range (inclusive).
    pub range_start: DateTime<Utc>,
    /// End of the search range (exclusive).
    pub range_end: DateTime<Utc>,
    /// Requested meeting duration in seconds. Must be positive.
    pub duration_seconds: i64,
}

impl AvailabilityQuery {
    /// Requested duration as a `chrono::Duration`, or `None` when
    /// `duration_seconds` is not representable as one.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_seconds(self.duration_seconds)
    }
}

/// Computes mutually free time windows for a set of participants.
///
/// Collaborators are injected explicitly: the resolver carries its
/// business-hours policy and absent-participant policy, nothing else.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityResolver {
    policy: BusinessHoursPolicy,
    absent_policy: AbsentPolicy,
}

impl AvailabilityResolver {
    /// Create a resolver with the given business-hours policy and the default
    /// fail-open absent-participant policy.
    pub fn new(policy: BusinessHoursPolicy) -> Self {
        Self { policy, absent_policy: AbsentPolicy::default() }
    }

    /// Override how participants missing from the busy-time map are treated.
    pub fn with_absent_policy(mut self, absent_policy: AbsentPolicy) -> Self {
        self.absent_policy = absent_policy;
        self
    }

    /// The business-hours policy this resolver generates slots against.
    pub fn policy(&self) -> &BusinessHoursPolicy {
        &self.policy
    }

    /// Compute the ordered list of mutually free slots.
    ///
    /// `participant_busy` maps each participant to the concatenation of busy
    /// intervals across all of their calendar providers; the caller performs
    /// that concatenation (see `overlap-providers`). Intervals need not be
    /// sorted or deduplicated.
    ///
    /// A slot is returned iff no busy interval of any participant overlaps
    /// it, with half-open semantics: `[a,b)` and `[c,d)` overlap iff
    /// `max(a,c) < min(b,d)`. Results are sorted ascending by start.
    ///
    /// Degenerate queries are valid: a reversed or empty range returns an
    /// empty list, and an empty busy map returns every generated candidate.
    /// Participants in the query but absent from `participant_busy` are
    /// treated per the configured [`AbsentPolicy`].
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidQuery` when `duration_seconds <= 0` or
    /// too large to represent, and `OverlapError::InvalidPolicy` when the
    /// resolver's policy is inconsistent. "Legitimately no overlap" is an
    /// empty `Ok`, never an error.
    pub fn find_mutual_availability(
        &self,
        participant_busy: &HashMap<String, Vec<BusyInterval>>,
        query: &AvailabilityQuery,
    ) -> Result<Vec<CandidateSlot>> {
        self.policy.validate()?;
        if query.duration_seconds <= 0 {
            return Err(OverlapError::InvalidQuery(format!(
                "duration must be positive, got {}s",
                query.duration_seconds
            )));
        }
        let Some(duration) = query.duration() else {
            return Err(OverlapError::InvalidQuery(format!(
                "duration {}s is out of range",
                query.duration_seconds
            )));
        };
        if query.range_start >= query.range_end {
            return Ok(Vec::new());
        }

        // Fail closed: under AssumeBusy, any queried participant without busy
        // data blocks every slot.
        if self.absent_policy == AbsentPolicy::AssumeBusy
            && query
                .participant_ids
                .iter()
                .any(|id| !participant_busy.contains_key(id))
        {
            return Ok(Vec::new());
        }

        let candidates = generate_candidate_slots(
            query.range_start,
            query.range_end,
            duration,
            &self.policy,
        );

        // Merge each participant's intervals once; merging only reduces the
        // number of overlap tests, never their outcome.
        let merged: Vec<Vec<(DateTime<Utc>, DateTime<Utc>)>> = participant_busy
            .values()
            .map(|intervals| merge_busy_intervals(intervals, query.range_start, query.range_end))
            .collect();

        let mut free: Vec<CandidateSlot> = candidates
            .into_iter()
            .filter(|slot| {
                merged.iter().all(|intervals| {
                    intervals
                        .iter()
                        .all(|&(start, end)| start.max(slot.start) >= end.min(slot.end))
                })
            })
            .collect();

        // Generation order is already chronological; sort anyway so the
        // ordering invariant does not depend on it.
        free.sort_by_key(|slot| slot.start);

        Ok(free)
    }
}
