//! Concurrent busy-time aggregation across providers and participants.
//!
//! Fetching N providers for M participants is an embarrassingly parallel
//! fan-out/fan-in. Every (participant, provider) pair becomes one fetch;
//! fetches run concurrently up to a cap, each under its own deadline, and the
//! successes are concatenated per participant into the busy map
//! [`overlap_engine::AvailabilityResolver`] consumes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use overlap_engine::BusyInterval;
use tracing::{debug, warn};

use crate::adapter::CalendarProviderAdapter;
use crate::error::ProviderError;

/// Concurrency and deadline settings for the fetch fan-out.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Maximum number of provider fetches in flight at once.
    pub max_concurrent_fetches: usize,
    /// Deadline applied to each individual fetch.
    pub fetch_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// One (participant, provider) fetch that produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub participant_id: String,
    pub provider_id: String,
    /// Rendered [`ProviderError`] for reporting; the fetch is not retried.
    pub reason: String,
}

/// Aggregated busy times plus the fetches that contributed nothing.
///
/// A failed fetch leaves its provider's busy time invisible, so a non-empty
/// `failures` list means the availability computed from `busy` may be
/// over-optimistic. Surfacing that degraded confidence is the caller's call.
#[derive(Debug, Clone, Default)]
pub struct BusyTimeReport {
    /// Concatenated busy intervals per participant, sorted by start. Every
    /// requested participant has an entry, possibly empty.
    pub busy: HashMap<String, Vec<BusyInterval>>,
    /// Every (participant, provider) pair whose fetch failed or timed out,
    /// sorted for deterministic reporting.
    pub failures: Vec<FetchFailure>,
}

impl BusyTimeReport {
    /// Whether every fetch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch busy intervals for all participants from all providers.
///
/// Issues one fetch per (participant, provider) pair through a bounded
/// concurrent stream, with `options.fetch_timeout` applied to each fetch. A
/// failed or timed-out fetch is logged, recorded in the report, and otherwise
/// skipped — one provider being down never fails the whole query. No retries.
pub async fn collect_busy_intervals(
    adapters: &[Arc<dyn CalendarProviderAdapter>],
    participant_ids: &[String],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    options: &FetchOptions,
) -> BusyTimeReport {
    // Every requested participant gets a map entry even when all of their
    // fetches fail; downstream "missing participant" policy must only ever
    // apply to participants the caller never asked about.
    let mut busy: HashMap<String, Vec<BusyInterval>> = participant_ids
        .iter()
        .map(|id| (id.clone(), Vec::new()))
        .collect();
    let mut failures: Vec<FetchFailure> = Vec::new();

    let pairs: Vec<(String, Arc<dyn CalendarProviderAdapter>)> = participant_ids
        .iter()
        .flat_map(|id| adapters.iter().map(move |a| (id.clone(), Arc::clone(a))))
        .collect();

    let concurrency = options.max_concurrent_fetches.max(1);
    let timeout = options.fetch_timeout;

    let mut fetches = stream::iter(pairs)
        .map(|(participant_id, adapter)| async move {
            let provider_id = adapter.provider_id().to_string();
            let result = tokio::time::timeout(
                timeout,
                adapter.busy_intervals(&participant_id, range_start, range_end),
            )
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    provider_id: adapter.provider_id().to_string(),
                    timeout,
                })
            });
            (participant_id, provider_id, result)
        })
        .buffer_unordered(concurrency);

    while let Some((participant_id, provider_id, result)) = fetches.next().await {
        match result {
            Ok(intervals) => {
                debug!(
                    %participant_id,
                    %provider_id,
                    count = intervals.len(),
                    "fetched busy intervals"
                );
                if let Some(list) = busy.get_mut(&participant_id) {
                    list.extend(intervals);
                }
            }
            Err(err) => {
                warn!(
                    %participant_id,
                    %provider_id,
                    error = %err,
                    "provider fetch failed, proceeding without its busy data"
                );
                failures.push(FetchFailure {
                    participant_id,
                    provider_id,
                    reason: err.to_string(),
                });
            }
        }
    }

    // buffer_unordered yields in completion order; normalize for callers.
    for intervals in busy.values_mut() {
        intervals.sort_by_key(|b| (b.start, b.end));
    }
    failures.sort_by(|a, b| {
        (&a.participant_id, &a.provider_id).cmp(&(&b.participant_id, &b.provider_id))
    });

    BusyTimeReport { busy, failures }
}
