//! Calendar provider adapter trait.
//!
//! One implementation per calendar backend. Adapters fetch a participant's
//! occupied periods for a range and normalize them into
//! [`BusyInterval`]s — authentication, paging, and response parsing are the
//! adapter's private business.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use overlap_engine::BusyInterval;

use crate::error::ProviderError;

/// Uniform fetch interface over one calendar backend.
///
/// Implementations must be cheap to share across concurrent fetches; the
/// aggregation layer issues many calls against the same adapter at once.
#[async_trait]
pub trait CalendarProviderAdapter: Send + Sync {
    /// Stable identifier for this provider (e.g. `"google"`, `"outlook"`).
    /// Used in failure reports and logs.
    fn provider_id(&self) -> &str;

    /// Fetch the participant's busy intervals within `[range_start, range_end)`.
    ///
    /// Intervals may be unsorted and may overlap; the resolver handles both.
    /// Intervals outside the range are tolerated and ignored downstream.
    ///
    /// # Errors
    /// Any [`ProviderError`]. The aggregation layer treats a failed fetch as
    /// "no busy data from this provider" and records it in the fetch report.
    async fn busy_intervals(
        &self,
        participant_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>, ProviderError>;
}
