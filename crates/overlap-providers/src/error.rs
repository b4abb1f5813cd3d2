//! Error types for provider fetches.

use std::time::Duration;

use thiserror::Error;

/// A single provider fetch failing. Recovered by omission at the aggregation
/// layer — never propagated as a hard failure of the availability query.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The backend could not be reached or returned an error status.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The fetch exceeded its deadline.
    #[error("Provider {provider_id} timed out after {timeout:?}")]
    Timeout {
        provider_id: String,
        timeout: Duration,
    },

    /// The backend responded with data that could not be normalized into
    /// busy intervals.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}
