//! Error types for availability resolution.

use thiserror::Error;

/// Errors raised by the availability engine.
///
/// Degenerate-but-valid inputs (an empty range, no participants) are not
/// errors; they produce empty or maximal results. An empty result always
/// means "no slots found", never a failure.
#[derive(Error, Debug)]
pub enum OverlapError {
    /// Caller-programming-error in the query (e.g. non-positive duration).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The business-hours policy is internally inconsistent.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// A recurrence rule string could not be parsed.
    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    /// A timezone string is not a valid IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Convenience alias used throughout overlap-engine.
pub type Result<T> = std::result::Result<T, OverlapError>;
