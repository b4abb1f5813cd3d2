//! # overlap-providers
//!
//! The aggregation boundary between calendar backends and the pure
//! [`overlap_engine`] resolver.
//!
//! A [`CalendarProviderAdapter`] wraps one calendar backend (Google, Outlook,
//! Apple, …) behind a uniform busy-interval fetch. [`collect_busy_intervals`]
//! fans one fetch per (participant, provider) pair out concurrently — bounded
//! and individually timed out — and joins the results into the
//! per-participant busy map the resolver consumes, alongside a report of
//! every fetch that failed.
//!
//! Partial failure never aborts the query: a failed or timed-out fetch
//! contributes no busy data, which biases the result toward over-availability.
//! Callers that care inspect [`BusyTimeReport::failures`].
//!
//! ## Modules
//!
//! - [`adapter`] — the provider adapter trait
//! - [`aggregate`] — concurrent fan-out/fan-in with partial-failure reporting
//! - [`error`] — Error types

pub mod adapter;
pub mod aggregate;
pub mod error;

pub use adapter::CalendarProviderAdapter;
pub use aggregate::{collect_busy_intervals, BusyTimeReport, FetchFailure, FetchOptions};
pub use error::ProviderError;
