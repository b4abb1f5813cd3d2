//! # overlap-engine
//!
//! Deterministic mutual free/busy availability resolution for multi-calendar
//! scheduling.
//!
//! Given each participant's busy intervals (already collected across their
//! calendar providers), a search range, and a desired meeting duration, the
//! engine produces the chronologically ordered list of grid-aligned time
//! windows in which every participant is simultaneously free, subject to a
//! business-hours and working-weekday policy.
//!
//! The engine is a pure function of its inputs: no I/O, no shared state, no
//! suspension points. It is safe to call concurrently from any number of
//! callers. Provider fetching and aggregation live in the companion
//! `overlap-providers` crate.
//!
//! ## Modules
//!
//! - [`resolver`] — `AvailabilityQuery` + `AvailabilityResolver`, the core operation
//! - [`slots`] — candidate slot generation on the business-hours grid
//! - [`busy`] — `BusyInterval` and busy-period merging
//! - [`policy`] — business-hours/weekday and absent-participant policies
//! - [`recurring`] — RFC 5545 recurrence rules → concrete busy intervals
//! - [`error`] — Error types

pub mod busy;
pub mod error;
pub mod policy;
pub mod recurring;
pub mod resolver;
pub mod slots;

pub use busy::{merge_busy_intervals, BusyInterval};
pub use error::OverlapError;
pub use policy::{AbsentPolicy, BusinessHoursPolicy};
pub use recurring::{expand_recurring_busy, RecurrenceSpec};
pub use resolver::{AvailabilityQuery, AvailabilityResolver};
pub use slots::CandidateSlot;
