//! Business-hours, working-weekday, and absent-participant policies.
//!
//! The original system hard-coded 09:00–18:00 Mon–Fri; here the policy is an
//! explicit configuration value so tests and regional deployments can vary it.

use std::collections::HashSet;

use chrono::Weekday;
use chrono_tz::Tz;

use crate::error::{OverlapError, Result};

/// Business-hours window, working weekdays, and slot grid for candidate
/// generation.
///
/// Slot generation works on this policy's wall clock: `start_hour` and
/// `end_hour` are hours-of-day in `timezone`, and candidate starts fall on
/// `grid_minutes` boundaries from the start of business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHoursPolicy {
    /// First hour-of-day at which a slot may start (inclusive).
    pub start_hour: u32,
    /// Hour-of-day by which every slot must have ended (exclusive bound, may be 24).
    pub end_hour: u32,
    /// Weekdays on which slots are generated.
    pub working_weekdays: HashSet<Weekday>,
    /// Wall-clock timezone for the business-hours window.
    pub timezone: Tz,
    /// Grid step for candidate start times, in minutes.
    pub grid_minutes: u32,
}

impl Default for BusinessHoursPolicy {
    /// 09:00–18:00, Monday through Friday, UTC, 30-minute grid.
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 18,
            working_weekdays: [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]
            .into_iter()
            .collect(),
            timezone: chrono_tz::UTC,
            grid_minutes: 30,
        }
    }
}

impl BusinessHoursPolicy {
    /// Validate internal consistency.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidPolicy` when the hours window is empty
    /// or reversed, `end_hour` exceeds 24, the grid step is zero, or no
    /// working weekdays are configured.
    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour {
            return Err(OverlapError::InvalidPolicy(format!(
                "start_hour {} must be before end_hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.end_hour > 24 {
            return Err(OverlapError::InvalidPolicy(format!(
                "end_hour {} exceeds 24",
                self.end_hour
            )));
        }
        if self.grid_minutes == 0 {
            return Err(OverlapError::InvalidPolicy(
                "grid_minutes must be greater than 0".to_string(),
            ));
        }
        if self.working_weekdays.is_empty() {
            return Err(OverlapError::InvalidPolicy(
                "working_weekdays must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// How to treat a queried participant with no entry in the busy-time map.
///
/// The original system treated missing data as "assume available". That
/// fail-open default is kept, with fail-closed available as an explicit
/// opt-in. Under `AssumeBusy` a missing participant yields an empty result,
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentPolicy {
    /// A participant without busy data is fully free.
    #[default]
    AssumeFree,
    /// A participant without busy data blocks every slot.
    AssumeBusy,
}
