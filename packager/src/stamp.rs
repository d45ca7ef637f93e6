//! Run identifiers derived from the local clock.
//!
//! A packaging run names both its staging directory and its archive after
//! the second it started, so two runs in the same second share a name.

use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt;

/// Second-resolution timestamp identifying one packaging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunStamp(NaiveDateTime);

impl RunStamp {
    /// Capture the current local time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Build a stamp from an explicit local date and time.
    #[must_use]
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self(at.with_nanosecond(0).unwrap_or(at))
    }

    /// Compact identifier used in output names (`YYYYMMDD_HHMMSS`).
    #[must_use]
    pub fn id(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Human-readable rendering (`YYYY-MM-DD HH:MM:SS`).
    #[must_use]
    pub fn display_time(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
