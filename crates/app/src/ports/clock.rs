//! Clock port: current time and the offset used for display.

use chrono::{FixedOffset, Local};

use pn2133_domain::time::{self, Timestamp};

/// Source of the current instant and of the display offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Offset applied when formatting timestamps for display.
    fn offset(&self) -> FixedOffset;
}

/// Host wall clock, displayed in the host's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }

    fn offset(&self) -> FixedOffset {
        *Local::now().offset()
    }
}
