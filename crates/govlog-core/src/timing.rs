//! Execution timing from the start and finish markers.

use crate::patterns::{EXECUTION_FINISHED, EXECUTION_STARTED};

/// The counters on the execution markers are nanoseconds.
pub const NANOS_PER_MILLI: i128 = 1_000_000;

/// Tracks the execution start and finish counters.
///
/// The first start marker and the last finish marker are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionClock {
    started: Option<u64>,
    finished: Option<u64>,
}

impl ExecutionClock {
    /// Creates a clock with no markers seen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: None,
            finished: None,
        }
    }

    /// Feeds a raw line. Returns true if it was a timing marker.
    pub fn observe(&mut self, line: &str) -> bool {
        if let Some(caps) = EXECUTION_STARTED.captures(line) {
            if self.started.is_none() {
                self.started = caps[1].parse().ok();
            }
            return true;
        }
        if let Some(caps) = EXECUTION_FINISHED.captures(line) {
            if let Ok(counter) = caps[1].parse() {
                self.finished = Some(counter);
            }
            return true;
        }
        false
    }

    /// Elapsed milliseconds, rounded half away from zero, when both markers were seen.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<i64> {
        let (start, end) = (self.started?, self.finished?);
        let nanos = i128::from(end) - i128::from(start);
        let half = NANOS_PER_MILLI / 2;
        let rounded = if nanos >= 0 {
            (nanos + half) / NANOS_PER_MILLI
        } else {
            (nanos - half) / NANOS_PER_MILLI
        };
        i64::try_from(rounded).ok()
    }
}
