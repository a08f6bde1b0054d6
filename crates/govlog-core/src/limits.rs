//! Governor limit aggregation.
//!
//! Limit names are an open set: the generic `Number of ...` pattern keeps
//! whatever name the runtime prints. CPU and heap use different wording and
//! are stored under synthetic names so they cannot collide with it.

use std::collections::BTreeMap;

use regex::Captures;
use tracing::debug;

use crate::patterns::{LIMIT_CPU, LIMIT_GENERIC, LIMIT_HEAP};
use crate::types::LimitReading;

/// Name under which CPU time is recorded.
pub const CPU_TIME_LIMIT: &str = "CPU time (ms)";

/// Name under which heap size is recorded.
pub const HEAP_SIZE_LIMIT: &str = "Heap size (bytes)";

/// Collects limit readings keyed by name.
///
/// A later reading for a name replaces the earlier one. The runtime prints a
/// limits block per namespace, so repeats are possible and not an error.
#[derive(Debug, Clone, Default)]
pub struct LimitAggregator {
    readings: BTreeMap<String, LimitReading>,
}

impl LimitAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a reading, replacing any earlier one with the same name.
    pub fn record(&mut self, name: impl Into<String>, used: u64, max: u64) {
        let name = name.into();
        let reading = LimitReading::new(used, max);
        if let Some(previous) = self.readings.insert(name.clone(), reading) {
            debug!(limit = %name, ?previous, ?reading, "limit reading replaced");
        }
    }

    /// Tests a line against the limit patterns. Returns true on a match.
    pub fn observe(&mut self, line: &str) -> bool {
        if let Some((used, max)) = LIMIT_CPU.captures(line).and_then(|c| usage(&c, 1)) {
            self.record(CPU_TIME_LIMIT, used, max);
            return true;
        }
        if let Some((used, max)) = LIMIT_HEAP.captures(line).and_then(|c| usage(&c, 1)) {
            self.record(HEAP_SIZE_LIMIT, used, max);
            return true;
        }
        if let Some(caps) = LIMIT_GENERIC.captures(line) {
            if let Some((used, max)) = usage(&caps, 2) {
                self.record(caps[1].trim(), used, max);
                return true;
            }
        }
        false
    }

    /// Returns the reading for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LimitReading> {
        self.readings.get(name)
    }

    /// Number of distinct limits seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether no limits were seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Consumes the aggregator.
    #[must_use]
    pub fn into_readings(self) -> BTreeMap<String, LimitReading> {
        self.readings
    }
}

/// Reads `used` and `max` from two consecutive capture groups.
fn usage(caps: &Captures<'_>, first: usize) -> Option<(u64, u64)> {
    let used = caps.get(first)?.as_str().parse().ok()?;
    let max = caps.get(first + 1)?.as_str().parse().ok()?;
    Some((used, max))
}
