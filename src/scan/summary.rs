use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate statistics for one datagram type within one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatagramTypeSummary {
    pub byte_count: u64,
    pub record_count: u64,
    pub ping_count: u64,
    pub missed_pings: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub stop_time: Option<DateTime<Utc>>,
}

impl DatagramTypeSummary {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            byte_count: 0,
            record_count: 0,
            ping_count: 0,
            missed_pings: 0,
            start_time: None,
            stop_time: None,
        }
    }

    pub(crate) fn record(&mut self, length: u64, timestamp: Option<DateTime<Utc>>) {
        self.byte_count += length;
        self.record_count += 1;
        if let Some(time) = timestamp {
            if self.start_time.is_none() {
                self.start_time = Some(time);
            }
            self.stop_time = Some(time);
        }
    }

    pub(crate) const fn apply(&mut self, step: PingStep) {
        self.ping_count += step.pings;
        self.missed_pings += step.missed;
    }

    /// Missed pings as a percentage of counted pings, if any were counted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn missed_percent(&self) -> Option<f64> {
        (self.ping_count > 0).then(|| self.missed_pings as f64 * 100.0 / self.ping_count as f64)
    }
}

/// Ping accounting contributed by one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PingStep {
    pub pings: u64,
    pub missed: u64,
}

impl PingStep {
    pub const NONE: Self = Self {
        pings: 0,
        missed: 0,
    };
    pub const ONE: Self = Self {
        pings: 1,
        missed: 0,
    };
}

/// Last-seen sequence counter per ping-bearing type.
#[derive(Debug, Default)]
pub(crate) struct PingTracker {
    last: HashMap<String, u32>,
}

impl PingTracker {
    /// Records `counter` for `type_id`. The first counter of a type seeds
    /// the tracker; regressions count nothing.
    pub fn observe(&mut self, type_id: &str, counter: u32) -> PingStep {
        let Some(last) = self.last.get_mut(type_id) else {
            self.last.insert(type_id.to_string(), counter);
            return PingStep::NONE;
        };
        let gap = i64::from(counter) - i64::from(*last);
        *last = counter;
        if gap >= 1 {
            PingStep {
                pings: 1,
                missed: gap.unsigned_abs() - 1,
            }
        } else {
            PingStep::NONE
        }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
