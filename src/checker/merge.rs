use chrono::{DateTime, Utc};

use crate::decoder::{Position, RuntimeParameters, SwathPing};

/// A timed coordinate from a format's position source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PositionFix {
    /// Fix from a position datagram; untimed records have none.
    #[must_use]
    pub fn from_position(position: &Position) -> Option<Self> {
        Some(Self {
            time: position.time?,
            latitude: position.latitude,
            longitude: position.longitude,
        })
    }

    #[must_use]
    pub fn from_swath_ping(ping: &SwathPing) -> Option<Self> {
        Some(Self {
            time: ping.time?,
            latitude: ping.latitude,
            longitude: ping.longitude,
        })
    }
}

/// A time-stamped record that can be given the coordinates of a fix.
pub trait MergeTarget {
    fn time(&self) -> Option<DateTime<Utc>>;

    fn set_position(&mut self, latitude: f64, longitude: f64);
}

/// Attaches to each target the latest fix at or before its time.
///
/// Both slices must already be in time order. Targets earlier than every
/// fix take the first fix. With no fixes the targets are left untouched.
pub fn merge_position<T: MergeTarget>(positions: &[PositionFix], targets: &mut [T]) {
    let Some(first) = positions.first() else {
        return;
    };
    let mut cursor = 0;
    let mut previous = first;
    for target in targets {
        let time = target.time();
        while let Some(fix) = positions.get(cursor) {
            if Some(fix.time) > time {
                break;
            }
            previous = fix;
            cursor += 1;
        }
        target.set_position(previous.latitude, previous.longitude);
    }
}

/// Keeps each record whose parameter text differs from the previously
/// kept record. Only consecutive repeats are dropped.
pub fn parameter_changes<'a>(records: impl IntoIterator<Item = &'a RuntimeParameters>) -> Vec<&'a RuntimeParameters> {
    let mut kept: Vec<&RuntimeParameters> = Vec::new();
    for record in records {
        if kept.last().is_none_or(|last| last.text != record.text) {
            kept.push(record);
        }
    }
    kept
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
