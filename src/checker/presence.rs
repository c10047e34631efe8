use serde_json::json;

use crate::scan::{ScanResult, ScanState};

/// A datagram (or swath array) a check expects to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredDatagram {
    pub id: &'static str,
    /// Absence fails the check instead of warning.
    pub critical: bool,
    /// Reported when neither the id nor an alternative is present.
    pub message: &'static str,
    /// Ids that satisfy the requirement in place of `id`.
    pub alternatives: &'static [&'static str],
}

impl RequiredDatagram {
    #[must_use]
    pub const fn critical(id: &'static str, message: &'static str) -> Self {
        Self {
            id,
            critical: true,
            message,
            alternatives: &[],
        }
    }

    #[must_use]
    pub const fn optional(id: &'static str, message: &'static str) -> Self {
        Self {
            id,
            critical: false,
            message,
            alternatives: &[],
        }
    }

    #[must_use]
    pub const fn or(mut self, alternatives: &'static [&'static str]) -> Self {
        self.alternatives = alternatives;
        self
    }

    fn is_satisfied(&self, is_present: &impl Fn(&str) -> bool) -> bool {
        is_present(self.id) || self.alternatives.iter().any(|alt| is_present(*alt))
    }
}

/// Classifies the presence of `required` datagrams.
///
/// Any missing critical datagram fails the result; otherwise any missing
/// non-critical datagram makes it a warning. One message is emitted per
/// missing datagram, in input order. `data` always partitions the ids into
/// `present`, `missing_critical` and `missing_noncritical`.
pub fn evaluate_presence(required: &[RequiredDatagram], is_present: impl Fn(&str) -> bool) -> ScanResult {
    let mut present = Vec::new();
    let mut missing_critical = Vec::new();
    let mut missing_noncritical = Vec::new();
    let mut messages = Vec::new();

    for datagram in required {
        if datagram.is_satisfied(&is_present) {
            present.push(datagram.id);
            continue;
        }
        messages.push(datagram.message.to_string());
        if datagram.critical {
            missing_critical.push(datagram.id);
        } else {
            missing_noncritical.push(datagram.id);
        }
    }

    let state = if !missing_critical.is_empty() {
        ScanState::Fail
    } else if !missing_noncritical.is_empty() {
        ScanState::Warning
    } else {
        ScanState::Pass
    };

    ScanResult::new(state)
        .with_messages(messages)
        .with_data(json!({
            "present": present,
            "missing_critical": missing_critical,
            "missing_noncritical": missing_noncritical,
        }))
}

#[cfg(test)]
#[path = "presence_tests.rs"]
mod tests;
