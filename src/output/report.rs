use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::checker::CheckRegistry;
use crate::qajson::{ExecutionStatus, QajsonCheck};
use crate::scan::{Existence, Scan, ScanState};

/// What a single scan pass found in one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub path: String,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_consumed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pings: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missed_pings: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existence: Option<&'static str>,
    pub types: Vec<TypeRow>,
}

/// One datagram type's summary line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRow {
    pub type_id: String,
    pub byte_count: u64,
    pub record_count: u64,
    pub ping_count: u64,
    pub missed_pings: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub stop_time: Option<DateTime<Utc>>,
}

impl ScanReport {
    /// Summarises a scan whose pass has run.
    #[must_use]
    pub fn from_scan(scan: &Scan) -> Self {
        let path = scan.path().display().to_string();
        match scan {
            Scan::Datagram(datagram) => Self {
                path,
                file_type: crate::scan::FileCategory::Raw.as_str().to_string(),
                format: Some(datagram.format().name()),
                file_size: datagram.file_size(),
                bytes_consumed: Some(datagram.bytes_consumed()),
                size_matched: Some(datagram.is_size_matched()),
                total_pings: Some(datagram.total_pings(None)),
                missed_pings: Some(datagram.missed_pings(None)),
                existence: None,
                types: datagram
                    .summaries()
                    .iter()
                    .map(|(type_id, summary)| TypeRow {
                        type_id: type_id.clone(),
                        byte_count: summary.byte_count,
                        record_count: summary.record_count,
                        ping_count: summary.ping_count,
                        missed_pings: summary.missed_pings,
                        start_time: summary.start_time,
                        stop_time: summary.stop_time,
                    })
                    .collect(),
            },
            Scan::Existence(existence) => Self {
                path,
                file_type: existence.category().as_str().to_string(),
                format: None,
                file_size: crate::scan::file_size(existence.path()),
                bytes_consumed: None,
                size_matched: None,
                total_pings: None,
                missed_pings: None,
                existence: existence.outcome().map(|outcome| match outcome {
                    Existence::Present => "present",
                    Existence::Empty => "empty",
                    Existence::Missing => "missing",
                }),
                types: Vec::new(),
            },
        }
    }
}

/// A registered check, as listed by `sonar-qa checks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckEntry {
    pub id: String,
    pub name: &'static str,
    pub version: &'static str,
    pub file_type: &'static str,
    pub params: IndexMap<String, Value>,
}

impl CheckEntry {
    /// Lists every check in `registry`, with configured defaults applied.
    #[must_use]
    pub fn list(registry: &CheckRegistry) -> Vec<Self> {
        registry
            .iter()
            .map(|check| Self {
                id: check.id().to_string(),
                name: check.name(),
                version: check.version(),
                file_type: check.category().as_str(),
                params: registry
                    .default_params(check)
                    .into_iter()
                    .map(|param| (param.name, param.value))
                    .collect(),
            })
            .collect()
    }
}

/// Tally of check outputs after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    /// Checks whose execution failed.
    pub errors: usize,
    /// Checks with no output, because they were unsupported or the run stopped.
    pub not_run: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_checks(checks: &[QajsonCheck]) -> Self {
        checks.iter().fold(
            Self {
                total: checks.len(),
                ..Self::default()
            },
            |mut summary, check| {
                let Some(outputs) = &check.outputs else {
                    summary.not_run += 1;
                    return summary;
                };
                let execution_failed = outputs
                    .execution
                    .as_ref()
                    .is_some_and(|execution| execution.status == ExecutionStatus::Failed);
                match (execution_failed, outputs.check_state) {
                    (true, _) => summary.errors += 1,
                    (false, Some(ScanState::Pass)) => summary.passed += 1,
                    (false, Some(ScanState::Warning)) => summary.warnings += 1,
                    (false, Some(ScanState::Fail)) => summary.failed += 1,
                    (false, None) => summary.not_run += 1,
                }
                summary
            },
        )
    }

    /// True when any check failed or could not be executed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0 || self.errors > 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} checks: {} passed, {} warnings, {} failed, {} errors",
            self.total, self.passed, self.warnings, self.failed, self.errors
        )?;
        if self.not_run > 0 {
            write!(f, ", {} not run", self.not_run)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
