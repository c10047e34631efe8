//! Versioned QA checks evaluated against a completed scan.
//!
//! Each built-in check is a unit struct implementing [`Check`]; the
//! evaluation itself lives in a per-concern module ([`presence`], [`pings`],
//! [`metadata`], [`height`], [`track`]) and dispatches on the scan's raw
//! format where formats differ.

mod checks;
pub mod descriptors;
pub mod geo;
pub mod height;
pub mod merge;
pub mod metadata;
pub mod pings;
pub mod presence;
mod registry;
#[cfg(test)]
mod test_fixtures;
pub mod track;

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

pub use checks::builtin_checks;
pub use presence::{RequiredDatagram, evaluate_presence};
pub use registry::CheckRegistry;

use crate::error::{QaError, Result};
use crate::qajson::QajsonParam;
use crate::scan::{DatagramScan, ExistenceScan, FileCategory, PassState, Scan, ScanResult};

/// A named, versioned evaluation of a completed [`Scan`].
pub trait Check {
    fn id(&self) -> Uuid;

    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str {
        "1"
    }

    /// File-type category the check targets.
    fn category(&self) -> FileCategory {
        FileCategory::Raw
    }

    fn default_params(&self) -> Vec<QajsonParam> {
        Vec::new()
    }

    /// Evaluates `scan`, whose pass has completed.
    ///
    /// # Errors
    /// Returns an error when the check cannot be evaluated, for example
    /// because a parameter is malformed. Data-quality findings are never
    /// errors; they are reported through the [`ScanResult`].
    fn run(&self, scan: &Scan, params: &CheckParams) -> Result<ScanResult>;
}

/// Parameters resolved for one check execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckParams {
    values: IndexMap<String, Value>,
}

impl CheckParams {
    /// Starts from `defaults`; a request parameter with the same name wins.
    #[must_use]
    pub fn resolve(defaults: &[QajsonParam], requested: &[QajsonParam]) -> Self {
        let values = defaults
            .iter()
            .chain(requested)
            .map(|param| (param.name.clone(), param.value.clone()))
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Reads `name` as a number. Numeric strings are accepted.
    ///
    /// # Errors
    /// Returns [`QaError::Check`] if the parameter is missing or not numeric.
    pub fn number(&self, name: &str) -> Result<f64> {
        let value = self
            .get(name)
            .ok_or_else(|| QaError::Check(format!("Parameter '{name}' was not provided")))?;
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number
            .filter(|n| n.is_finite())
            .ok_or_else(|| QaError::Check(format!("Parameter '{name}' must be numeric (found {value})")))
    }
}

/// The completed datagram scan behind `scan`.
///
/// # Errors
/// Returns [`QaError::Check`] for existence scans and for passes that did
/// not complete.
pub fn completed_datagram_scan(scan: &Scan) -> Result<&DatagramScan> {
    let datagram = scan.as_datagram().ok_or_else(|| {
        QaError::Check(format!("{} is not a raw datagram scan", scan.path().display()))
    })?;
    if datagram.state() != PassState::Complete {
        return Err(QaError::Check(format!(
            "Scan of {} did not complete",
            datagram.path().display()
        )));
    }
    Ok(datagram)
}

/// The completed existence scan behind `scan`.
///
/// # Errors
/// Returns [`QaError::Check`] for datagram scans and for passes that have
/// not run.
pub fn completed_existence_scan(scan: &Scan) -> Result<&ExistenceScan> {
    scan.as_existence()
        .filter(|existence| existence.outcome().is_some())
        .ok_or_else(|| {
            QaError::Check(format!(
                "{} has no completed existence scan",
                scan.path().display()
            ))
        })
}

/// File name component of the scanned path.
fn base_name(scan: &DatagramScan) -> String {
    scan.path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
