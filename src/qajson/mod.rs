//! Serde model of the QA JSON check document.
//!
//! Only the parts the runner reads or writes are typed. Every level keeps
//! unknown attributes in a flattened `extra` map so a document survives a
//! load/save round trip unchanged apart from the check outputs.

mod expand;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use expand::expand_per_file;

use crate::error::{QaError, Result};
use crate::scan::{ScanResult, ScanState};

type Extra = IndexMap<String, Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonRoot {
    pub qa: Qajson,
}

impl QajsonRoot {
    /// Reads and parses a QA JSON file.
    ///
    /// # Errors
    /// Returns [`QaError::FileRead`] or [`QaError::Json`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| QaError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Serializes the document.
    ///
    /// # Errors
    /// Returns [`QaError::Json`] if a value cannot be serialized.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Checks of the raw data level, empty when the level is absent.
    #[must_use]
    pub fn raw_data_checks(&self) -> &[QajsonCheck] {
        self.qa
            .raw_data
            .as_ref()
            .map(|level| level.checks.as_slice())
            .unwrap_or_default()
    }

    pub fn raw_data_checks_mut(&mut self) -> &mut Vec<QajsonCheck> {
        &mut self.qa.raw_data.get_or_insert_with(QajsonDataLevel::default).checks
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Qajson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<QajsonDataLevel>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonDataLevel {
    #[serde(default)]
    pub checks: Vec<QajsonCheck>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One check request: what to run, on which files, and its output slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonCheck {
    pub info: QajsonInfo,
    #[serde(default)]
    pub inputs: QajsonInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<QajsonOutputs>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl QajsonCheck {
    /// Input file paths, as written in the document.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.inputs.files.iter().map(|file| file.path.as_str())
    }

    /// True when both requests name exactly the same set of input paths.
    #[must_use]
    pub fn has_same_files(&self, paths: &[&str]) -> bool {
        self.file_paths().all(|path| paths.iter().any(|other| *other == path))
            && paths.iter().all(|path| self.file_paths().any(|own| own == *path))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonInputs {
    #[serde(default)]
    pub files: Vec<QajsonFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<QajsonParam>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonFile {
    pub path: String,
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QajsonParam {
    pub name: String,
    pub value: Value,
}

impl QajsonParam {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Output slot of a check request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QajsonOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<QajsonExecution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_state: Option<ScanState>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl QajsonOutputs {
    #[must_use]
    pub fn from_result(result: ScanResult) -> Self {
        Self {
            execution: None,
            check_state: Some(result.state),
            messages: result.messages,
            data: result.data,
            extra: Extra::new(),
        }
    }

    #[must_use]
    pub fn with_execution(mut self, execution: QajsonExecution) -> Self {
        self.execution = Some(execution);
        self
    }

    /// True when the check ran and reported a failing verdict, or did not
    /// run to completion.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.check_state == Some(ScanState::Fail)
            || self
                .execution
                .as_ref()
                .is_some_and(|execution| execution.status == ExecutionStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QajsonExecution {
    pub start: String,
    pub end: String,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Draft,
    Queued,
    Running,
    Completed,
    Failed,
    Aborted,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
