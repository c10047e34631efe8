use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File type '{file_type}' with extension '{extension}' is not supported: {path}")]
    UnsupportedFile {
        path: PathBuf,
        file_type: String,
        extension: String,
    },

    #[error("Malformed datagram in {path} at byte {offset}: {reason}")]
    Decode {
        path: PathBuf,
        offset: u64,
        reason: String,
    },

    #[error("Scan of {0} has already been run; a scan pass cannot be restarted")]
    ScanAlreadyRun(PathBuf),

    #[error("Check runner is not initialized")]
    NotInitialized,

    #[error("Could not find check {check_id} for files [{}]", files.join(", "))]
    OrphanedOutput { check_id: String, files: Vec<String> },

    #[error("Check {id} version {version} is not supported")]
    UnsupportedCheck { id: String, version: String },

    #[error("{0}")]
    Check(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QaError {
    /// Builds a decode error for `path` at byte `offset`.
    pub fn decode(path: impl Into<PathBuf>, offset: u64, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            offset,
            reason: reason.into(),
        }
    }

    /// Renders this error together with every error in its `source()` chain,
    /// one per line.
    #[must_use]
    pub fn chain(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            text.push_str("\n  caused by: ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}

pub type Result<T> = std::result::Result<T, QaError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
