use std::fs;
use std::path::{Path, PathBuf};

use super::FileCategory;
use crate::error::{QaError, Result};

/// Side-car file scan: records whether the file exists and has content.
#[derive(Debug)]
pub struct ExistenceScan {
    path: PathBuf,
    category: FileCategory,
    outcome: Option<Existence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Missing,
    Empty,
    Present,
}

impl ExistenceScan {
    pub fn new(path: impl Into<PathBuf>, category: FileCategory) -> Self {
        Self {
            path: path.into(),
            category,
            outcome: None,
        }
    }

    /// Checks the file, then reports progress 1.0.
    ///
    /// # Errors
    /// Returns [`QaError::ScanAlreadyRun`] on a second call.
    pub fn scan_datagram(&mut self, progress: Option<&mut dyn FnMut(f64)>) -> Result<()> {
        if self.outcome.is_some() {
            return Err(QaError::ScanAlreadyRun(self.path.clone()));
        }
        let outcome = match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Existence::Present,
            Ok(meta) if meta.is_file() => Existence::Empty,
            _ => Existence::Missing,
        };
        self.outcome = Some(outcome);
        if let Some(progress) = progress {
            progress(1.0);
        }
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn category(&self) -> FileCategory {
        self.category
    }

    /// Result of the pass, `None` until it has run.
    #[must_use]
    pub const fn outcome(&self) -> Option<Existence> {
        self.outcome
    }
}
