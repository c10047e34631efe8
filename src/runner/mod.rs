//! Drives one scan pass per target file and runs the checks bound to it.

mod execute;

use std::path::Path;

use indexmap::IndexMap;

pub use execute::timestamp;

use crate::checker::CheckRegistry;
use crate::error::{QaError, Result};
use crate::qajson::QajsonCheck;
use crate::scan::{Scan, file_size};

/// Target file of a group of checks: `(path, file-type category)`.
pub type FileKey = (String, String);

/// Lifecycle of a [`CheckRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Uninitialized,
    Initialized,
    Running,
    Complete,
}

/// Hooks invoked synchronously while checks run.
#[derive(Default)]
pub struct RunCallbacks<'a> {
    /// Overall progress in `[0, 1]`, never decreasing.
    pub on_progress: Option<&'a mut dyn FnMut(f64)>,
    /// The full request list, after each file's checks have completed.
    pub on_update: Option<&'a mut dyn FnMut(&[QajsonCheck])>,
    /// Polled before each file; `true` ends the run.
    pub is_stopped: Option<&'a dyn Fn() -> bool>,
}

impl RunCallbacks<'_> {
    fn progress(&mut self, value: f64) {
        if let Some(sink) = self.on_progress.as_mut() {
            sink(value.clamp(0.0, 1.0));
        }
    }

    fn stopped(&self) -> bool {
        self.is_stopped.is_some_and(|is_stopped| is_stopped())
    }
}

/// Runs check requests against their target files.
///
/// Requests are grouped by target file in [`initialize`](Self::initialize);
/// [`run_checks`](Self::run_checks) then scans each file once and writes
/// every bound check's output back into its request.
#[derive(Debug)]
pub struct CheckRunner {
    checks: Vec<QajsonCheck>,
    registry: CheckRegistry,
    checklist: IndexMap<FileKey, Vec<usize>>,
    state: RunnerState,
}

impl CheckRunner {
    #[must_use]
    pub fn new(checks: Vec<QajsonCheck>) -> Self {
        Self::with_registry(checks, CheckRegistry::default())
    }

    #[must_use]
    pub fn with_registry(checks: Vec<QajsonCheck>, registry: CheckRegistry) -> Self {
        Self {
            checks,
            registry,
            checklist: IndexMap::new(),
            state: RunnerState::Uninitialized,
        }
    }

    /// Groups supported requests by the files they target. Requests whose
    /// `(id, version)` is not registered are left untouched and never run.
    pub fn initialize(&mut self) {
        self.checklist.clear();
        for (index, check) in self.checks.iter().enumerate() {
            let info = &check.info;
            if !self.registry.is_supported(&info.id, &info.version) {
                tracing::warn!(
                    id = %info.id,
                    version = %info.version,
                    name = %info.name,
                    "dropping unsupported check"
                );
                continue;
            }
            for file in &check.inputs.files {
                self.checklist
                    .entry((file.path.clone(), file.file_type.clone()))
                    .or_default()
                    .push(index);
            }
        }
        self.state = RunnerState::Initialized;
    }

    /// Scans every target file in turn and runs its checks.
    ///
    /// # Errors
    /// Returns [`QaError::NotInitialized`] before [`initialize`](Self::initialize),
    /// scan errors for unsupported or malformed files, and
    /// [`QaError::OrphanedOutput`] if an output has no matching request.
    /// Errors raised by a check itself are recorded in its output instead.
    pub fn run_checks(&mut self, callbacks: &mut RunCallbacks<'_>) -> Result<()> {
        if self.state == RunnerState::Uninitialized {
            return Err(QaError::NotInitialized);
        }
        self.state = RunnerState::Running;

        let sizes: Vec<u64> = self
            .checklist
            .keys()
            .map(|(path, _)| file_size(Path::new(path)))
            .collect();
        let weights = progress_weights(&sizes);
        tracing::info!(files = sizes.len(), checks = self.checks.len(), "running checks");

        let checklist = std::mem::take(&mut self.checklist);
        let mut completed = 0.0;
        let mut outcome = Ok(());
        for ((key, indices), weight) in checklist.iter().zip(weights) {
            if callbacks.stopped() {
                tracing::info!(file = %key.0, "run stopped before file");
                break;
            }
            outcome = self.run_file(key, indices, completed, weight, callbacks);
            if outcome.is_err() {
                break;
            }
            completed += weight;
            callbacks.progress(completed);
            if let Some(on_update) = callbacks.on_update.as_mut() {
                on_update(&self.checks);
            }
        }
        self.checklist = checklist;
        self.state = RunnerState::Complete;
        outcome
    }

    fn run_file(
        &mut self,
        (path, file_type): &FileKey,
        indices: &[usize],
        base: f64,
        weight: f64,
        callbacks: &mut RunCallbacks<'_>,
    ) -> Result<()> {
        tracing::debug!(file = %path, file_type = %file_type, checks = indices.len(), "scanning file");
        let mut scan = Scan::for_file(Path::new(path), file_type)?;
        {
            let mut forward = |local: f64| callbacks.progress(local.mul_add(weight, base));
            let sink: &mut dyn FnMut(f64) = &mut forward;
            scan.scan_datagram(Some(sink))?;
        }

        for &index in indices {
            let request = &self.checks[index];
            let info = &request.info;
            let check = self
                .registry
                .get(&info.id, &info.version)
                .ok_or_else(|| QaError::UnsupportedCheck {
                    id: info.id.clone(),
                    version: info.version.clone(),
                })?;
            let params = self.registry.params_for(check, &request.inputs.params);
            tracing::debug!(check = check.name(), file = %path, "running check");
            let outputs = execute::execute(check, &scan, &params);

            let id = info.id.clone();
            let files: Vec<String> = request.file_paths().map(str::to_string).collect();
            let file_refs: Vec<&str> = files.iter().map(String::as_str).collect();
            let matches = |candidate: &QajsonCheck| {
                candidate.info.id == id && candidate.has_same_files(&file_refs)
            };
            let slot = if matches(&self.checks[index]) {
                index
            } else {
                tracing::warn!(
                    check = %id,
                    index,
                    "output slot no longer matches its request, matching by id and files"
                );
                self.checks
                    .iter()
                    .position(matches)
                    .ok_or_else(|| QaError::OrphanedOutput {
                        check_id: id.clone(),
                        files: files.clone(),
                    })?
            };
            self.checks[slot].outputs = Some(outputs);
        }
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> RunnerState {
        self.state
    }

    /// The grouping built by [`initialize`](Self::initialize).
    #[must_use]
    pub const fn file_checks(&self) -> &IndexMap<FileKey, Vec<usize>> {
        &self.checklist
    }

    #[must_use]
    pub fn checks(&self) -> &[QajsonCheck] {
        &self.checks
    }

    #[must_use]
    pub fn into_checks(self) -> Vec<QajsonCheck> {
        self.checks
    }
}

/// Each file's share of overall progress, by byte size. Files are weighted
/// equally when none has any size.
#[allow(clippy::cast_precision_loss)]
fn progress_weights(sizes: &[u64]) -> Vec<f64> {
    let total: u64 = sizes.iter().sum();
    if total == 0 {
        let share = 1.0 / sizes.len().max(1) as f64;
        return vec![share; sizes.len()];
    }
    sizes.iter().map(|&size| size as f64 / total as f64).collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
