use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

const STEPS: u64 = 1000;

/// Progress bar for a check run, fed with the runner's `[0, 1]` progress.
///
/// The bar draws to stderr and is hidden when disabled or when stderr is
/// not a TTY.
#[derive(Clone)]
pub struct RunProgress {
    progress_bar: ProgressBar,
}

impl RunProgress {
    /// # Panics
    ///
    /// Panics if the progress bar template is invalid. The template is a
    /// compile-time constant.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(enabled, is_tty)
    }

    fn new_with_visibility(enabled: bool, is_tty: bool) -> Self {
        let progress_bar = if enabled && is_tty {
            Self::create_visible_progress_bar()
        } else {
            ProgressBar::hidden()
        };
        Self { progress_bar }
    }

    fn create_visible_progress_bar() -> ProgressBar {
        let pb = ProgressBar::new(STEPS);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Checking [{bar:40.cyan/blue}] {percent}% {msg}")
                // SAFETY: Template is a static string with valid format specifiers
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Moves the bar to `fraction` of the run. Values are clamped to `[0, 1]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn set_fraction(&self, fraction: f64) {
        let position = (fraction.clamp(0.0, 1.0) * STEPS as f64).round() as u64;
        self.progress_bar.set_position(position);
    }

    /// Shows the file currently being processed.
    pub fn set_message(&self, message: impl Into<String>) {
        self.progress_bar.set_message(message.into());
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
