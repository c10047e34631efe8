use crate::cli::{Cli, RunArgs};
use crate::output::{RunProgress, RunSummary};
use crate::qajson::QajsonRoot;
use crate::runner::{CheckRunner, RunCallbacks};
use crate::{EXIT_CHECK_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_run(args: &RunArgs, cli: &Cli) -> i32 {
    match run_run_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Runs the raw data checks of a QA JSON document and writes the document
/// back with outputs filled in.
///
/// # Errors
/// Returns an error if configuration or the document cannot be loaded, a
/// file cannot be scanned, or the output cannot be written.
pub fn run_run_impl(args: &RunArgs, cli: &Cli) -> crate::Result<i32> {
    let context = CommandContext::load(cli)?;
    let mut root = QajsonRoot::from_path(&args.qajson)?;

    let mut runner = CheckRunner::with_registry(root.raw_data_checks().to_vec(), context.registry);
    runner.initialize();
    tracing::info!(
        files = runner.file_checks().len(),
        checks = root.raw_data_checks().len(),
        "starting run"
    );

    let progress = RunProgress::new(context.config.progress.enabled && !cli.quiet);
    let mut files_done = 0usize;
    let mut on_progress = |fraction: f64| progress.set_fraction(fraction);
    let mut on_update = |_: &[crate::qajson::QajsonCheck]| {
        files_done += 1;
        progress.set_message(format!("{files_done} files checked"));
    };
    let mut callbacks = RunCallbacks {
        on_progress: Some(&mut on_progress),
        on_update: Some(&mut on_update),
        is_stopped: None,
    };
    let outcome = runner.run_checks(&mut callbacks);
    progress.finish();
    outcome?;

    let checks = runner.into_checks();
    let summary = RunSummary::from_checks(&checks);
    tracing::info!(%summary, "run complete");
    if let Some(level) = root.qa.raw_data.as_mut() {
        level.checks = checks;
    }

    let mut document = root.to_json(context.config.output.pretty)?;
    document.push('\n');
    write_output(args.output.as_deref(), &document, cli.quiet)?;
    if !cli.quiet {
        eprintln!("{summary}");
    }

    if summary.has_failures() {
        Ok(EXIT_CHECK_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
