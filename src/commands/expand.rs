use crate::cli::{Cli, ExpandArgs};
use crate::qajson::{QajsonRoot, expand_per_file};
use crate::scan::FileCategory;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_expand(args: &ExpandArgs, cli: &Cli) -> i32 {
    match run_expand_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Input files in command-line order, raw files first.
fn input_files(args: &ExpandArgs) -> Vec<(String, FileCategory)> {
    let tagged = |paths: &[String], category: FileCategory| {
        paths
            .iter()
            .map(move |path| (path.clone(), category))
            .collect::<Vec<_>>()
    };
    let mut files = tagged(&args.raw, FileCategory::Raw);
    files.extend(tagged(&args.svp, FileCategory::Svp));
    files.extend(tagged(&args.trueheave, FileCategory::Trueheave));
    files
}

/// Rewrites the raw data checks of a document so each runs on one file.
///
/// # Errors
/// Returns an error if configuration or the document cannot be loaded, or
/// the output cannot be written.
pub fn run_expand_impl(args: &ExpandArgs, cli: &Cli) -> crate::Result<i32> {
    let context = CommandContext::load(cli)?;
    let mut root = QajsonRoot::from_path(&args.qajson)?;

    let files = input_files(args);
    let expanded = expand_per_file(root.raw_data_checks(), &files, &context.registry);
    tracing::debug!(files = files.len(), checks = expanded.len(), "expanded checks");
    *root.raw_data_checks_mut() = expanded;

    let mut document = root.to_json(context.config.output.pretty)?;
    document.push('\n');
    write_output(args.output.as_deref(), &document, cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
