use crate::cli::{ChecksArgs, Cli};
use crate::output::CheckEntry;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_checks(args: &ChecksArgs, cli: &Cli) -> i32 {
    match run_checks_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Lists the registry with configured parameter defaults.
///
/// # Errors
/// Returns an error if configuration cannot be loaded.
pub fn run_checks_impl(args: &ChecksArgs, cli: &Cli) -> crate::Result<i32> {
    let context = CommandContext::load(cli)?;
    let entries = CheckEntry::list(&context.registry);
    let output = args.format.render(entries.as_slice())?;
    write_output(None, &output, cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
