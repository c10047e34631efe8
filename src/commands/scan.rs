use crate::cli::{Cli, ScanArgs};
use crate::output::{RunProgress, ScanReport};
use crate::scan::Scan;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match run_scan_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Runs one scan pass over a file and prints its summary.
///
/// # Errors
/// Returns an error if the file type is unsupported or the pass fails.
pub fn run_scan_impl(args: &ScanArgs, cli: &Cli) -> crate::Result<i32> {
    let context = CommandContext::load(cli)?;
    let mut scan = Scan::for_file(&args.file, &args.file_type)?;

    let progress = RunProgress::new(context.config.progress.enabled && !cli.quiet);
    progress.set_message(args.file.display().to_string());
    let mut on_progress = |fraction: f64| progress.set_fraction(fraction);
    let outcome = scan.scan_datagram(Some(&mut on_progress));
    progress.finish();
    outcome?;

    let report = ScanReport::from_scan(&scan);
    let output = args.format.render(&report)?;
    write_output(None, &output, cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
