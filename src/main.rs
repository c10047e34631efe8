use clap::Parser;
use tracing_subscriber::EnvFilter;

use sonar_qa::cli::{Cli, Commands};
use sonar_qa::commands::{run_checks, run_expand, run_run, run_scan};

/// Log filter directive for the `-v`/`-q` flags; `RUST_LOG` overrides it.
const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cli.verbose, cli.quiet)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let exit_code = match &cli.command {
        Commands::Run(args) => run_run(args, &cli),
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Checks(args) => run_checks(args, &cli),
        Commands::Expand(args) => run_expand(args, &cli),
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
