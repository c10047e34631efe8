use clap::Parser;

use super::*;

fn checks_args(cli: &Cli) -> &ChecksArgs {
    match &cli.command {
        crate::cli::Commands::Checks(args) => args,
        _ => panic!("Expected Checks command"),
    }
}

#[test]
fn lists_checks_as_text() {
    let cli = Cli::parse_from(["sonar-qa", "--no-config", "-q", "checks"]);
    assert_eq!(run_checks_impl(checks_args(&cli), &cli).unwrap(), EXIT_SUCCESS);
}

#[test]
fn lists_checks_as_json() {
    let cli = Cli::parse_from(["sonar-qa", "--no-config", "-q", "checks", "--format", "json"]);
    assert_eq!(run_checks(checks_args(&cli), &cli), EXIT_SUCCESS);
}
