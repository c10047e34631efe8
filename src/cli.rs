use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "sonar-qa")]
#[command(author, version, about = "Quality checks for raw multibeam sonar recordings")]
#[command(long_about = "Runs QA JSON checks against Kongsberg .all/.kmall and GSF recordings \
    and their side-car files.\n\n\
    Exit codes:\n  \
    0 - All checks passed or warned\n  \
    1 - A check failed or could not be executed\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the raw data checks of a QA JSON document
    Run(RunArgs),

    /// Scan one file and print its datagram summaries
    Scan(ScanArgs),

    /// List the supported checks
    Checks(ChecksArgs),

    /// Clone each check once per input file
    Expand(ExpandArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// QA JSON document to run
    pub qajson: PathBuf,

    /// Write the updated document to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// File to scan
    pub file: PathBuf,

    /// QA JSON file type of the file
    #[arg(long, default_value = "Raw Files")]
    pub file_type: String,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ChecksArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ExpandArgs {
    /// QA JSON document holding the check definitions
    pub qajson: PathBuf,

    /// Raw sonar file (repeatable)
    #[arg(long = "raw", value_name = "FILE")]
    pub raw: Vec<String>,

    /// SVP file (repeatable)
    #[arg(long = "svp", value_name = "FILE")]
    pub svp: Vec<String>,

    /// Trueheave file (repeatable)
    #[arg(long = "trueheave", value_name = "FILE")]
    pub trueheave: Vec<String>,

    /// Write the expanded document to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
