use std::fs;
use std::path::Path;

use crate::checker::CheckRegistry;
use crate::cli::Cli;
use crate::config::{Config, load_config};

/// Configuration and check registry shared by every subcommand.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub registry: CheckRegistry,
}

impl CommandContext {
    /// Loads configuration per the global CLI flags and builds the registry
    /// with any configured parameter defaults.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or names an
    /// invalid check id.
    pub fn load(cli: &Cli) -> crate::Result<Self> {
        let loaded = load_config(cli.config.as_deref(), cli.no_config)?;
        if loaded.source.is_none() {
            tracing::debug!("no configuration file found, using defaults");
        }
        Self::from_config(loaded.config)
    }

    /// # Errors
    /// Returns an error if `[params]` names an invalid check id.
    pub fn from_config(config: Config) -> crate::Result<Self> {
        let registry = CheckRegistry::default().with_param_overrides(&config.params)?;
        Ok(Self { config, registry })
    }
}

/// Writes `content` to `output_path`, or to stdout unless quiet.
pub(crate) fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
