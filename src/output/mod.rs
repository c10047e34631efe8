mod json;
mod progress;
mod report;
mod text;

pub use json::JsonFormatter;
pub use progress::RunProgress;
pub use report::{CheckEntry, RunSummary, ScanReport, TypeRow};
pub use text::TextFormatter;

use crate::error::Result;

/// Renders a report of type `T` as text.
pub trait OutputFormatter<T: ?Sized> {
    /// # Errors
    /// Returns an error if the report cannot be rendered.
    fn format(&self, report: &T) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Renders `report` in this format.
    ///
    /// # Errors
    /// Returns an error if the report cannot be rendered.
    pub fn render<T: ?Sized>(self, report: &T) -> Result<String>
    where
        TextFormatter: OutputFormatter<T>,
        JsonFormatter: OutputFormatter<T>,
    {
        match self {
            Self::Text => TextFormatter.format(report),
            Self::Json => JsonFormatter.format(report),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
