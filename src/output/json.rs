use serde::Serialize;

use crate::error::Result;

use super::OutputFormatter;

/// Pretty-printed JSON, newline terminated.
pub struct JsonFormatter;

impl<T: Serialize + ?Sized> OutputFormatter<T> for JsonFormatter {
    fn format(&self, report: &T) -> Result<String> {
        let mut output = serde_json::to_string_pretty(report)?;
        output.push('\n');
        Ok(output)
    }
}
