use std::fmt::Write;

use crate::error::Result;

use super::OutputFormatter;
use super::report::{CheckEntry, ScanReport};

/// Plain-text tables for terminal output.
pub struct TextFormatter;

fn time_or_dash(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
}

impl OutputFormatter<ScanReport> for TextFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "{} ({})", report.path, report.file_type);
        if let Some(format) = report.format {
            let _ = writeln!(output, "  Format: {format}");
        }
        let _ = writeln!(output, "  File size: {} bytes", report.file_size);
        if let Some(existence) = report.existence {
            let _ = writeln!(output, "  File: {existence}");
        }
        if let (Some(consumed), Some(matched)) = (report.bytes_consumed, report.size_matched) {
            let note = if matched { "" } else { " (does not match file size)" };
            let _ = writeln!(output, "  Datagram bytes: {consumed}{note}");
        }
        if let (Some(total), Some(missed)) = (report.total_pings, report.missed_pings) {
            let _ = writeln!(output, "  Pings: {total} ({missed} missed)");
        }
        if report.types.is_empty() {
            return Ok(output);
        }

        let width = report
            .types
            .iter()
            .map(|row| row.type_id.len())
            .max()
            .unwrap_or(0)
            .max("Type".len());
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "  {:<width$}  {:>8}  {:>12}  {:>8}  {:>7}  {:<23}  {:<23}",
            "Type", "Records", "Bytes", "Pings", "Missed", "Start", "Stop"
        );
        for row in &report.types {
            let _ = writeln!(
                output,
                "  {:<width$}  {:>8}  {:>12}  {:>8}  {:>7}  {:<23}  {:<23}",
                row.type_id,
                row.record_count,
                row.byte_count,
                row.ping_count,
                row.missed_pings,
                time_or_dash(row.start_time),
                time_or_dash(row.stop_time),
            );
        }
        Ok(output)
    }
}

impl OutputFormatter<[CheckEntry]> for TextFormatter {
    fn format(&self, entries: &[CheckEntry]) -> Result<String> {
        let mut output = String::new();
        for entry in entries {
            let _ = writeln!(
                output,
                "{}  v{}  {:<26}  {}",
                entry.id, entry.version, entry.name, entry.file_type
            );
            for (name, value) in &entry.params {
                let _ = writeln!(output, "    {name} = {value}");
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
