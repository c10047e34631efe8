//! File identity checks: embedded filename, recording date and installation
//! parameters.

use serde_json::{Map, Value, json};

use super::base_name;
use crate::decoder::InstallationParameters;
use crate::scan::{DatagramScan, RawFormat, ScanResult};

/// Label used in messages for the format's installation record.
const fn installation_label(format: RawFormat) -> &'static str {
    match format {
        RawFormat::All => "Installation Parameters datagram (I)",
        RawFormat::Kmall => "Installation Parameters datagram (IIP)",
        RawFormat::Gsf => "Processing Parameters record",
    }
}

/// First installation record that carries any parameters.
pub fn first_installation(scan: &DatagramScan) -> Option<&InstallationParameters> {
    scan.retained()
        .installation(scan.profile().installation)
        .find(|record| !record.params.is_empty())
}

/// Compares the file name with the `RFN` entries of the installation
/// datagrams. Only `.all` files record their name.
#[must_use]
pub fn filename_matches(scan: &DatagramScan) -> ScanResult {
    if scan.format() != RawFormat::All {
        return ScanResult::warning(format!(
            "Check not implemented for the {} format",
            scan.format().name()
        ));
    }
    if !scan.retained().contains("I") {
        return ScanResult::fail("'I' datagram not found, cannot extract original filename");
    }

    let name = base_name(scan);
    let found: Vec<&str> = scan
        .retained()
        .installation("I")
        .filter_map(|record| record.params.get("RFN").map(String::as_str))
        .collect();
    if found.iter().any(|candidate| *candidate == name) {
        return ScanResult::pass();
    }
    ScanResult::fail(format!(
        "Filename {name} did not match any filenames specified within the installation parameters (I) datagram. The following were found; {}",
        found.join(", ")
    ))
    .with_data(json!({ "found_filenames": found }))
}

/// Checks the recording date (`YYYYMMDD`) appears in the file name.
///
/// The date comes from the first installation datagram, or for GSF from
/// the first swath ping.
#[must_use]
pub fn date_matches(scan: &DatagramScan) -> ScanResult {
    let time = match scan.format() {
        RawFormat::Gsf => {
            let first = scan.retained().swath_pings(scan.profile().position).next();
            match first.and_then(|ping| ping.time) {
                Some(time) => time,
                None => {
                    return ScanResult::warning(
                        "Swath bathymetry record not found in file. Unable to extract date information",
                    );
                }
            }
        }
        RawFormat::All | RawFormat::Kmall => {
            let first = scan.retained().installation(scan.profile().installation).next();
            match first.and_then(|record| record.time) {
                Some(time) => time,
                None => {
                    return ScanResult::fail(format!(
                        "'{}' datagram not found, cannot extract startTime",
                        scan.profile().installation
                    ));
                }
            }
        }
    };

    let date = time.format("%Y%m%d").to_string();
    if base_name(scan).contains(&date) {
        ScanResult::pass()
    } else {
        ScanResult::fail(format!("Could not find record date {date} in filename"))
    }
}

/// Reports the first non-empty installation record as `data`.
#[must_use]
pub fn installation_parameters(scan: &DatagramScan) -> ScanResult {
    let label = installation_label(scan.format());
    if !scan.retained().contains(scan.profile().installation) {
        return ScanResult::fail(format!("{label} not found in file"));
    }
    let Some(record) = first_installation(scan) else {
        return ScanResult::fail(format!("Failed to find {label} that contained data"));
    };
    let data: Map<String, Value> = record
        .params
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    ScanResult::pass().with_data(Value::Object(data))
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
