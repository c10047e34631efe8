//! Ellipsoid height checks.

use indexmap::IndexMap;
use serde_json::json;

use super::descriptors::GSF_HEIGHT;
use super::metadata::first_installation;
use super::presence::evaluate_presence;
use crate::scan::{DatagramScan, RawFormat, ScanResult};

/// Motion sensor family, inferred from how it is interfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertialSystem {
    PosMv,
    F180,
    Other,
    Unknown,
}

impl InertialSystem {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PosMv => "PosMV",
            Self::F180 => "F180",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }

    /// Classifies an `.all` network attitude input telegram by its size.
    #[must_use]
    pub const fn from_telegram_size(size: u8) -> Self {
        match size {
            137 => Self::PosMv,
            43 | 45 => Self::Other,
            _ => Self::F180,
        }
    }
}

/// Checks the recorded height is an ellipsoid height.
#[must_use]
pub fn ellipsoid_height_available(scan: &DatagramScan) -> ScanResult {
    match scan.format() {
        RawFormat::All => {
            let Some(first) = scan.retained().heights("h").next() else {
                return ScanResult::fail("'h' datagram not found");
            };
            if first.height_type == 0 {
                ScanResult::pass()
            } else {
                ScanResult::fail(format!(
                    "Height 'h' datagram was included but HeightType did not match expected value of 0 (found {})",
                    first.height_type
                ))
            }
        }
        RawFormat::Kmall => match scan.retained().heights("SHI").next() {
            Some(first) => ScanResult::pass().with_data(json!({ "sensor_type": first.height_type })),
            None => ScanResult::fail("'SHI' datagram not found"),
        },
        RawFormat::Gsf => gsf_height_available(scan),
    }
}

fn gsf_height_available(scan: &DatagramScan) -> ScanResult {
    let heights: Vec<f64> = scan
        .retained()
        .swath_pings(scan.profile().height)
        .filter_map(|ping| ping.height)
        .collect();
    let Some(&first) = heights.first() else {
        return evaluate_presence(&[GSF_HEIGHT], |_| false);
    };
    #[allow(clippy::float_cmp)]
    let unchanging = heights.len() >= 2 && heights.iter().all(|&h| h == first);
    if unchanging {
        ScanResult::warning("Warning: height data within this file not changing.")
            .with_data(json!({ "value": first }))
    } else {
        ScanResult::pass()
    }
}

/// Checks the positioning input is one that carries ellipsoid heights.
#[must_use]
pub fn ellipsoid_height_setup(scan: &DatagramScan) -> ScanResult {
    match scan.format() {
        RawFormat::All => all_height_setup(scan),
        RawFormat::Kmall => kmall_height_setup(scan),
        RawFormat::Gsf => ScanResult::warning("Check unable to be implemented for GSF format"),
    }
}

fn all_height_setup(scan: &DatagramScan) -> ScanResult {
    if !scan.retained().contains("n") {
        return ScanResult::warning(
            "Unable to conduct height setup check.  No network attitude and velocity datagrams",
        );
    }
    let active = |key: &str| {
        first_installation(scan)
            .and_then(|record| record.params.get(key))
            .and_then(|value| value.trim().parse::<u8>().ok())
    };

    let inertial = active("VSN")
        .and_then(|sensor| {
            scan.retained()
                .network_attitude("n")
                .find(|record| {
                    u16::from((record.system_descriptor >> 4) & 0b11) == u16::from(sensor) + 1
                })
                .and_then(|record| record.input_size)
        })
        .map_or(InertialSystem::Unknown, InertialSystem::from_telegram_size);

    let pos_string = active("APS").and_then(|system| {
        scan.retained()
            .positions("P")
            .find(|record| record.descriptor & 0b11 == u16::from(system) + 1)
            .and_then(|record| sentence_id(&record.input))
    });

    setup_verdict(inertial, pos_string)
}

fn kmall_height_setup(scan: &DatagramScan) -> ScanResult {
    if !scan.retained().contains("IIP") {
        return ScanResult::warning(
            "Unable to conduct height setup check.  No installation parameters datagrams",
        );
    }
    let params = first_installation(scan).map(|record| &record.params);
    let active_format = |prefix: &str| {
        params.and_then(|params| {
            params
                .iter()
                .filter(|(key, _)| key.starts_with(prefix))
                .map(|(_, value)| sensor_fields(value))
                .find(|fields| fields.get("U").is_some_and(|status| status == "ACTIVE"))
                .and_then(|mut fields| fields.shift_remove("F"))
        })
    };

    let inertial = match active_format("ATTI_") {
        Some(format) if format == "POS MV GRP 102/103" => InertialSystem::PosMv,
        Some(_) => InertialSystem::Other,
        None => InertialSystem::Unknown,
    };
    setup_verdict(inertial, active_format("POSI_"))
}

fn setup_verdict(inertial: InertialSystem, pos_string: Option<String>) -> ScanResult {
    let ggk = pos_string.as_deref() == Some("GGK");
    let data = json!({
        "inertial_pos_system": inertial.as_str(),
        "pos_string": pos_string,
    });
    let result = match inertial {
        InertialSystem::PosMv | InertialSystem::F180 if ggk => ScanResult::pass(),
        InertialSystem::Other | InertialSystem::Unknown => ScanResult::warning(
            "Unable to determine positioning system.  Check position input contains ellipsoid heights",
        ),
        InertialSystem::PosMv | InertialSystem::F180 => ScanResult::fail(
            "Ellipsoid heights not being logged change your position input to a GGK string",
        ),
    };
    result.with_data(data)
}

/// NMEA sentence id (`GGK` in `$INGGK,...`), skipping the talker id.
fn sentence_id(input: &str) -> Option<String> {
    let body = input.trim_start().strip_prefix('$')?;
    body.get(2..5)
        .filter(|id| id.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_string)
}

/// Splits a `.kmall` sensor entry (`X=0.0;F=GGK;U=ACTIVE`) into fields.
fn sensor_fields(value: &str) -> IndexMap<String, String> {
    value
        .split(';')
        .filter_map(|field| {
            let (key, value) = field.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "height_tests.rs"]
mod tests;
