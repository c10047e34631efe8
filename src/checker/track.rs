//! Track-derived outputs: where runtime settings changed, and the vessel
//! track itself, both as GeoJSON.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::geo::{Feature, FeatureCollection, Geometry};
use super::merge::{MergeTarget, PositionFix, merge_position, parameter_changes};
use crate::error::Result;
use crate::scan::{DatagramScan, RawFormat, ScanResult};

/// A runtime parameter change placed on the track.
#[derive(Debug)]
struct RuntimeMarker {
    time: Option<DateTime<Utc>>,
    properties: Map<String, Value>,
    position: Option<(f64, f64)>,
}

impl MergeTarget for RuntimeMarker {
    fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.position = Some((latitude, longitude));
    }
}

fn position_fixes(scan: &DatagramScan) -> Vec<PositionFix> {
    let source = scan.profile().position;
    match scan.format() {
        RawFormat::Gsf => scan
            .retained()
            .swath_pings(source)
            .filter_map(PositionFix::from_swath_ping)
            .collect(),
        RawFormat::All | RawFormat::Kmall => scan
            .retained()
            .positions(source)
            .filter_map(PositionFix::from_position)
            .collect(),
    }
}

/// Every recorded coordinate as `(latitude, longitude)`, in file order.
fn coordinates(scan: &DatagramScan) -> Vec<(f64, f64)> {
    let source = scan.profile().position;
    match scan.format() {
        RawFormat::Gsf => scan
            .retained()
            .swath_pings(source)
            .map(|ping| (ping.latitude, ping.longitude))
            .collect(),
        RawFormat::All | RawFormat::Kmall => scan
            .retained()
            .positions(source)
            .map(|fix| (fix.latitude, fix.longitude))
            .collect(),
    }
}

/// Locates each change in runtime settings on the vessel track.
///
/// Consecutive identical records collapse into one marker. Markers that
/// cannot be positioned are left out of the collection and of the count.
///
/// # Errors
/// Fails only if the feature collection cannot be serialized.
pub fn runtime_parameters(scan: &DatagramScan) -> Result<ScanResult> {
    let type_id = scan.profile().runtime;
    let records: Vec<_> = scan.retained().runtime(type_id).collect();
    if records.is_empty() {
        return Ok(ScanResult::warning(match scan.format() {
            RawFormat::Gsf => "Sensor parameters record not found in file".to_string(),
            RawFormat::All | RawFormat::Kmall => {
                format!("Runtime parameters datagram ({type_id}) not found in file")
            }
        }));
    }

    let mut markers: Vec<RuntimeMarker> = parameter_changes(records.iter().copied())
        .into_iter()
        .map(|record| {
            let mut properties = Map::new();
            if let Some(time) = record.time {
                properties.insert(
                    "Time".to_string(),
                    Value::String(time.to_rfc3339_opts(SecondsFormat::Millis, true)),
                );
            }
            properties.extend(record.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            RuntimeMarker {
                time: record.time,
                properties,
                position: None,
            }
        })
        .collect();
    merge_position(&position_fixes(scan), &mut markers);

    let features: Vec<Feature> = markers
        .into_iter()
        .filter_map(|marker| {
            let (latitude, longitude) = marker.position?;
            Some(Feature::new(Geometry::point(latitude, longitude)).with_properties(marker.properties))
        })
        .collect();

    let message = match scan.format() {
        RawFormat::Gsf => format!("{} Sensor parameters records found in file", features.len()),
        RawFormat::All | RawFormat::Kmall => {
            format!("{} Runtime parameter ({type_id}) datagrams found in file", features.len())
        }
    };
    let map = FeatureCollection::new(features).to_value()?;
    Ok(ScanResult::pass()
        .with_message(message)
        .with_data(serde_json::json!({ "map": map })))
}

/// Reports the vessel track as a single line.
///
/// Repeated coordinates in a row are written once.
///
/// # Errors
/// Fails only if the feature collection cannot be serialized.
pub fn positions(scan: &DatagramScan) -> Result<ScanResult> {
    let source = scan.profile().position;
    if !scan.retained().contains(source) {
        return Ok(ScanResult::warning(match scan.format() {
            RawFormat::Gsf => {
                "Swath bathymetry record not found in file. Unable to extract position data".to_string()
            }
            RawFormat::All | RawFormat::Kmall => format!("Position datagram ({source}) not found in file"),
        }));
    }

    let mut line: Vec<[f64; 2]> = Vec::new();
    for (latitude, longitude) in coordinates(scan) {
        let point = [longitude, latitude];
        #[allow(clippy::float_cmp)]
        let repeated = line.last() == Some(&point);
        if !repeated {
            line.push(point);
        }
    }

    let map = FeatureCollection::new(vec![Feature::new(Geometry::LineString { coordinates: line })])
        .to_value()?;
    Ok(ScanResult::pass().with_data(serde_json::json!({ "map": map })))
}

#[cfg(test)]
#[path = "track_tests.rs"]
mod tests;
