//! Completed scans built from in-memory datagram streams.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::decoder::{
    Height, InstallationParameters, MemoryDecoder, NetworkAttitude, Payload, Position, RawDatagram,
    RuntimeParameters, SubrecordSet, SwathPing,
};
use crate::scan::{DatagramScan, RawFormat, Scan};

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

/// Runs a pass over `decoder` for a file called `name`.
pub fn datagram_scan(name: &str, format: RawFormat, decoder: MemoryDecoder) -> DatagramScan {
    let mut decoder = decoder;
    let mut scan = DatagramScan::new(name, format);
    scan.scan_with(&mut decoder, None).unwrap();
    scan
}

pub fn scan(name: &str, format: RawFormat, decoder: MemoryDecoder) -> Scan {
    Scan::Datagram(datagram_scan(name, format, decoder))
}

/// Stream where each `(type, count)` pair contributes `count` plain records.
pub fn counted(types: &[(&str, usize)]) -> MemoryDecoder {
    types.iter().fold(MemoryDecoder::new(), |decoder, &(id, count)| {
        (0..count).fold(decoder, |decoder, _| decoder.push(RawDatagram::new(id, 16)))
    })
}

/// Appends ping-bearing records of `type_id` with the given counters.
pub fn with_pings(decoder: MemoryDecoder, type_id: &str, counters: impl IntoIterator<Item = u32>) -> MemoryDecoder {
    counters.into_iter().fold(decoder, |decoder, counter| {
        decoder.push(RawDatagram::new(type_id, 64).with_counter(counter))
    })
}

pub fn with_payload(decoder: MemoryDecoder, type_id: &str, secs: Option<i64>, payload: Payload) -> MemoryDecoder {
    let mut datagram = RawDatagram::new(type_id, 48);
    if let Some(secs) = secs {
        datagram = datagram.with_timestamp(at(secs));
    }
    decoder.push_decoded(datagram, payload)
}

pub fn installation(secs: i64, text: &str) -> Payload {
    Payload::InstallationParameters(InstallationParameters::from_text(
        Some(at(secs)),
        text.to_string(),
    ))
}

pub fn runtime(secs: i64, mode: u64) -> Payload {
    let mut fields = IndexMap::new();
    fields.insert("Mode".to_string(), Value::from(mode));
    Payload::RuntimeParameters(RuntimeParameters::from_fields(Some(at(secs)), fields))
}

pub fn position(secs: i64, lat: f64, lon: f64, descriptor: u16, input: &str) -> Payload {
    Payload::Position(Position {
        time: Some(at(secs)),
        latitude: lat,
        longitude: lon,
        descriptor,
        input: input.to_string(),
    })
}

pub fn height(height_type: u16) -> Payload {
    Payload::Height(Height {
        time: None,
        height: None,
        height_type,
    })
}

pub fn network_attitude(system_descriptor: u8, input_size: u8) -> Payload {
    Payload::NetworkAttitude(NetworkAttitude {
        time: None,
        system_descriptor,
        input_size: Some(input_size),
    })
}

pub fn swath_ping(secs: i64, lat: f64, lon: f64, height: Option<f64>, arrays: &[u32]) -> Payload {
    let mut set = SubrecordSet::default();
    for &id in arrays {
        set.insert(id);
    }
    Payload::SwathPing(SwathPing {
        time: Some(at(secs)),
        latitude: lat,
        longitude: lon,
        height,
        arrays: set,
    })
}
