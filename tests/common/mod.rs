#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the sonar-qa binary.
#[macro_export]
macro_rules! sonar_qa {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("sonar-qa"))
    };
}

pub const FILENAME_CHECKED: &str = "7761e08b-1380-46fa-a7eb-f1f41db38541";
pub const DATE_CHECKED: &str = "4a3f3371-3a21-44f2-93cf-d9ed19d0c002";
pub const BATHYMETRY: &str = "8c909ace-8759-4c2c-b86a-f76f888cd821";
pub const BACKSCATTER: &str = "bbce47c0-54c9-4c60-8de8-b174a8905091";
pub const MIN_PINGS: &str = "d762fd79-75bc-4aff-a9d2-e0c36e744e17";
pub const MISSING_PINGS: &str = "4db0e4f2-87d7-42cb-977e-a05e95b10051";
pub const POSITIONS: &str = "ac2e3271-971f-46b1-97c2-fb07523ca2b0";
pub const SVP: &str = "e57b7811-5863-49b3-bd06-a73de0add615";

/// Temporary survey directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `bytes` to `name` and returns the full path as a string.
    pub fn create_file(&self, name: &str, bytes: &[u8]) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes).expect("Failed to write file");
        path.to_string_lossy().into_owned()
    }

    /// Writes a QA JSON document whose raw data level holds `checks`.
    pub fn create_qajson(&self, name: &str, checks: &[Value]) -> PathBuf {
        let document = json!({
            "qa": {
                "version": "0.1.4",
                "raw_data": {"checks": checks},
                "survey_products": {"checks": []}
            }
        });
        let path = self.dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(&document).unwrap())
            .expect("Failed to write QA JSON");
        path
    }

    pub fn read_json(&self, name: &str) -> Value {
        let text = fs::read_to_string(self.dir.path().join(name)).expect("Failed to read output");
        serde_json::from_str(&text).expect("Output is not JSON")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A check request on `files`, each given as `(path, file_type)`.
pub fn check_request(id: &str, files: &[(&str, &str)], params: Value) -> Value {
    let files: Vec<Value> = files
        .iter()
        .map(|(path, file_type)| json!({"path": path, "file_type": file_type}))
        .collect();
    json!({
        "info": {"id": id, "name": "check", "version": "1"},
        "inputs": {"files": files, "params": params}
    })
}

/// `.all` datagram: length, STX, type, model, date, time, counter, serial,
/// body, ETX and checksum.
pub fn all_datagram(type_id: u8, date: u32, millis: u32, counter: u16, body: &[u8]) -> Vec<u8> {
    let mut record = vec![0x02, type_id];
    record.extend_from_slice(&2040u16.to_le_bytes());
    record.extend_from_slice(&date.to_le_bytes());
    record.extend_from_slice(&millis.to_le_bytes());
    record.extend_from_slice(&counter.to_le_bytes());
    record.extend_from_slice(&101u16.to_le_bytes());
    record.extend_from_slice(body);
    record.extend_from_slice(&[0x03, 0x00, 0x00]);
    let mut bytes = u32::try_from(record.len()).unwrap().to_le_bytes().to_vec();
    bytes.extend(record);
    bytes
}

pub fn all_installation_body(text: &str) -> Vec<u8> {
    let mut body = 102u16.to_le_bytes().to_vec();
    body.extend_from_slice(text.as_bytes());
    body.push(0);
    body
}

#[allow(clippy::cast_possible_truncation)]
pub fn all_position_body(lat: f64, lon: f64, input: &str) -> Vec<u8> {
    let mut body = ((lat * 20_000_000.0).round() as i32).to_le_bytes().to_vec();
    body.extend_from_slice(&((lon * 10_000_000.0).round() as i32).to_le_bytes());
    body.extend_from_slice(&[0u8; 8]);
    body.push(0x81);
    body.push(u8::try_from(input.len()).unwrap());
    body.extend_from_slice(input.as_bytes());
    body
}

/// A complete `.all` line recorded on 2018-11-11: installation, attitude,
/// positions, then `pings` range/angle and depth pairs.
pub fn all_survey_line(file_name: &str, pings: u16) -> Vec<u8> {
    let date = 20_181_111;
    let install = all_installation_body(&format!("WLZ=0.5,RFN={file_name},APS=0,VSN=0,"));
    let mut bytes = all_datagram(b'I', date, 0, 0, &install);
    bytes.extend(all_datagram(b'A', date, 10, 0, &[0u8; 8]));
    for step in 0..5u16 {
        let body = all_position_body(-42.5 + f64::from(step) * 0.001, 147.25, "$INGGK,");
        bytes.extend(all_datagram(b'P', date, 20 + u32::from(step) * 1000, step, &body));
    }
    for counter in 1..=pings {
        let millis = 100 + u32::from(counter) * 200;
        bytes.extend(all_datagram(b'F', date, millis, counter, &[0u8; 16]));
        bytes.extend(all_datagram(b'D', date, millis, counter, &[0u8; 16]));
    }
    bytes
}

/// `.kmall` datagram with header, body and trailing length.
pub fn kmall_datagram(type_id: &str, secs: u32, body: &[u8]) -> Vec<u8> {
    let len = u32::try_from(4 + 16 + body.len() + 4).unwrap();
    let mut bytes = len.to_le_bytes().to_vec();
    bytes.push(b'#');
    bytes.extend_from_slice(type_id.as_bytes());
    bytes.extend_from_slice(&[1, 0]);
    bytes.extend_from_slice(&2040u16.to_le_bytes());
    bytes.extend_from_slice(&secs.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(body);
    bytes.extend_from_slice(&len.to_le_bytes());
    bytes
}

/// `.kmall` multibeam partition and common part carrying `ping_counter`.
pub fn kmall_ping_body(ping_counter: u16) -> Vec<u8> {
    let mut body = vec![1, 0, 1, 0, 12, 0];
    body.extend_from_slice(&ping_counter.to_le_bytes());
    body.extend_from_slice(&[0u8; 8]);
    body
}

/// GSF record with big-endian size and id words.
pub fn gsf_record(record_id: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = u32::try_from(body.len()).unwrap().to_be_bytes().to_vec();
    bytes.extend_from_slice(&record_id.to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// GSF swath ping body with a height and the given sub-record arrays.
#[allow(clippy::cast_possible_truncation)]
pub fn gsf_ping_body(secs: i32, lat: f64, lon: f64, height_mm: i32, arrays: &[u32]) -> Vec<u8> {
    let mut body = secs.to_be_bytes().to_vec();
    body.extend_from_slice(&0i32.to_be_bytes());
    body.extend_from_slice(&((lon * 1e7).round() as i32).to_be_bytes());
    body.extend_from_slice(&((lat * 1e7).round() as i32).to_be_bytes());
    body.resize(42, 0);
    body.extend_from_slice(&height_mm.to_be_bytes());
    body.resize(56, 0);
    for &id in arrays {
        body.extend_from_slice(&((id << 24) | 4).to_be_bytes());
        body.extend_from_slice(&[0u8; 4]);
    }
    body
}
