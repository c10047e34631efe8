//! Byte-level builders for synthetic recordings.
//!
//! Used by decoder and scan tests to assemble `.all`, `.kmall` and `.gsf`
//! streams without real survey files.

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

/// `.all` installation body: second serial number then text.
pub fn all_installation_body(text: &str) -> Vec<u8> {
    let mut body = 102u16.to_le_bytes().to_vec();
    body.extend_from_slice(text.as_bytes());
    body.push(0);
    body
}

/// `.all` position body with raw lat/lon, descriptor and NMEA input.
pub fn all_position_body(lat: f64, lon: f64, descriptor: u8, input: &str) -> Vec<u8> {
    let mut body = ((lat * 20_000_000.0).round() as i32).to_le_bytes().to_vec();
    body.extend_from_slice(&((lon * 10_000_000.0).round() as i32).to_le_bytes());
    body.extend_from_slice(&[0u8; 8]);
    body.push(descriptor);
    body.push(u8::try_from(input.len()).unwrap());
    body.extend_from_slice(input.as_bytes());
    body
}

pub fn all_height_body(centimetres: i32, height_type: u8) -> Vec<u8> {
    let mut body = centimetres.to_le_bytes().to_vec();
    body.push(height_type);
    body
}

/// `.all` network attitude body with one entry of `input_size` bytes.
pub fn all_network_attitude_body(system_descriptor: u8, input_size: u8) -> Vec<u8> {
    let mut body = 1u16.to_le_bytes().to_vec();
    body.push(system_descriptor);
    body.push(0);
    body.extend_from_slice(&[0u8; 10]);
    body.push(input_size);
    body.extend(std::iter::repeat_n(0u8, usize::from(input_size)));
    body
}

/// `.all` runtime parameter body with the given mode byte.
pub fn all_runtime_body(mode: u8) -> Vec<u8> {
    let mut body = vec![0u8; 32];
    body[4] = mode;
    body[6..8].copy_from_slice(&5u16.to_le_bytes());
    body[8..10].copy_from_slice(&500u16.to_le_bytes());
    body
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

/// `.kmall` text body (`IIP`/`IOP`): 6-byte common part then text.
pub fn kmall_text_body(text: &str) -> Vec<u8> {
    let mut body = vec![0u8; 6];
    body.extend_from_slice(text.as_bytes());
    body.push(0);
    body
}

/// `.kmall` multibeam partition and common part carrying `ping_counter`.
pub fn kmall_ping_body(ping_counter: u16) -> Vec<u8> {
    let mut body = vec![1, 0, 1, 0, 12, 0];
    body.extend_from_slice(&ping_counter.to_le_bytes());
    body.extend_from_slice(&[0u8; 8]);
    body
}

pub fn kmall_position_body(lat: f64, lon: f64, input: &str) -> Vec<u8> {
    let mut body = vec![0u8; 20];
    body.extend_from_slice(&lat.to_le_bytes());
    body.extend_from_slice(&lon.to_le_bytes());
    body.extend_from_slice(&[0u8; 12]);
    body.extend_from_slice(input.as_bytes());
    body
}

pub fn kmall_height_body(sensor_type: u16) -> Vec<u8> {
    let mut body = vec![0u8; 8];
    body.extend_from_slice(&sensor_type.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body
}

/// GSF record with big-endian size and id words.
pub fn gsf_record(record_id: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = u32::try_from(body.len()).unwrap().to_be_bytes().to_vec();
    bytes.extend_from_slice(&record_id.to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// GSF swath ping body: time, position, optional height and sub-records.
pub fn gsf_ping_body(secs: i32, lat: f64, lon: f64, height_mm: Option<i32>, arrays: &[u32]) -> Vec<u8> {
    let mut body = secs.to_be_bytes().to_vec();
    body.extend_from_slice(&0i32.to_be_bytes());
    body.extend_from_slice(&((lon * 1e7).round() as i32).to_be_bytes());
    body.extend_from_slice(&((lat * 1e7).round() as i32).to_be_bytes());
    body.resize(42, 0);
    let Some(height) = height_mm else {
        return body;
    };
    body.extend_from_slice(&height.to_be_bytes());
    body.resize(56, 0);
    for &id in arrays {
        body.extend_from_slice(&((id << 24) | 4).to_be_bytes());
        body.extend_from_slice(&[0u8; 4]);
    }
    body
}

/// GSF processing/sensor parameter body.
pub fn gsf_params_body(secs: i32, params: &[&str]) -> Vec<u8> {
    let mut body = secs.to_be_bytes().to_vec();
    body.extend_from_slice(&0i32.to_be_bytes());
    body.extend_from_slice(&i16::try_from(params.len()).unwrap().to_be_bytes());
    for param in params {
        let mut text = param.as_bytes().to_vec();
        text.push(0);
        body.extend_from_slice(&i16::try_from(text.len()).unwrap().to_be_bytes());
        body.extend(text);
    }
    body
}
