use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};

use super::cursor::{ByteCursor, Endian, terminated_text};
use super::{
    FormatDecoder, InstallationParameters, Payload, RawDatagram, RecordKind, RuntimeParameters,
    SubrecordSet, SwathPing, read_error, read_frame_start, truncated, unsupported_kind,
};
use crate::error::{QaError, Result};

const RECORD_ID_MASK: u32 = 0x003F_FFFF;
const CHECKSUM_FLAG: u32 = 0x8000_0000;
const HEADER_RECORD: u32 = 1;

/// Swath ping header fields used by the checks.
const PING_LONGITUDE_OFFSET: usize = 8;
const PING_LATITUDE_OFFSET: usize = 12;
const PING_HEIGHT_OFFSET: usize = 42;
const PING_SUBRECORDS_OFFSET: usize = 56;

/// Record names by record id, starting at id 1.
const RECORD_NAMES: [&str; 12] = [
    "HEADER",
    "SWATH_BATHYMETRY_PING",
    "SOUND_VELOCITY_PROFILE",
    "PROCESSING_PARAMETERS",
    "SENSOR_PARAMETERS",
    "COMMENT",
    "HISTORY",
    "NAVIGATION_ERROR",
    "SWATH_BATHY_SUMMARY",
    "SINGLE_BEAM_PING",
    "HV_NAVIGATION_ERROR",
    "ATTITUDE",
];

/// Swath sub-record array names by sub-record id, starting at id 1.
pub const GSF_ARRAY_NAMES: [&str; 30] = [
    "DEPTH_ARRAY",
    "ACROSS_TRACK_ARRAY",
    "ALONG_TRACK_ARRAY",
    "TRAVEL_TIME_ARRAY",
    "BEAM_ANGLE_ARRAY",
    "MEAN_CAL_AMPLITUDE_ARRAY",
    "MEAN_REL_AMPLITUDE_ARRAY",
    "ECHO_WIDTH_ARRAY",
    "QUALITY_FACTOR_ARRAY",
    "RECEIVE_HEAVE_ARRAY",
    "DEPTH_ERROR_ARRAY",
    "ACROSS_TRACK_ERROR_ARRAY",
    "ALONG_TRACK_ERROR_ARRAY",
    "NOMINAL_DEPTH_ARRAY",
    "QUALITY_FLAGS_ARRAY",
    "BEAM_FLAGS_ARRAY",
    "SIGNAL_TO_NOISE_ARRAY",
    "BEAM_ANGLE_FORWARD_ARRAY",
    "VERTICAL_ERROR_ARRAY",
    "HORIZONTAL_ERROR_ARRAY",
    "INTENSITY_SERIES_ARRAY",
    "SECTOR_NUMBER_ARRAY",
    "DETECTION_INFO_ARRAY",
    "INCIDENT_BEAM_ADJ_ARRAY",
    "SYSTEM_CLEANING_ARRAY",
    "DOPPLER_CORRECTION_ARRAY",
    "SONAR_VERT_UNCERTAINTY_ARRAY",
    "SONAR_HORZ_UNCERTAINTY_ARRAY",
    "DETECTION_WINDOW_ARRAY",
    "MEAN_ABS_COEF_ARRAY",
];

/// Name of GSF record `id`, if it is one of the defined record types.
#[must_use]
pub fn gsf_record_name(id: u32) -> Option<&'static str> {
    let index = usize::try_from(id).ok()?.checked_sub(1)?;
    RECORD_NAMES.get(index).copied()
}

/// Reader for Generic Sensor Format recordings.
pub struct GsfDecoder<R = BufReader<File>> {
    reader: R,
    path: PathBuf,
    offset: u64,
    total: u64,
}

impl GsfDecoder<BufReader<File>> {
    /// Opens `path` for a single forward pass.
    ///
    /// # Errors
    /// Returns [`QaError::FileRead`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| QaError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let total = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self::from_reader(BufReader::new(file), path, total))
    }
}

impl<R: Read> GsfDecoder<R> {
    pub fn from_reader(reader: R, path: impl Into<PathBuf>, total: u64) -> Self {
        Self {
            reader,
            path: path.into(),
            offset: 0,
            total,
        }
    }

    fn read_exact(&mut self, start: u64, buf: &mut [u8]) -> Result<()> {
        self.reader
            .read_exact(buf)
            .map_err(|e| read_error(&self.path, start, e))
    }
}

impl<R: Read> FormatDecoder for GsfDecoder<R> {
    fn next_datagram(&mut self) -> Result<Option<RawDatagram>> {
        let start = self.offset;
        let mut header = [0u8; 8];
        if !read_frame_start(&mut self.reader, &mut header)
            .map_err(|e| read_error(&self.path, start, e))?
        {
            return Ok(None);
        }
        let cursor = ByteCursor::new(&header, Endian::Big);
        let (Some(size), Some(id_word)) = (cursor.u32(0), cursor.u32(4)) else {
            return Err(QaError::decode(&self.path, start, "short record header"));
        };
        let record_id = id_word & RECORD_ID_MASK;
        let Some(name) = gsf_record_name(record_id) else {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("unknown record id {record_id}"),
            ));
        };

        let checksum_len: u64 = if id_word & CHECKSUM_FLAG != 0 { 4 } else { 0 };
        let length = 8 + checksum_len + u64::from(size);
        if self.total > 0 && start + length > self.total {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("record size {size} runs past the end of the file"),
            ));
        }
        if checksum_len > 0 {
            let mut checksum = [0u8; 4];
            self.read_exact(start, &mut checksum)?;
        }
        let mut payload = vec![0u8; size as usize];
        self.read_exact(start, &mut payload)?;
        self.offset = start + length;

        let timestamp = if record_id == HEADER_RECORD {
            None
        } else {
            record_time(&ByteCursor::new(&payload, Endian::Big))
        };

        Ok(Some(RawDatagram {
            type_id: name.to_string(),
            length,
            offset: start,
            timestamp,
            counter: None,
            payload,
        }))
    }

    fn decode(&self, datagram: &RawDatagram, kind: RecordKind) -> Result<Payload> {
        let body = ByteCursor::new(&datagram.payload, Endian::Big);
        let time = datagram.timestamp;
        let decoded = match kind {
            RecordKind::InstallationParameters => parameter_text(&body).map(|text| {
                Payload::InstallationParameters(InstallationParameters::from_text(time, text))
            }),
            RecordKind::RuntimeParameters => parameter_text(&body)
                .map(|text| Payload::RuntimeParameters(RuntimeParameters::from_text(time, text))),
            RecordKind::SwathPing => swath_ping(&body, time).map(Payload::SwathPing),
            _ => return Err(unsupported_kind(&self.path, datagram, kind)),
        };
        decoded.ok_or_else(|| truncated(&self.path, datagram))
    }

    fn bytes_remaining(&self) -> Option<u64> {
        (self.total > 0).then(|| self.total.saturating_sub(self.offset))
    }

    fn total_bytes(&self) -> Option<u64> {
        (self.total > 0).then_some(self.total)
    }
}

fn record_time(body: &ByteCursor<'_>) -> Option<DateTime<Utc>> {
    let secs = body.i32(0)?;
    let nanos = u32::try_from(body.i32(4)?).ok()?;
    Utc.timestamp_opt(i64::from(secs), nanos).single()
}

fn swath_ping(body: &ByteCursor<'_>, time: Option<DateTime<Utc>>) -> Option<SwathPing> {
    let longitude = f64::from(body.i32(PING_LONGITUDE_OFFSET)?) * 1e-7;
    let latitude = f64::from(body.i32(PING_LATITUDE_OFFSET)?) * 1e-7;
    let height = body
        .i32(PING_HEIGHT_OFFSET)
        .map(|mm| f64::from(mm) / 1000.0);

    let mut arrays = SubrecordSet::default();
    let mut pos = PING_SUBRECORDS_OFFSET;
    while let Some(word) = body.u32(pos) {
        let id = word >> 24;
        if id == 0 {
            break;
        }
        arrays.insert(id);
        pos += 4 + (word & 0x00FF_FFFF) as usize;
    }

    Some(SwathPing {
        time,
        latitude,
        longitude,
        height,
        arrays,
    })
}

/// Processing/sensor parameter records: a count, then size-prefixed
/// `KEY=VALUE` strings. The strings are joined with commas.
fn parameter_text(body: &ByteCursor<'_>) -> Option<String> {
    let count = body.i16(8)?;
    let mut pos = 10;
    let mut entries = Vec::new();
    for _ in 0..count.max(0) {
        let size = usize::try_from(body.i16(pos)?).ok()?;
        let text = terminated_text(body.slice(pos + 2, size)?);
        if !text.is_empty() {
            entries.push(text);
        }
        pos += 2 + size;
    }
    Some(entries.join(","))
}

#[cfg(test)]
#[path = "gsf_tests.rs"]
mod tests;
