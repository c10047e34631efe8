use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};

use super::cursor::{ByteCursor, Endian, terminated_text};
use super::{
    FormatDecoder, Height, InstallationParameters, Payload, Position, RawDatagram, RecordKind,
    RuntimeParameters, read_error, read_frame_start, truncated, unsupported_kind,
};
use crate::error::{QaError, Result};

/// Header bytes after the length field: type, version, system id,
/// echosounder id, seconds, nanoseconds.
const HEADER_LEN: usize = 16;
/// Smallest legal datagram: length, header, trailing length.
const MIN_DATAGRAM_LEN: u32 = 4 + HEADER_LEN as u32 + 4;
/// Byte offset of `pingCnt` in the multibeam partition/common part.
const PING_COUNTER_OFFSET: usize = 6;

/// Reader for Kongsberg `.kmall` recordings.
pub struct KmallDecoder<R = BufReader<File>> {
    reader: R,
    path: PathBuf,
    offset: u64,
    total: u64,
}

impl KmallDecoder<BufReader<File>> {
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

impl<R: Read> KmallDecoder<R> {
    pub fn from_reader(reader: R, path: impl Into<PathBuf>, total: u64) -> Self {
        Self {
            reader,
            path: path.into(),
            offset: 0,
            total,
        }
    }
}

impl<R: Read> FormatDecoder for KmallDecoder<R> {
    fn next_datagram(&mut self) -> Result<Option<RawDatagram>> {
        let start = self.offset;
        let mut len_buf = [0u8; 4];
        if !read_frame_start(&mut self.reader, &mut len_buf)
            .map_err(|e| read_error(&self.path, start, e))?
        {
            return Ok(None);
        }
        let declared = u32::from_le_bytes(len_buf);
        if declared < MIN_DATAGRAM_LEN {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("datagram length {declared} is shorter than the header"),
            ));
        }
        if self.total > 0 && start + u64::from(declared) > self.total {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("datagram length {declared} runs past the end of the file"),
            ));
        }

        let mut body = vec![0u8; declared as usize - 4];
        self.reader
            .read_exact(&mut body)
            .map_err(|e| read_error(&self.path, start, e))?;
        self.offset = start + u64::from(declared);

        if body[0] != b'#' {
            return Err(QaError::decode(
                &self.path,
                start,
                "datagram type does not start with '#'",
            ));
        }
        let cursor = ByteCursor::new(&body, Endian::Little);
        let trailing = cursor.u32(body.len() - 4);
        if trailing != Some(declared) {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("trailing length {trailing:?} does not match {declared}"),
            ));
        }

        let type_id = String::from_utf8_lossy(&body[1..4]).into_owned();
        let timestamp = cursor
            .u32(8)
            .zip(cursor.u32(12))
            .and_then(|(secs, nanos)| Utc.timestamp_opt(i64::from(secs), nanos).single());
        body.truncate(body.len() - 4);
        body.drain(..HEADER_LEN);
        let counter = match type_id.as_str() {
            "MRZ" | "MWC" => ByteCursor::new(&body, Endian::Little)
                .u16(PING_COUNTER_OFFSET)
                .map(u32::from),
            _ => None,
        };

        Ok(Some(RawDatagram {
            type_id,
            length: u64::from(declared),
            offset: start,
            timestamp,
            counter,
            payload: body,
        }))
    }

    fn decode(&self, datagram: &RawDatagram, kind: RecordKind) -> Result<Payload> {
        let body = ByteCursor::new(&datagram.payload, Endian::Little);
        let time = datagram.timestamp;
        let decoded = match kind {
            RecordKind::InstallationParameters => body.tail(6).map(|text| {
                Payload::InstallationParameters(InstallationParameters::from_text(
                    time,
                    terminated_text(text),
                ))
            }),
            RecordKind::RuntimeParameters => body.tail(6).map(|text| {
                Payload::RuntimeParameters(RuntimeParameters::from_text(time, terminated_text(text)))
            }),
            RecordKind::Position => position(&body, time).map(Payload::Position),
            RecordKind::Height => body.u16(8).map(|sensor_type| {
                Payload::Height(Height {
                    time,
                    height: None,
                    height_type: sensor_type,
                })
            }),
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

/// `SPO` sensor data: common part, sensor time, fix quality, corrected
/// lat/lon, speed, course, ellipsoid height, then the raw telegram.
fn position(body: &ByteCursor<'_>, time: Option<DateTime<Utc>>) -> Option<Position> {
    let system = body.u16(2)?;
    let latitude = body.f64(20)?;
    let longitude = body.f64(28)?;
    let input = body.tail(48).map(terminated_text).unwrap_or_default();
    Some(Position {
        time,
        latitude,
        longitude,
        descriptor: system,
        input,
    })
}

#[cfg(test)]
#[path = "kmall_tests.rs"]
mod tests;
