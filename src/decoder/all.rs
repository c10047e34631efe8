use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use super::cursor::{ByteCursor, Endian, terminated_text};
use super::{
    FormatDecoder, Height, InstallationParameters, NetworkAttitude, Payload, Position, RawDatagram,
    RecordKind, RuntimeParameters, read_error, read_frame_start, truncated, unsupported_kind,
};
use crate::error::{QaError, Result};

const STX: u8 = 0x02;
/// Bytes between the length field and the datagram body.
const HEADER_LEN: usize = 16;

/// Reader for Kongsberg `.all` recordings.
pub struct AllDecoder<R = BufReader<File>> {
    reader: R,
    path: PathBuf,
    offset: u64,
    total: u64,
}

impl AllDecoder<BufReader<File>> {
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

impl<R: Read> AllDecoder<R> {
    pub fn from_reader(reader: R, path: impl Into<PathBuf>, total: u64) -> Self {
        Self {
            reader,
            path: path.into(),
            offset: 0,
            total,
        }
    }
}

impl<R: Read> FormatDecoder for AllDecoder<R> {
    fn next_datagram(&mut self) -> Result<Option<RawDatagram>> {
        let start = self.offset;
        let mut len_buf = [0u8; 4];
        if !read_frame_start(&mut self.reader, &mut len_buf)
            .map_err(|e| read_error(&self.path, start, e))?
        {
            return Ok(None);
        }
        let declared = u32::from_le_bytes(len_buf);
        if (declared as usize) < HEADER_LEN {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("datagram length {declared} is shorter than the header"),
            ));
        }
        if self.total > 0 && start + 4 + u64::from(declared) > self.total {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("datagram length {declared} runs past the end of the file"),
            ));
        }

        let mut body = vec![0u8; declared as usize];
        self.reader
            .read_exact(&mut body)
            .map_err(|e| read_error(&self.path, start, e))?;
        self.offset = start + 4 + u64::from(declared);

        if body[0] != STX {
            return Err(QaError::decode(
                &self.path,
                start,
                format!("expected STX 0x02, found 0x{:02x}", body[0]),
            ));
        }

        let header = ByteCursor::new(&body, Endian::Little);
        let type_id = char::from(body[1]).to_string();
        let timestamp = match (header.u32(4), header.u32(8)) {
            (Some(date), Some(millis)) => record_time(date, millis),
            _ => None,
        };
        let counter = header.u16(12).map(u32::from);
        body.drain(..HEADER_LEN);

        Ok(Some(RawDatagram {
            type_id,
            length: 4 + u64::from(declared),
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
            RecordKind::InstallationParameters => body.tail(2).map(|text| {
                Payload::InstallationParameters(InstallationParameters::from_text(
                    time,
                    terminated_text(text),
                ))
            }),
            RecordKind::RuntimeParameters => runtime_fields(&body)
                .map(|fields| Payload::RuntimeParameters(RuntimeParameters::from_fields(time, fields))),
            RecordKind::Position => position(&body, time).map(Payload::Position),
            RecordKind::Height => body.i32(0).zip(body.u8(4)).map(|(cm, height_type)| {
                Payload::Height(Height {
                    time,
                    height: Some(f64::from(cm) / 100.0),
                    height_type: u16::from(height_type),
                })
            }),
            RecordKind::NetworkAttitude => body.u16(0).zip(body.u8(2)).map(|(entries, system)| {
                Payload::NetworkAttitude(NetworkAttitude {
                    time,
                    system_descriptor: system,
                    input_size: if entries > 0 { body.u8(14) } else { None },
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

/// Combines the `YYYYMMDD` date and milliseconds-since-midnight fields.
fn record_time(date: u32, millis: u32) -> Option<DateTime<Utc>> {
    let day = NaiveDate::from_ymd_opt(
        i32::try_from(date / 10_000).ok()?,
        date / 100 % 100,
        date % 100,
    )?;
    let naive = day
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(i64::from(millis)))?;
    Some(Utc.from_utc_datetime(&naive))
}

fn position(body: &ByteCursor<'_>, time: Option<DateTime<Utc>>) -> Option<Position> {
    let latitude = f64::from(body.i32(0)?) / 20_000_000.0;
    let longitude = f64::from(body.i32(4)?) / 10_000_000.0;
    let descriptor = body.u8(16)?;
    let input_len = usize::from(body.u8(17)?);
    let input = body
        .slice(18, input_len)
        .or_else(|| body.tail(18))
        .map(terminated_text)
        .unwrap_or_default();
    Some(Position {
        time,
        latitude,
        longitude,
        descriptor: u16::from(descriptor),
        input,
    })
}

/// Fixed runtime-parameter block, in file order.
fn runtime_fields(body: &ByteCursor<'_>) -> Option<IndexMap<String, Value>> {
    let mut fields = IndexMap::new();
    let mut put = |name: &str, value: Value| {
        fields.insert(name.to_string(), value);
    };
    put("OperatorStationStatus", body.u8(0)?.into());
    put("ProcessingUnitStatus", body.u8(1)?.into());
    put("BSPStatus", body.u8(2)?.into());
    put("SonarHeadStatus", body.u8(3)?.into());
    put("Mode", body.u8(4)?.into());
    put("FilterIdentifier", body.u8(5)?.into());
    put("MinimumDepth", body.u16(6)?.into());
    put("MaximumDepth", body.u16(8)?.into());
    put("AbsorptionCoefficient", (f64::from(body.u16(10)?) / 100.0).into());
    put("TransmitPulseLength", body.u16(12)?.into());
    put("TransmitBeamWidth", (f64::from(body.u16(14)?) / 10.0).into());
    put("TransmitPowerReMaximum", i8::from_le_bytes([body.u8(16)?]).into());
    put("ReceiveBeamWidth", (f64::from(body.u8(17)?) / 10.0).into());
    put("ReceiveBandwidth", (u32::from(body.u8(18)?) * 50).into());
    put("ReceiverFixedGain", body.u8(19)?.into());
    put("TVGLawCrossoverAngle", body.u8(20)?.into());
    put("SourceOfSoundSpeedAtTransducer", body.u8(21)?.into());
    put("MaximumPortSwathWidth", body.u16(22)?.into());
    put("BeamSpacing", body.u8(24)?.into());
    put("MaximumPortCoverage", body.u8(25)?.into());
    put("YawAndPitchStabilizationMode", body.u8(26)?.into());
    put("MaximumStarboardCoverage", body.u8(27)?.into());
    put("MaximumStarboardSwathWidth", body.u16(28)?.into());
    Some(fields)
}

#[cfg(test)]
#[path = "all_tests.rs"]
mod tests;
