//! Framing-level readers for raw sonar recordings.
//!
//! A [`FormatDecoder`] turns a file into an ordered stream of
//! [`RawDatagram`]s and decodes the payload of the few record kinds the
//! checks look at. Everything else about a datagram is opaque.

mod all;
pub mod cursor;
mod gsf;
mod kmall;
mod memory;
mod payload;
#[cfg(test)]
pub(crate) mod test_fixtures;

use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, Utc};

pub use all::AllDecoder;
pub use gsf::{GSF_ARRAY_NAMES, GsfDecoder, gsf_record_name};
pub use kmall::KmallDecoder;
pub use memory::MemoryDecoder;
pub use payload::{
    Height, InstallationParameters, NetworkAttitude, Payload, Position, RecordKind,
    RuntimeParameters, SubrecordSet, SwathPing, parse_parameter_text,
};

use crate::error::{QaError, Result};

/// One framed unit of a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDatagram {
    /// Format-specific type identifier (`"P"`, `"MRZ"`, `"SWATH_BATHYMETRY_PING"`).
    pub type_id: String,
    /// Bytes this datagram occupies in the file, framing included.
    pub length: u64,
    /// Byte offset of the datagram's first byte.
    pub offset: u64,
    pub timestamp: Option<DateTime<Utc>>,
    /// Ping sequence counter, for the types that carry one.
    pub counter: Option<u32>,
    pub payload: Vec<u8>,
}

impl RawDatagram {
    #[must_use]
    pub fn new(type_id: impl Into<String>, length: u64) -> Self {
        Self {
            type_id: type_id.into(),
            length,
            offset: 0,
            timestamp: None,
            counter: None,
            payload: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub const fn with_counter(mut self, counter: u32) -> Self {
        self.counter = Some(counter);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }
}

/// Sequential record source for one file.
pub trait FormatDecoder {
    /// Reads the next datagram, or `Ok(None)` at a clean end of stream.
    ///
    /// # Errors
    /// Returns [`QaError::Decode`] when the stream cannot be framed.
    fn next_datagram(&mut self) -> Result<Option<RawDatagram>>;

    /// Decodes the payload of `datagram` as `kind`.
    ///
    /// # Errors
    /// Returns [`QaError::Decode`] when the payload is truncated or the
    /// kind has no structured form in this format.
    fn decode(&self, datagram: &RawDatagram, kind: RecordKind) -> Result<Payload>;

    /// Bytes left to read, when the source knows its size.
    fn bytes_remaining(&self) -> Option<u64>;

    /// Total size of the source, when known.
    fn total_bytes(&self) -> Option<u64>;
}

impl<D: FormatDecoder + ?Sized> FormatDecoder for Box<D> {
    fn next_datagram(&mut self) -> Result<Option<RawDatagram>> {
        (**self).next_datagram()
    }

    fn decode(&self, datagram: &RawDatagram, kind: RecordKind) -> Result<Payload> {
        (**self).decode(datagram, kind)
    }

    fn bytes_remaining(&self) -> Option<u64> {
        (**self).bytes_remaining()
    }

    fn total_bytes(&self) -> Option<u64> {
        (**self).total_bytes()
    }
}

/// Fills `buf` from `reader`. Returns `Ok(false)` if the stream ended
/// before the first byte, which marks a clean end of stream.
fn read_frame_start<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

/// Maps a read failure in the middle of a datagram to a crate error.
fn read_error(path: &Path, offset: u64, err: io::Error) -> QaError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        QaError::decode(path, offset, "datagram truncated by end of file")
    } else {
        QaError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

fn truncated(path: &Path, datagram: &RawDatagram) -> QaError {
    QaError::decode(
        path,
        datagram.offset,
        format!("{} payload is too short to decode", datagram.type_id),
    )
}

fn unsupported_kind(path: &Path, datagram: &RawDatagram, kind: RecordKind) -> QaError {
    QaError::decode(
        path,
        datagram.offset,
        format!("{} datagram cannot be decoded as {kind:?}", datagram.type_id),
    )
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
