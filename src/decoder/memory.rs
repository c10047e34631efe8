use std::collections::VecDeque;

use super::{FormatDecoder, Payload, RawDatagram, RecordKind};
use crate::error::{QaError, Result};

/// In-memory datagram source.
///
/// Hosts that bring their own decoders feed pre-framed datagrams through
/// this type; decoded payloads are attached per datagram.
#[derive(Debug, Default)]
pub struct MemoryDecoder {
    queue: VecDeque<(RawDatagram, Option<Payload>)>,
    current: Option<Payload>,
    total: u64,
    consumed: u64,
}

impl MemoryDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a datagram with no structured payload.
    #[must_use]
    pub fn push(mut self, datagram: RawDatagram) -> Self {
        self.total += datagram.length;
        self.queue.push_back((datagram, None));
        self
    }

    /// Appends a datagram together with its decoded payload.
    #[must_use]
    pub fn push_decoded(mut self, datagram: RawDatagram, payload: Payload) -> Self {
        self.total += datagram.length;
        self.queue.push_back((datagram, Some(payload)));
        self
    }
}

impl FormatDecoder for MemoryDecoder {
    fn next_datagram(&mut self) -> Result<Option<RawDatagram>> {
        let Some((mut datagram, payload)) = self.queue.pop_front() else {
            self.current = None;
            return Ok(None);
        };
        datagram.offset = self.consumed;
        self.consumed += datagram.length;
        self.current = payload;
        Ok(Some(datagram))
    }

    /// Returns the payload attached to the most recently yielded datagram.
    fn decode(&self, datagram: &RawDatagram, kind: RecordKind) -> Result<Payload> {
        self.current.clone().ok_or_else(|| {
            QaError::decode(
                "<memory>",
                datagram.offset,
                format!("no {kind:?} payload attached to {} datagram", datagram.type_id),
            )
        })
    }

    fn bytes_remaining(&self) -> Option<u64> {
        Some(self.total - self.consumed)
    }

    fn total_bytes(&self) -> Option<u64> {
        Some(self.total)
    }
}
