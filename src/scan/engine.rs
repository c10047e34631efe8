use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use super::profile::FormatProfile;
use super::retained::RetainedDatagrams;
use super::summary::{DatagramTypeSummary, PingStep, PingTracker};
use super::table::{PingCounting, Retention, lookup};
use super::{RawFormat, file_size};
use crate::decoder::{FormatDecoder, Payload, RawDatagram, SubrecordSet};
use crate::error::{QaError, Result};

/// Lifecycle of a scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Pending,
    Complete,
    /// The pass stopped on an error; summaries are partial.
    Aborted,
}

/// Single-pass statistics and retained payloads for one raw recording.
#[derive(Debug)]
pub struct DatagramScan {
    path: PathBuf,
    format: RawFormat,
    file_size: u64,
    summaries: IndexMap<String, DatagramTypeSummary>,
    pings: PingTracker,
    retained: RetainedDatagrams,
    arrays: SubrecordSet,
    bytes_consumed: u64,
    state: PassState,
}

impl DatagramScan {
    pub fn new(path: impl Into<PathBuf>, format: RawFormat) -> Self {
        let path = path.into();
        let file_size = file_size(&path);
        Self {
            path,
            format,
            file_size,
            summaries: IndexMap::new(),
            pings: PingTracker::default(),
            retained: RetainedDatagrams::default(),
            arrays: SubrecordSet::default(),
            bytes_consumed: 0,
            state: PassState::Pending,
        }
    }

    /// Opens the file with its format's decoder and runs the pass.
    ///
    /// # Errors
    /// Returns [`QaError::ScanAlreadyRun`] on a second call, or any error
    /// from opening or decoding the file.
    pub fn scan_datagram(&mut self, progress: Option<&mut dyn FnMut(f64)>) -> Result<()> {
        self.ensure_pending()?;
        let mut decoder = self.format.open_decoder(&self.path)?;
        self.scan_with(&mut decoder, progress)
    }

    /// Runs the pass over an already-open decoder.
    ///
    /// # Errors
    /// Returns [`QaError::ScanAlreadyRun`] on a second call and propagates
    /// decoder errors; in that case the scan is left [`PassState::Aborted`].
    #[allow(clippy::cast_precision_loss)]
    pub fn scan_with<D: FormatDecoder + ?Sized>(
        &mut self,
        decoder: &mut D,
        progress: Option<&mut dyn FnMut(f64)>,
    ) -> Result<()> {
        self.ensure_pending()?;
        self.state = PassState::Aborted;
        if self.file_size == 0 {
            self.file_size = decoder.total_bytes().unwrap_or(0);
        }

        let mut reporter = Progress::new(progress);
        debug!(path = %self.path.display(), format = self.format.name(), "scan pass started");
        while let Some(datagram) = decoder.next_datagram()? {
            self.account(&datagram)?;
            self.retain(decoder, &datagram)?;
            if let (Some(remaining), Some(total)) = (decoder.bytes_remaining(), decoder.total_bytes()) {
                if total > 0 {
                    reporter.report(1.0 - remaining as f64 / total as f64);
                }
            }
        }
        reporter.report(1.0);

        self.state = PassState::Complete;
        debug!(
            path = %self.path.display(),
            types = self.summaries.len(),
            bytes = self.bytes_consumed,
            "scan pass complete"
        );
        Ok(())
    }

    fn ensure_pending(&self) -> Result<()> {
        if self.state == PassState::Pending {
            Ok(())
        } else {
            Err(QaError::ScanAlreadyRun(self.path.clone()))
        }
    }

    fn account(&mut self, datagram: &RawDatagram) -> Result<()> {
        let entry = lookup(self.profile().types, &datagram.type_id);
        self.bytes_consumed += datagram.length;
        let summary = self
            .summaries
            .entry(datagram.type_id.clone())
            .or_insert_with(DatagramTypeSummary::new);
        summary.record(datagram.length, datagram.timestamp);

        let step = match entry.ping {
            PingCounting::None => PingStep::NONE,
            PingCounting::EveryRecord => PingStep::ONE,
            PingCounting::Sequence => match datagram.counter {
                Some(counter) => self.pings.observe(&datagram.type_id, counter),
                None => {
                    return Err(QaError::decode(
                        &self.path,
                        datagram.offset,
                        format!("{} datagram has no ping counter", datagram.type_id),
                    ));
                }
            },
        };
        summary.apply(step);
        Ok(())
    }

    fn retain<D: FormatDecoder + ?Sized>(&mut self, decoder: &D, datagram: &RawDatagram) -> Result<()> {
        let entry = lookup(self.profile().types, &datagram.type_id);
        let keep = match entry.retention {
            Retention::Discard => false,
            Retention::All => true,
            Retention::FirstOnly => !self.retained.contains(&datagram.type_id),
        };
        if !keep {
            return Ok(());
        }
        let payload = decoder.decode(datagram, entry.kind)?;
        if let Payload::SwathPing(ping) = &payload {
            self.arrays = self.arrays.union(ping.arrays);
        }
        self.retained.push(&datagram.type_id, payload);
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> RawFormat {
        self.format
    }

    #[must_use]
    pub const fn profile(&self) -> &'static FormatProfile {
        self.format.profile()
    }

    #[must_use]
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    #[must_use]
    pub const fn state(&self) -> PassState {
        self.state
    }

    #[must_use]
    pub const fn summaries(&self) -> &IndexMap<String, DatagramTypeSummary> {
        &self.summaries
    }

    #[must_use]
    pub fn summary(&self, type_id: &str) -> Option<&DatagramTypeSummary> {
        self.summaries.get(type_id)
    }

    #[must_use]
    pub const fn retained(&self) -> &RetainedDatagrams {
        &self.retained
    }

    /// Bytes read from the decoder during the pass.
    #[must_use]
    pub const fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    #[must_use]
    pub fn total_datagram_bytes(&self) -> u64 {
        self.summaries.values().map(|s| s.byte_count).sum()
    }

    /// True when the datagrams account for every byte of the file.
    #[must_use]
    pub fn is_size_matched(&self) -> bool {
        self.total_datagram_bytes() == self.file_size
    }

    /// Pings counted for `type_id`, or across all types.
    #[must_use]
    pub fn total_pings(&self, type_id: Option<&str>) -> u64 {
        match type_id {
            Some(id) => self.summary(id).map_or(0, |s| s.ping_count),
            None => self.summaries.values().map(|s| s.ping_count).sum(),
        }
    }

    /// Missed pings for `type_id`, or across all types.
    #[must_use]
    pub fn missed_pings(&self, type_id: Option<&str>) -> u64 {
        match type_id {
            Some(id) => self.summary(id).map_or(0, |s| s.missed_pings),
            None => self.summaries.values().map(|s| s.missed_pings).sum(),
        }
    }

    /// Swath sub-record arrays seen in any retained ping.
    #[must_use]
    pub const fn arrays(&self) -> SubrecordSet {
        self.arrays
    }

    /// True when `id` names an observed datagram type or swath array.
    #[must_use]
    pub fn is_present(&self, id: &str) -> bool {
        self.summaries.contains_key(id) || self.arrays.contains_name(id)
    }
}

/// Clamps reported progress to a non-decreasing sequence in `[0, 1]`.
struct Progress<'a> {
    sink: Option<&'a mut dyn FnMut(f64)>,
    last: f64,
}

impl<'a> Progress<'a> {
    fn new(sink: Option<&'a mut dyn FnMut(f64)>) -> Self {
        Self { sink, last: 0.0 }
    }

    fn report(&mut self, fraction: f64) {
        let value = fraction.clamp(0.0, 1.0).max(self.last);
        self.last = value;
        if let Some(sink) = self.sink.as_mut() {
            sink(value);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
