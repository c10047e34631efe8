//! Single-pass scanning of survey files.
//!
//! [`Scan::for_file`] classifies a file by its category and extension and
//! returns the matching scan. Raw recordings get a [`DatagramScan`] driven
//! by the format's type table; SVP and Trueheave side-car files only get
//! an existence check.

mod engine;
mod existence;
pub mod profile;
mod result;
mod retained;
mod summary;
mod table;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use engine::{DatagramScan, PassState};
pub use existence::{Existence, ExistenceScan};
pub use profile::FormatProfile;
pub use result::{ScanResult, ScanState};
pub use retained::RetainedDatagrams;
pub use summary::DatagramTypeSummary;
pub use table::{PingCounting, Retention, TypeEntry, lookup};

use crate::decoder::{AllDecoder, FormatDecoder, GsfDecoder, KmallDecoder};
use crate::error::{QaError, Result};

/// File-type category as named in QA JSON input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Raw,
    Svp,
    Trueheave,
}

impl FileCategory {
    pub const ALL: [Self; 3] = [Self::Raw, Self::Svp, Self::Trueheave];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "Raw Files",
            Self::Svp => "SVP Files",
            Self::Trueheave => "Trueheave Files",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                format!("Unknown file type: {s}. Use 'Raw Files', 'SVP Files' or 'Trueheave Files'")
            })
    }
}

/// Raw recording formats with a datagram decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawFormat {
    All,
    Kmall,
    Gsf,
}

impl RawFormat {
    /// Matches a file extension, ignoring case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "kmall" => Some(Self::Kmall),
            "gsf" => Some(Self::Gsf),
            _ => None,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Kmall => "kmall",
            Self::Gsf => "gsf",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.profile().name
    }

    #[must_use]
    pub const fn profile(self) -> &'static FormatProfile {
        match self {
            Self::All => &profile::ALL,
            Self::Kmall => &profile::KMALL,
            Self::Gsf => &profile::GSF,
        }
    }

    /// Opens `path` with this format's decoder.
    ///
    /// # Errors
    /// Returns [`QaError::FileRead`] if the file cannot be opened.
    pub fn open_decoder(self, path: &Path) -> Result<Box<dyn FormatDecoder>> {
        Ok(match self {
            Self::All => Box::new(AllDecoder::open(path)?),
            Self::Kmall => Box::new(KmallDecoder::open(path)?),
            Self::Gsf => Box::new(GsfDecoder::open(path)?),
        })
    }
}

/// A scan of one file, chosen by [`Scan::for_file`].
#[derive(Debug)]
pub enum Scan {
    Datagram(DatagramScan),
    Existence(ExistenceScan),
}

impl Scan {
    /// Picks the scan for `path` given its QA JSON file type.
    ///
    /// # Errors
    /// Returns [`QaError::UnsupportedFile`] for raw files with an
    /// unrecognised extension and for unknown categories.
    pub fn for_file(path: &Path, file_type: &str) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unsupported = || QaError::UnsupportedFile {
            path: path.to_path_buf(),
            file_type: file_type.to_string(),
            extension: extension.clone(),
        };
        match file_type.parse::<FileCategory>() {
            Ok(FileCategory::Raw) => RawFormat::from_extension(&extension)
                .map(|format| Self::Datagram(DatagramScan::new(path, format)))
                .ok_or_else(unsupported),
            Ok(category) => Ok(Self::Existence(ExistenceScan::new(path, category))),
            Err(_) => Err(unsupported()),
        }
    }

    /// Runs the single pass.
    ///
    /// # Errors
    /// Returns [`QaError::ScanAlreadyRun`] on a second call, or any read or
    /// decode error from the pass.
    pub fn scan_datagram(&mut self, progress: Option<&mut dyn FnMut(f64)>) -> Result<()> {
        match self {
            Self::Datagram(scan) => scan.scan_datagram(progress),
            Self::Existence(scan) => scan.scan_datagram(progress),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Datagram(scan) => scan.path(),
            Self::Existence(scan) => scan.path(),
        }
    }

    #[must_use]
    pub const fn as_datagram(&self) -> Option<&DatagramScan> {
        match self {
            Self::Datagram(scan) => Some(scan),
            Self::Existence(_) => None,
        }
    }

    #[must_use]
    pub const fn as_existence(&self) -> Option<&ExistenceScan> {
        match self {
            Self::Existence(scan) => Some(scan),
            Self::Datagram(_) => None,
        }
    }
}

/// Size of `path` in bytes; missing files count as zero.
#[must_use]
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map_or(0, |meta| meta.len())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
