//! Per-format type tables and the datagram types each check reads.

use super::table::{PingCounting, Retention, TypeEntry};
use crate::decoder::RecordKind;

/// Everything the engine and checks need to know about one raw format.
#[derive(Debug)]
pub struct FormatProfile {
    pub name: &'static str,
    pub types: &'static [TypeEntry],
    pub installation: &'static str,
    pub runtime: &'static str,
    pub position: &'static str,
    pub height: &'static str,
}

impl FormatProfile {
    /// Type ids that count pings, in table order.
    #[must_use]
    pub fn ping_types(&self) -> Vec<&'static str> {
        self.types
            .iter()
            .filter(|entry| entry.is_ping_bearing())
            .map(|entry| entry.id)
            .collect()
    }
}

pub static ALL: FormatProfile = FormatProfile {
    name: "Kongsberg .all",
    types: &[
        TypeEntry::retained("I", RecordKind::InstallationParameters, Retention::All),
        TypeEntry::retained("R", RecordKind::RuntimeParameters, Retention::All),
        TypeEntry::retained("P", RecordKind::Position, Retention::All),
        TypeEntry::retained("h", RecordKind::Height, Retention::FirstOnly),
        TypeEntry::retained("n", RecordKind::NetworkAttitude, Retention::All),
        TypeEntry::counted("A", RecordKind::Attitude),
        TypeEntry::counted("C", RecordKind::Clock),
        TypeEntry::counted("G", RecordKind::SurfaceSoundSpeed),
        TypeEntry::counted("U", RecordKind::SoundVelocityProfile),
        TypeEntry::counted("k", RecordKind::WaterColumn),
        TypeEntry::ping("D", RecordKind::Depth, PingCounting::Sequence),
        TypeEntry::ping("X", RecordKind::Depth, PingCounting::Sequence),
        TypeEntry::ping("F", RecordKind::RangeAngle, PingCounting::Sequence),
        TypeEntry::ping("f", RecordKind::RangeAngle, PingCounting::Sequence),
        TypeEntry::ping("N", RecordKind::RangeAngle, PingCounting::Sequence),
        TypeEntry::ping("S", RecordKind::SeabedImage, PingCounting::Sequence),
        TypeEntry::ping("Y", RecordKind::SeabedImage, PingCounting::Sequence),
    ],
    installation: "I",
    runtime: "R",
    position: "P",
    height: "h",
};

pub static KMALL: FormatProfile = FormatProfile {
    name: "Kongsberg .kmall",
    types: &[
        TypeEntry::retained("IIP", RecordKind::InstallationParameters, Retention::All),
        TypeEntry::retained("IOP", RecordKind::RuntimeParameters, Retention::All),
        TypeEntry::retained("SPO", RecordKind::Position, Retention::All),
        TypeEntry::retained("SHI", RecordKind::Height, Retention::FirstOnly),
        TypeEntry::counted("SKM", RecordKind::Attitude),
        TypeEntry::counted("SCL", RecordKind::Clock),
        TypeEntry::counted("SVT", RecordKind::SurfaceSoundSpeed),
        TypeEntry::counted("SVP", RecordKind::SoundVelocityProfile),
        TypeEntry::counted("MWC", RecordKind::WaterColumn),
        TypeEntry::ping("MRZ", RecordKind::Depth, PingCounting::Sequence),
    ],
    installation: "IIP",
    runtime: "IOP",
    position: "SPO",
    height: "SHI",
};

pub static GSF: FormatProfile = FormatProfile {
    name: "Generic Sensor Format",
    types: &[
        TypeEntry::counted("HEADER", RecordKind::FileHeader),
        TypeEntry::ping("SWATH_BATHYMETRY_PING", RecordKind::SwathPing, PingCounting::EveryRecord)
            .with_retention(Retention::All),
        TypeEntry::counted("SOUND_VELOCITY_PROFILE", RecordKind::SoundVelocityProfile),
        TypeEntry::retained(
            "PROCESSING_PARAMETERS",
            RecordKind::InstallationParameters,
            Retention::All,
        ),
        TypeEntry::retained("SENSOR_PARAMETERS", RecordKind::RuntimeParameters, Retention::All),
        TypeEntry::counted("COMMENT", RecordKind::Comment),
        TypeEntry::counted("ATTITUDE", RecordKind::Attitude),
    ],
    installation: "PROCESSING_PARAMETERS",
    runtime: "SENSOR_PARAMETERS",
    position: "SWATH_BATHYMETRY_PING",
    height: "SWATH_BATHYMETRY_PING",
};
