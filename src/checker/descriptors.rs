//! Datagrams each availability check requires, per raw format.

use super::presence::RequiredDatagram;
use crate::scan::RawFormat;

const INSTALLATION_MISSING: &str = "Warning: installation parameters are missing please ensure that you have your lever arms and vessel frame parameters collected elsewhere.";
const RUNTIME_MISSING: &str = "Warning: runtime parameters are missing these are critical for backscatter processing streams.  If just collecting bathymetry, please consider other users of this data.";
const ATTITUDE_MISSING: &str = "Critical: attitude data is missing, soundings cannot be motion corrected.  Ensure your motion sensor is interfaced and logging.";
const NETWORK_ATTITUDE_MISSING: &str = "Warning: your network attitude and velocity is not being logged.  If you intend working in deeper water with a frequency modulated chirp you will need to interface this data.";
const POSITION_MISSING: &str = "Critical: position data missing, you will not be able to process this data without ensuring this data is being collected.";
const SURFACE_SOUND_SPEED_MISSING: &str = "Warning: surface sound velocity data is missing, ensure your sensor is working or collect as many profiles as possible to attempt to compensate.";
const PROFILE_MISSING: &str = "Warning: no sound velocity profile data has been collected in the raw file, please ensure you are collecting this data elsewhere.";

const ALL_DEPTH_MISSING: &str = "Warning: neither datagram 'D' or 'X' were found, processed depth information is missing.";
const ALL_RANGE_ANGLE_MISSING: &str = "Critical: neither datagram 'F', 'f' or 'N' were found. Critical range and angle data missing, you are not collecting the data required for post processing.  If you are collecting processed depths it is possible to back process however it is not desirable and is a complex process.";
const ALL_SEABED_IMAGE_MISSING: &str = "Critical: backscatter information is missing ('S' or 'Y' datagram).  You will not be able to process backscatter without seabed image data.  If you intend processing backscatter check your setup.";

const KMALL_DEPTH_MISSING: &str = "Warning: datagram 'MRZ' was not found, processed depth information is missing.";
const KMALL_RANGE_ANGLE_MISSING: &str = "Critical: datagram 'MRZ' was not found. Critical range and angle data missing, you are not collecting the data required for post processing.";
const KMALL_BACKSCATTER_MISSING: &str = "Critical: backscatter information is missing ('MRZ' datagram).  You will not be able to process backscatter without seabed image data.  If you intend processing backscatter check your setup.";

const GSF_AMPLITUDE_MISSING: &str = "Critical: backscatter information is missing ('MEAN_CAL_AMPLITUDE_ARRAY' or 'MEAN_REL_AMPLITUDE_ARRAY' datagram).  You will not be able to process backscatter without seabed image data.  If you intend processing backscatter check your setup.";
const GSF_PROFILE_MISSING: &str = "Warning: 'SOUND_VELOCITY_PROFILE' were not found. Ensure sound velocity profiles are being logged separately.";
const GSF_ATTITUDE_MISSING: &str = "Warning: 'ATTITUDE' were not found. This data will be logged in the ping header.";

const ALL_BATHYMETRY: &[RequiredDatagram] = &[
    RequiredDatagram::optional("I", INSTALLATION_MISSING),
    RequiredDatagram::optional("R", RUNTIME_MISSING),
    RequiredDatagram::critical("A", ATTITUDE_MISSING),
    RequiredDatagram::optional("n", NETWORK_ATTITUDE_MISSING),
    RequiredDatagram::critical("P", POSITION_MISSING),
    RequiredDatagram::optional("G", SURFACE_SOUND_SPEED_MISSING),
    RequiredDatagram::optional("U", PROFILE_MISSING),
    RequiredDatagram::optional("D", ALL_DEPTH_MISSING).or(&["X"]),
    RequiredDatagram::critical("F", ALL_RANGE_ANGLE_MISSING).or(&["f", "N"]),
];

const ALL_BACKSCATTER: &[RequiredDatagram] =
    &[RequiredDatagram::critical("S", ALL_SEABED_IMAGE_MISSING).or(&["Y"])];

const ALL_RAY_TRACING: &[RequiredDatagram] = &[
    RequiredDatagram::optional("I", INSTALLATION_MISSING),
    RequiredDatagram::optional("R", RUNTIME_MISSING),
    RequiredDatagram::critical("A", ATTITUDE_MISSING),
    RequiredDatagram::optional("n", NETWORK_ATTITUDE_MISSING),
    RequiredDatagram::critical("P", POSITION_MISSING),
    RequiredDatagram::optional("G", SURFACE_SOUND_SPEED_MISSING),
    RequiredDatagram::optional("U", PROFILE_MISSING),
    RequiredDatagram::critical("F", ALL_RANGE_ANGLE_MISSING).or(&["f", "N"]),
];

const KMALL_BATHYMETRY: &[RequiredDatagram] = &[
    RequiredDatagram::optional("IIP", INSTALLATION_MISSING),
    RequiredDatagram::optional("IOP", RUNTIME_MISSING),
    RequiredDatagram::critical("SKM", ATTITUDE_MISSING),
    RequiredDatagram::critical("SPO", POSITION_MISSING),
    RequiredDatagram::optional("SVT", SURFACE_SOUND_SPEED_MISSING),
    RequiredDatagram::optional("SVP", PROFILE_MISSING),
    RequiredDatagram::optional("MRZ", KMALL_DEPTH_MISSING),
];

const KMALL_BACKSCATTER: &[RequiredDatagram] =
    &[RequiredDatagram::critical("MRZ", KMALL_BACKSCATTER_MISSING)];

const KMALL_RAY_TRACING: &[RequiredDatagram] = &[
    RequiredDatagram::optional("IIP", INSTALLATION_MISSING),
    RequiredDatagram::optional("IOP", RUNTIME_MISSING),
    RequiredDatagram::critical("SKM", ATTITUDE_MISSING),
    RequiredDatagram::critical("SPO", POSITION_MISSING),
    RequiredDatagram::optional("SVT", SURFACE_SOUND_SPEED_MISSING),
    RequiredDatagram::optional("SVP", PROFILE_MISSING),
    RequiredDatagram::critical("MRZ", KMALL_RANGE_ANGLE_MISSING),
];

const GSF_BATHYMETRY: &[RequiredDatagram] = &[
    RequiredDatagram::critical(
        "DEPTH_ARRAY",
        "Critical: 'DEPTH_ARRAY' were not found. Critical range and angle data missing, you are not collecting the data required for post processing.",
    ),
    RequiredDatagram::critical(
        "ACROSS_TRACK_ARRAY",
        "Critical: 'ACROSS_TRACK_ARRAY' were not found. Critical range and angle data missing, you are not collecting the data required for post processing.",
    ),
    RequiredDatagram::critical(
        "ALONG_TRACK_ARRAY",
        "Critical: 'ALONG_TRACK_ARRAY' were not found. Critical data missing, you are not collecting the data required for post processing.",
    ),
    RequiredDatagram::optional("SOUND_VELOCITY_PROFILE", GSF_PROFILE_MISSING),
    RequiredDatagram::optional("ATTITUDE", GSF_ATTITUDE_MISSING),
];

const GSF_BACKSCATTER: &[RequiredDatagram] = &[
    RequiredDatagram::critical("MEAN_CAL_AMPLITUDE_ARRAY", GSF_AMPLITUDE_MISSING),
    RequiredDatagram::critical("MEAN_REL_AMPLITUDE_ARRAY", GSF_AMPLITUDE_MISSING),
];

const GSF_RAY_TRACING: &[RequiredDatagram] = &[
    RequiredDatagram::critical(
        "BEAM_ANGLE_FORWARD_ARRAY",
        "Critical: 'BEAM_ANGLE_FORWARD_ARRAY' were not found. Critical range and angle data missing, you are not collecting the data required for post processing.  If you are collecting processed depths it is possible to back process however it is not desirable and is a complex process.",
    ),
    RequiredDatagram::critical(
        "BEAM_ANGLE_ARRAY",
        "Critical: 'BEAM_ANGLE_ARRAY' were not found. Critical range and angle data missing, you are not collecting the data required for post processing.  If you are collecting processed depths it is possible to back process however it is not desirable and is a complex process.",
    ),
    RequiredDatagram::critical(
        "TRAVEL_TIME_ARRAY",
        "Critical: 'TRAVEL_TIME_ARRAY' were not found. Critical range and angle data missing, you are not collecting the data required for post processing.  If you are collecting processed depths it is possible to back process however it is not desirable and is a complex process.",
    ),
    RequiredDatagram::optional("SOUND_VELOCITY_PROFILE", GSF_PROFILE_MISSING),
    RequiredDatagram::optional("ATTITUDE", GSF_ATTITUDE_MISSING),
];

/// Height availability for GSF: at least one ping must carry a height.
pub const GSF_HEIGHT: RequiredDatagram =
    RequiredDatagram::critical("height", "Critical: 'height' data was not found.");

#[must_use]
pub const fn bathymetry(format: RawFormat) -> &'static [RequiredDatagram] {
    match format {
        RawFormat::All => ALL_BATHYMETRY,
        RawFormat::Kmall => KMALL_BATHYMETRY,
        RawFormat::Gsf => GSF_BATHYMETRY,
    }
}

#[must_use]
pub const fn backscatter(format: RawFormat) -> &'static [RequiredDatagram] {
    match format {
        RawFormat::All => ALL_BACKSCATTER,
        RawFormat::Kmall => KMALL_BACKSCATTER,
        RawFormat::Gsf => GSF_BACKSCATTER,
    }
}

#[must_use]
pub const fn ray_tracing(format: RawFormat) -> &'static [RequiredDatagram] {
    match format {
        RawFormat::All => ALL_RAY_TRACING,
        RawFormat::Kmall => KMALL_RAY_TRACING,
        RawFormat::Gsf => GSF_RAY_TRACING,
    }
}
