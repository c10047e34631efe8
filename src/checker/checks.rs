//! The built-in check catalogue.

use uuid::{Uuid, uuid};

use super::{
    Check, CheckParams, completed_datagram_scan, completed_existence_scan, descriptors, height,
    metadata, pings, presence::evaluate_presence, track,
};
use crate::error::Result;
use crate::qajson::QajsonParam;
use crate::scan::{Existence, FileCategory, Scan, ScanResult};

/// Every built-in check, in catalogue order.
#[must_use]
pub fn builtin_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(FilenameChecked),
        Box::new(DateChecked),
        Box::new(BathymetryAvailable),
        Box::new(BackscatterAvailable),
        Box::new(RayTracingAvailable),
        Box::new(MinimumPingCount),
        Box::new(MissingPingsTolerable),
        Box::new(EllipsoidHeightAvailable),
        Box::new(EllipsoidHeightSetup),
        Box::new(RuntimeParameters),
        Box::new(Positions),
        Box::new(InstallationParameters),
        Box::new(SvpFileAvailable),
        Box::new(TrueheaveFileAvailable),
    ]
}

pub struct FilenameChecked;

impl Check for FilenameChecked {
    fn id(&self) -> Uuid {
        uuid!("7761e08b-1380-46fa-a7eb-f1f41db38541")
    }

    fn name(&self) -> &'static str {
        "Filename checked"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        Ok(metadata::filename_matches(completed_datagram_scan(scan)?))
    }
}

pub struct DateChecked;

impl Check for DateChecked {
    fn id(&self) -> Uuid {
        uuid!("4a3f3371-3a21-44f2-93cf-d9ed19d0c002")
    }

    fn name(&self) -> &'static str {
        "Date checked"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        Ok(metadata::date_matches(completed_datagram_scan(scan)?))
    }
}

pub struct BathymetryAvailable;

impl Check for BathymetryAvailable {
    fn id(&self) -> Uuid {
        uuid!("8c909ace-8759-4c2c-b86a-f76f888cd821")
    }

    fn name(&self) -> &'static str {
        "Bathymetry Available"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        let scan = completed_datagram_scan(scan)?;
        Ok(evaluate_presence(descriptors::bathymetry(scan.format()), |id| {
            scan.is_present(id)
        }))
    }
}

pub struct BackscatterAvailable;

impl Check for BackscatterAvailable {
    fn id(&self) -> Uuid {
        uuid!("bbce47c0-54c9-4c60-8de8-b174a8905091")
    }

    fn name(&self) -> &'static str {
        "Backscatter Available"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        let scan = completed_datagram_scan(scan)?;
        Ok(evaluate_presence(descriptors::backscatter(scan.format()), |id| {
            scan.is_present(id)
        }))
    }
}

pub struct RayTracingAvailable;

impl Check for RayTracingAvailable {
    fn id(&self) -> Uuid {
        uuid!("5421f3f2-6e37-4740-bf83-488bebde49f4")
    }

    fn name(&self) -> &'static str {
        "Ray Tracing Available"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        let scan = completed_datagram_scan(scan)?;
        Ok(evaluate_presence(descriptors::ray_tracing(scan.format()), |id| {
            scan.is_present(id)
        }))
    }
}

pub struct MinimumPingCount;

impl Check for MinimumPingCount {
    fn id(&self) -> Uuid {
        uuid!("d762fd79-75bc-4aff-a9d2-e0c36e744e17")
    }

    fn name(&self) -> &'static str {
        "Minimum Ping count"
    }

    fn default_params(&self) -> Vec<QajsonParam> {
        vec![QajsonParam::new("threshold", 20)]
    }

    fn run(&self, scan: &Scan, params: &CheckParams) -> Result<ScanResult> {
        let scan = completed_datagram_scan(scan)?;
        Ok(pings::has_minimum_pings(scan, params.number("threshold")?))
    }
}

pub struct MissingPingsTolerable;

impl Check for MissingPingsTolerable {
    fn id(&self) -> Uuid {
        uuid!("4db0e4f2-87d7-42cb-977e-a05e95b10051")
    }

    fn name(&self) -> &'static str {
        "Missing Pings tolerable"
    }

    fn default_params(&self) -> Vec<QajsonParam> {
        vec![QajsonParam::new("threshold", 1.0)]
    }

    fn run(&self, scan: &Scan, params: &CheckParams) -> Result<ScanResult> {
        let scan = completed_datagram_scan(scan)?;
        Ok(pings::missing_pings_tolerable(scan, params.number("threshold")?))
    }
}

pub struct EllipsoidHeightAvailable;

impl Check for EllipsoidHeightAvailable {
    fn id(&self) -> Uuid {
        uuid!("e0facb93-c43f-4c9d-a288-6805919954b8")
    }

    fn name(&self) -> &'static str {
        "Ellipsoid Height Available"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        Ok(height::ellipsoid_height_available(completed_datagram_scan(scan)?))
    }
}

pub struct EllipsoidHeightSetup;

impl Check for EllipsoidHeightSetup {
    fn id(&self) -> Uuid {
        uuid!("9b39cae1-dbb6-4f8c-b71a-d6f8ed843808")
    }

    fn name(&self) -> &'static str {
        "Ellipsoid Height Setup"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        Ok(height::ellipsoid_height_setup(completed_datagram_scan(scan)?))
    }
}

pub struct RuntimeParameters;

impl Check for RuntimeParameters {
    fn id(&self) -> Uuid {
        uuid!("dbaacf90-a47e-4ae0-9289-49cdd0dbab50")
    }

    fn name(&self) -> &'static str {
        "Runtime Parameters"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        track::runtime_parameters(completed_datagram_scan(scan)?)
    }
}

pub struct Positions;

impl Check for Positions {
    fn id(&self) -> Uuid {
        uuid!("ac2e3271-971f-46b1-97c2-fb07523ca2b0")
    }

    fn name(&self) -> &'static str {
        "Positions"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        track::positions(completed_datagram_scan(scan)?)
    }
}

pub struct InstallationParameters;

impl Check for InstallationParameters {
    fn id(&self) -> Uuid {
        uuid!("8d6f11dc-5e9b-4c09-857f-3f0dcbe19ed8")
    }

    fn name(&self) -> &'static str {
        "Installation Parameters"
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        Ok(metadata::installation_parameters(completed_datagram_scan(scan)?))
    }
}

/// Shared verdict for the ancillary-file checks.
fn ancillary_file(scan: &Scan, label: &str) -> Result<ScanResult> {
    let outcome = completed_existence_scan(scan)?.outcome();
    Ok(match outcome {
        Some(Existence::Present) => ScanResult::pass(),
        Some(Existence::Empty) => ScanResult::fail(format!("{label} file is empty (zero size)")),
        Some(Existence::Missing) | None => ScanResult::fail(format!("{label} file does not exist")),
    })
}

pub struct SvpFileAvailable;

impl Check for SvpFileAvailable {
    fn id(&self) -> Uuid {
        uuid!("e57b7811-5863-49b3-bd06-a73de0add615")
    }

    fn name(&self) -> &'static str {
        "SVP File Available"
    }

    fn category(&self) -> FileCategory {
        FileCategory::Svp
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        ancillary_file(scan, "SVP")
    }
}

pub struct TrueheaveFileAvailable;

impl Check for TrueheaveFileAvailable {
    fn id(&self) -> Uuid {
        uuid!("8da36d61-c986-4089-9642-ca2139577fab")
    }

    fn name(&self) -> &'static str {
        "Trueheave File Available"
    }

    fn category(&self) -> FileCategory {
        FileCategory::Trueheave
    }

    fn run(&self, scan: &Scan, _params: &CheckParams) -> Result<ScanResult> {
        ancillary_file(scan, "Trueheave")
    }
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
