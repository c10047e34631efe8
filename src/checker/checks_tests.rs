use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;

use super::*;
use crate::checker::test_fixtures::{counted, scan, with_pings};
use crate::error::QaError;
use crate::scan::{RawFormat, ScanState};

#[test]
fn catalogue_ids_are_unique() {
    let checks = builtin_checks();
    assert_eq!(checks.len(), 14);
    let ids: HashSet<Uuid> = checks.iter().map(|check| check.id()).collect();
    assert_eq!(ids.len(), checks.len());
    assert!(checks.iter().all(|check| check.version() == "1"));
}

#[test]
fn only_ancillary_checks_target_other_categories() {
    let categories: Vec<(&str, FileCategory)> = builtin_checks()
        .iter()
        .filter(|check| check.category() != FileCategory::Raw)
        .map(|check| (check.name(), check.category()))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("SVP File Available", FileCategory::Svp),
            ("Trueheave File Available", FileCategory::Trueheave),
        ]
    );
}

fn existence(dir: &TempDir, name: &str, contents: Option<&[u8]>, category: &str) -> Scan {
    let path = dir.path().join(name);
    if let Some(contents) = contents {
        fs::write(&path, contents).unwrap();
    }
    let mut scan = Scan::for_file(&path, category).unwrap();
    scan.scan_datagram(None).unwrap();
    scan
}

#[test]
fn svp_file_states() {
    let dir = TempDir::new().unwrap();
    let params = CheckParams::default();

    let present = existence(&dir, "cast.svp", Some(b"0 1500\n"), "SVP Files");
    assert_eq!(SvpFileAvailable.run(&present, &params).unwrap().state, ScanState::Pass);

    let empty = existence(&dir, "empty.svp", Some(b""), "SVP Files");
    let result = SvpFileAvailable.run(&empty, &params).unwrap();
    assert_eq!(result.state, ScanState::Fail);
    assert_eq!(result.messages, vec!["SVP file is empty (zero size)"]);

    let missing = existence(&dir, "gone.svp", None, "SVP Files");
    assert_eq!(
        SvpFileAvailable.run(&missing, &params).unwrap().messages,
        vec!["SVP file does not exist"]
    );
}

#[test]
fn trueheave_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = existence(&dir, "heave.000", None, "Trueheave Files");
    let result = TrueheaveFileAvailable
        .run(&missing, &CheckParams::default())
        .unwrap();
    assert_eq!(result.state, ScanState::Fail);
    assert_eq!(result.messages, vec!["Trueheave file does not exist"]);
}

#[test]
fn existence_check_rejects_unscanned_file() {
    let dir = TempDir::new().unwrap();
    let unscanned = Scan::for_file(&dir.path().join("cast.svp"), "SVP Files").unwrap();
    let err = SvpFileAvailable
        .run(&unscanned, &CheckParams::default())
        .unwrap_err();
    assert!(matches!(err, QaError::Check(_)));
}

#[test]
fn raw_check_rejects_existence_scan() {
    let dir = TempDir::new().unwrap();
    let svp = existence(&dir, "cast.svp", Some(b"1"), "SVP Files");
    let err = BathymetryAvailable
        .run(&svp, &CheckParams::default())
        .unwrap_err();
    assert!(matches!(err, QaError::Check(_)));
}

#[test]
fn minimum_ping_count_uses_threshold_param() {
    let scan = scan(
        "a.all",
        RawFormat::All,
        with_pings(counted(&[]), "D", 1..=5),
    );
    let check = MinimumPingCount;

    let defaults = CheckParams::resolve(&check.default_params(), &[]);
    assert_eq!(check.run(&scan, &defaults).unwrap().state, ScanState::Fail);

    let lowered = CheckParams::resolve(&check.default_params(), &[QajsonParam::new("threshold", "5")]);
    assert_eq!(check.run(&scan, &lowered).unwrap().state, ScanState::Pass);
}

#[test]
fn malformed_threshold_is_an_error() {
    let scan = scan("a.all", RawFormat::All, with_pings(counted(&[]), "D", 1..=5));
    let params = CheckParams::resolve(&[], &[QajsonParam::new("threshold", "lots")]);
    let err = MissingPingsTolerable.run(&scan, &params).unwrap_err();
    assert_eq!(err.to_string(), QaError::Check("Parameter 'threshold' must be numeric (found \"lots\")".to_string()).to_string());
}

#[test]
fn availability_checks_read_presence() {
    let scan = scan(
        "a.all",
        RawFormat::All,
        with_pings(counted(&[("A", 1), ("C", 1)]), "S", 1..=3),
    );
    let params = CheckParams::default();
    assert_eq!(BackscatterAvailable.run(&scan, &params).unwrap().state, ScanState::Pass);
    assert_eq!(BathymetryAvailable.run(&scan, &params).unwrap().state, ScanState::Fail);
}
