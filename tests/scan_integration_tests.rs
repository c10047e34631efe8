//! Integration tests for the `scan` command.

mod common;

use common::{
    TestFixture, all_survey_line, gsf_ping_body, gsf_record, kmall_datagram, kmall_ping_body,
};
use predicates::prelude::*;
use serde_json::Value;

fn scan_json(path: &str, extra: &[&str]) -> Value {
    let output = sonar_qa!()
        .args(["--no-config", "scan", path, "--format", "json"])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn scan_all_file_as_json() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("line.all", &all_survey_line("line.all", 10));

    let report = scan_json(&path, &[]);
    assert_eq!(report["fileType"], "Raw Files");
    assert_eq!(report["sizeMatched"], true);
    assert_eq!(report["totalPings"], 9);

    let types = report["types"].as_array().unwrap();
    let depth = types.iter().find(|row| row["typeId"] == "D").unwrap();
    assert_eq!(depth["recordCount"], 10);
    assert_eq!(depth["pingCount"], 9);
    let positions = types.iter().find(|row| row["typeId"] == "P").unwrap();
    assert_eq!(positions["recordCount"], 5);
}

#[test]
fn scan_kmall_counts_missed_pings() {
    let fixture = TestFixture::new();
    let mut bytes = Vec::new();
    for counter in [10u16, 13, 14, 15] {
        bytes.extend(kmall_datagram("MRZ", 1_552_521_600, &kmall_ping_body(counter)));
    }
    let path = fixture.create_file("line.kmall", &bytes);

    let report = scan_json(&path, &[]);
    let mrz = &report["types"][0];
    assert_eq!(mrz["typeId"], "MRZ");
    assert_eq!(mrz["pingCount"], 3);
    assert_eq!(mrz["missedPings"], 2);
}

#[test]
fn scan_gsf_counts_every_ping() {
    let fixture = TestFixture::new();
    let mut bytes = gsf_record(1, b"GSF-v03.09\0\0");
    for step in 0..3 {
        bytes.extend(gsf_record(
            2,
            &gsf_ping_body(1_552_521_600 + step, -42.5, 147.25, -12_345, &[1, 2, 3]),
        ));
    }
    let path = fixture.create_file("line.gsf", &bytes);

    let report = scan_json(&path, &[]);
    let pings = report["types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["typeId"] == "SWATH_BATHYMETRY_PING")
        .unwrap();
    assert_eq!(pings["recordCount"], 3);
    assert_eq!(pings["pingCount"], 3);
}

#[test]
fn scan_text_lists_types() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("line.all", &all_survey_line("line.all", 3));

    sonar_qa!()
        .args(["--no-config", "scan", path.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Raw Files)"))
        .stdout(predicate::str::contains("Records"));
}

#[test]
fn scan_side_car_reports_existence() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("heave.txt", b"");

    let report = scan_json(&path, &["--file-type", "Trueheave Files"]);
    assert_eq!(report["existence"], "empty");
}

#[test]
fn scan_unsupported_extension_exits_two() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("line.xtf", b"data");

    sonar_qa!()
        .args(["--no-config", "scan", path.as_str()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn scan_truncated_file_names_offset() {
    let fixture = TestFixture::new();
    let mut bytes = all_survey_line("line.all", 2);
    bytes.truncate(bytes.len() - 5);
    let path = fixture.create_file("line.all", &bytes);

    sonar_qa!()
        .args(["--no-config", "scan", path.as_str()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Malformed datagram"));
}
