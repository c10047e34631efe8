//! Integration tests for the `run` command.

mod common;

use common::{
    BACKSCATTER, BATHYMETRY, DATE_CHECKED, FILENAME_CHECKED, MIN_PINGS, MISSING_PINGS, POSITIONS,
    SVP, TestFixture, all_survey_line, check_request,
};
use predicates::prelude::*;
use serde_json::{Value, json};

const LINE: &str = "0001_20181111_103000_Vessel.all";

fn outputs(document: &Value, index: usize) -> &Value {
    &document["qa"]["raw_data"]["checks"][index]["outputs"]
}

#[test]
fn run_passes_healthy_line() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file(LINE, &all_survey_line(LINE, 30));
    let files = [(raw.as_str(), "Raw Files")];
    let qajson = fixture.create_qajson(
        "qa.json",
        &[
            check_request(FILENAME_CHECKED, &files, json!([])),
            check_request(DATE_CHECKED, &files, json!([])),
            check_request(MIN_PINGS, &files, json!([])),
            check_request(MISSING_PINGS, &files, json!([])),
        ],
    );

    sonar_qa!()
        .current_dir(fixture.path())
        .args(["--no-config", "run"])
        .arg(&qajson)
        .args(["-o", "out.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("4 checks: 4 passed"));

    let written = fixture.read_json("out.json");
    for index in 0..4 {
        let output = outputs(&written, index);
        assert_eq!(output["execution"]["status"], "completed");
        assert_eq!(output["check_state"], "pass", "check {index}: {output}");
    }
    assert!(written["qa"]["survey_products"].is_object());
}

#[test]
fn run_writes_document_to_stdout() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file(LINE, &all_survey_line(LINE, 30));
    let qajson = fixture.create_qajson(
        "qa.json",
        &[check_request(MIN_PINGS, &[(raw.as_str(), "Raw Files")], json!([]))],
    );

    sonar_qa!()
        .args(["--no-config", "run"])
        .arg(&qajson)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"check_state\": \"pass\""));
}

#[test]
fn run_exits_one_when_a_check_fails() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file(LINE, &all_survey_line(LINE, 30));
    let files = [(raw.as_str(), "Raw Files")];
    let qajson = fixture.create_qajson(
        "qa.json",
        &[
            check_request(BATHYMETRY, &files, json!([])),
            check_request(BACKSCATTER, &files, json!([])),
            check_request(MIN_PINGS, &files, json!([{"name": "threshold", "value": 1000}])),
        ],
    );

    sonar_qa!()
        .args(["--no-config", "run"])
        .arg(&qajson)
        .args(["-o"])
        .arg(fixture.path().join("out.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed"));

    let written = fixture.read_json("out.json");
    assert_eq!(outputs(&written, 1)["check_state"], "fail");
    assert_eq!(outputs(&written, 2)["check_state"], "fail");
}

#[test]
fn run_marks_bad_parameter_as_failed_execution() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file(LINE, &all_survey_line(LINE, 30));
    let files = [(raw.as_str(), "Raw Files")];
    let qajson = fixture.create_qajson(
        "qa.json",
        &[
            check_request(MIN_PINGS, &files, json!([{"name": "threshold", "value": "many"}])),
            check_request(MISSING_PINGS, &files, json!([])),
        ],
    );

    sonar_qa!()
        .args(["--no-config", "-q", "run"])
        .arg(&qajson)
        .args(["-o"])
        .arg(fixture.path().join("out.json"))
        .assert()
        .code(1);

    let written = fixture.read_json("out.json");
    assert_eq!(outputs(&written, 0)["execution"]["status"], "failed");
    assert!(!outputs(&written, 0)["execution"]["error"].as_str().unwrap().is_empty());
    assert_eq!(outputs(&written, 1)["execution"]["status"], "completed");
}

#[test]
fn run_reports_positions_as_geojson() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file(LINE, &all_survey_line(LINE, 30));
    let qajson = fixture.create_qajson(
        "qa.json",
        &[check_request(POSITIONS, &[(raw.as_str(), "Raw Files")], json!([]))],
    );

    sonar_qa!()
        .args(["--no-config", "-q", "run"])
        .arg(&qajson)
        .args(["-o"])
        .arg(fixture.path().join("out.json"))
        .assert()
        .success();

    let written = fixture.read_json("out.json");
    let map = &outputs(&written, 0)["data"]["map"];
    assert_eq!(map["type"], "FeatureCollection");
    let coordinates = map["features"][0]["geometry"]["coordinates"].as_array().unwrap();
    assert_eq!(coordinates.len(), 5);
    assert!((coordinates[0][0].as_f64().unwrap() - 147.25).abs() < 1e-6);
}

#[test]
fn run_checks_side_car_files() {
    let fixture = TestFixture::new();
    let present = fixture.create_file("cast.svp", b"[SVP_VERSION_2]\n");
    let empty = fixture.create_file("empty.svp", b"");
    let qajson = fixture.create_qajson(
        "qa.json",
        &[
            check_request(SVP, &[(present.as_str(), "SVP Files")], json!([])),
            check_request(SVP, &[(empty.as_str(), "SVP Files")], json!([])),
        ],
    );

    sonar_qa!()
        .args(["--no-config", "-q", "run"])
        .arg(&qajson)
        .args(["-o"])
        .arg(fixture.path().join("out.json"))
        .assert()
        .code(1);

    let written = fixture.read_json("out.json");
    assert_eq!(outputs(&written, 0)["check_state"], "pass");
    assert_eq!(outputs(&written, 1)["check_state"], "fail");
}

#[test]
fn run_leaves_unknown_checks_untouched() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file(LINE, &all_survey_line(LINE, 30));
    let qajson = fixture.create_qajson(
        "qa.json",
        &[check_request(
            "00000000-0000-4000-8000-000000000000",
            &[(raw.as_str(), "Raw Files")],
            json!([]),
        )],
    );

    sonar_qa!()
        .args(["--no-config", "run"])
        .arg(&qajson)
        .args(["-o"])
        .arg(fixture.path().join("out.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("1 not run"));

    let written = fixture.read_json("out.json");
    assert!(outputs(&written, 0).is_null());
}

#[test]
fn run_rejects_corrupt_raw_file() {
    let fixture = TestFixture::new();
    let raw = fixture.create_file("broken.all", &[0x10, 0x00, 0x00, 0x00, 0xFF]);
    let qajson = fixture.create_qajson(
        "qa.json",
        &[check_request(MIN_PINGS, &[(raw.as_str(), "Raw Files")], json!([]))],
    );

    sonar_qa!()
        .args(["--no-config", "run"])
        .arg(&qajson)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn run_missing_document_exits_two() {
    let fixture = TestFixture::new();

    sonar_qa!()
        .args(["--no-config", "run"])
        .arg(fixture.path().join("absent.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file"));
}
