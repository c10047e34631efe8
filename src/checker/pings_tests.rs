use serde_json::json;

use super::*;
use crate::checker::test_fixtures::{counted, datagram_scan, with_pings};
use crate::decoder::MemoryDecoder;
use crate::scan::{RawFormat, ScanState};

fn all_scan(decoder: MemoryDecoder) -> DatagramScan {
    datagram_scan("0001.all", RawFormat::All, decoder)
}

#[test]
fn contiguous_pings_are_tolerable() {
    let scan = all_scan(with_pings(counted(&[]), "D", 1..=50));
    assert_eq!(missing_pings_tolerable(&scan, 1.0).state, ScanState::Pass);
}

#[test]
fn excessive_missed_pings_fail() {
    // 3 pings counted, 2 missed
    let scan = all_scan(with_pings(counted(&[]), "F", [10, 13, 14, 15]));
    let result = missing_pings_tolerable(&scan, 1.0);

    assert_eq!(result.state, ScanState::Fail);
    assert_eq!(result.messages.len(), 2);
    assert!(result.messages[1].contains("'F' missed 2 of 3 pings"));
    assert!(result.data.unwrap()["missed_percent"]["F"].as_f64().unwrap() > 66.0);
}

#[test]
fn threshold_is_inclusive() {
    // 100 pings counted, 1 missed
    let counters = (1..=100).chain(102..=102);
    let scan = all_scan(with_pings(counted(&[]), "D", counters));
    assert_eq!(scan.missed_pings(Some("D")), 1);
    assert_eq!(missing_pings_tolerable(&scan, 1.0).state, ScanState::Pass);
    assert_eq!(missing_pings_tolerable(&scan, 0.5).state, ScanState::Fail);
}

#[test]
fn types_without_counted_pings_are_skipped() {
    let scan = all_scan(with_pings(counted(&[("C", 1)]), "S", [7]));
    assert_eq!(scan.total_pings(Some("S")), 0);
    assert_eq!(missing_pings_tolerable(&scan, 0.0).state, ScanState::Pass);
}

#[test]
fn minimum_pings_checks_every_observed_type() {
    let decoder = with_pings(with_pings(counted(&[]), "D", 1..=30), "S", 1..=5);
    let scan = all_scan(decoder);
    let result = has_minimum_pings(&scan, 20.0);

    assert_eq!(result.state, ScanState::Fail);
    assert_eq!(
        result.messages,
        vec![
            "Minimum ping count is less than threshold count of 20",
            "Datagram 'S' has 4 pings",
        ]
    );
    assert_eq!(result.data.unwrap()["ping_counts"], json!({"D": 29, "S": 4}));
}

#[test]
fn minimum_pings_pass_at_threshold() {
    let scan = all_scan(with_pings(counted(&[]), "X", 0..=20));
    assert_eq!(has_minimum_pings(&scan, 20.0).state, ScanState::Pass);
}

#[test]
fn no_ping_datagrams_fails_minimum_pings() {
    let scan = all_scan(counted(&[("C", 3)]));
    let result = has_minimum_pings(&scan, 1.0);
    assert_eq!(result.state, ScanState::Fail);
    assert_eq!(result.messages, vec!["No ping datagrams found in file"]);
}
