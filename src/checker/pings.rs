//! Ping-quality reductions over a scan's per-type summaries.

use indexmap::IndexMap;
use serde_json::json;

use crate::scan::{DatagramScan, DatagramTypeSummary, ScanResult};

/// Summaries of the format's ping-bearing types that occur in the file.
fn ping_summaries(scan: &DatagramScan) -> impl Iterator<Item = (&'static str, &DatagramTypeSummary)> {
    scan.profile()
        .ping_types()
        .into_iter()
        .filter_map(move |id| scan.summary(id).map(|summary| (id, summary)))
}

/// Fails when any ping-bearing type misses more than `threshold_percent`
/// of its pings. Types without counted pings are skipped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn missing_pings_tolerable(scan: &DatagramScan, threshold_percent: f64) -> ScanResult {
    let mut offenders = IndexMap::new();
    let mut messages = Vec::new();
    for (id, summary) in ping_summaries(scan) {
        let Some(percent) = summary.missed_percent() else {
            continue;
        };
        if percent > threshold_percent {
            messages.push(format!(
                "Datagram '{id}' missed {} of {} pings ({percent:.2}%), exceeding the threshold of {threshold_percent}%",
                summary.missed_pings, summary.ping_count
            ));
            offenders.insert(id, percent);
        }
    }

    if offenders.is_empty() {
        ScanResult::pass()
    } else {
        ScanResult::fail(format!(
            "Missing ping percentage exceeds threshold of {threshold_percent}%"
        ))
        .with_messages(messages)
        .with_data(json!({ "missed_percent": offenders }))
    }
}

/// Fails when any observed ping-bearing type has fewer than `threshold`
/// pings, or when the file holds no ping-bearing datagrams at all.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn has_minimum_pings(scan: &DatagramScan, threshold: f64) -> ScanResult {
    let counts: IndexMap<&str, u64> = ping_summaries(scan)
        .map(|(id, summary)| (id, summary.ping_count))
        .collect();
    if counts.is_empty() {
        return ScanResult::fail("No ping datagrams found in file");
    }

    let below: IndexMap<&str, u64> = counts
        .iter()
        .filter(|(_, count)| (**count as f64) < threshold)
        .map(|(id, count)| (*id, *count))
        .collect();
    let data = json!({ "ping_counts": counts });
    if below.is_empty() {
        return ScanResult::pass().with_data(data);
    }
    ScanResult::fail(format!(
        "Minimum ping count is less than threshold count of {threshold}"
    ))
    .with_messages(
        below
            .iter()
            .map(|(id, count)| format!("Datagram '{id}' has {count} pings")),
    )
    .with_data(data)
}

#[cfg(test)]
#[path = "pings_tests.rs"]
mod tests;
