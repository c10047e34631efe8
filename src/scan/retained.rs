use indexmap::IndexMap;

use crate::decoder::{
    Height, InstallationParameters, NetworkAttitude, Payload, Position, RuntimeParameters,
    SwathPing,
};

/// Decoded payloads kept for the checks, keyed by datagram type id in
/// first-seen order. Each list is in file order.
#[derive(Debug, Default)]
pub struct RetainedDatagrams {
    by_type: IndexMap<String, Vec<Payload>>,
}

impl RetainedDatagrams {
    pub(crate) fn push(&mut self, type_id: &str, payload: Payload) {
        self.by_type
            .entry(type_id.to_string())
            .or_default()
            .push(payload);
    }

    #[must_use]
    pub fn contains(&self, type_id: &str) -> bool {
        self.by_type.contains_key(type_id)
    }

    #[must_use]
    pub fn get(&self, type_id: &str) -> &[Payload] {
        self.by_type
            .get(type_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn installation(&self, type_id: &str) -> impl Iterator<Item = &InstallationParameters> {
        self.get(type_id).iter().filter_map(Payload::as_installation)
    }

    pub fn runtime(&self, type_id: &str) -> impl Iterator<Item = &RuntimeParameters> {
        self.get(type_id).iter().filter_map(Payload::as_runtime)
    }

    pub fn positions(&self, type_id: &str) -> impl Iterator<Item = &Position> {
        self.get(type_id).iter().filter_map(Payload::as_position)
    }

    pub fn heights(&self, type_id: &str) -> impl Iterator<Item = &Height> {
        self.get(type_id).iter().filter_map(Payload::as_height)
    }

    pub fn network_attitude(&self, type_id: &str) -> impl Iterator<Item = &NetworkAttitude> {
        self.get(type_id)
            .iter()
            .filter_map(Payload::as_network_attitude)
    }

    pub fn swath_pings(&self, type_id: &str) -> impl Iterator<Item = &SwathPing> {
        self.get(type_id).iter().filter_map(Payload::as_swath_ping)
    }
}
