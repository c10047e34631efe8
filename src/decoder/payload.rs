use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use super::gsf::GSF_ARRAY_NAMES;

/// Record kinds the scan engine knows about. Only the kinds with a
/// [`Payload`] variant are ever decoded; the rest are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    InstallationParameters,
    RuntimeParameters,
    Position,
    Height,
    NetworkAttitude,
    Attitude,
    Clock,
    SurfaceSoundSpeed,
    SoundVelocityProfile,
    Depth,
    RangeAngle,
    SeabedImage,
    WaterColumn,
    SwathPing,
    FileHeader,
    Comment,
    Unknown,
}

/// Structured contents of a retained datagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    InstallationParameters(InstallationParameters),
    RuntimeParameters(RuntimeParameters),
    Position(Position),
    Height(Height),
    NetworkAttitude(NetworkAttitude),
    SwathPing(SwathPing),
}

impl Payload {
    #[must_use]
    pub const fn as_installation(&self) -> Option<&InstallationParameters> {
        match self {
            Self::InstallationParameters(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_runtime(&self) -> Option<&RuntimeParameters> {
        match self {
            Self::RuntimeParameters(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_position(&self) -> Option<&Position> {
        match self {
            Self::Position(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_height(&self) -> Option<&Height> {
        match self {
            Self::Height(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_network_attitude(&self) -> Option<&NetworkAttitude> {
        match self {
            Self::NetworkAttitude(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_swath_ping(&self) -> Option<&SwathPing> {
        match self {
            Self::SwathPing(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationParameters {
    pub time: Option<DateTime<Utc>>,
    pub text: String,
    pub params: IndexMap<String, String>,
}

impl InstallationParameters {
    #[must_use]
    pub fn from_text(time: Option<DateTime<Utc>>, text: String) -> Self {
        let params = parse_parameter_text(&text);
        Self { time, text, params }
    }
}

/// Runtime (operator) settings in effect from `time` onwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeParameters {
    pub time: Option<DateTime<Utc>>,
    /// Canonical text form, used to detect changes between records.
    pub text: String,
    pub fields: IndexMap<String, Value>,
}

impl RuntimeParameters {
    /// Builds a record whose text is the JSON rendering of `fields`.
    #[must_use]
    pub fn from_fields(time: Option<DateTime<Utc>>, fields: IndexMap<String, Value>) -> Self {
        let text = serde_json::to_string(&fields).unwrap_or_default();
        Self { time, text, fields }
    }

    /// Builds a record from `KEY=VALUE` text.
    #[must_use]
    pub fn from_text(time: Option<DateTime<Utc>>, text: String) -> Self {
        let fields = parse_parameter_text(&text)
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Self { time, text, fields }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    /// Position system descriptor (`.all`) or sensor system (`.kmall`).
    pub descriptor: u16,
    /// Raw input telegram as received from the positioning system.
    pub input: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Height {
    pub time: Option<DateTime<Utc>>,
    /// Height in metres, when the record carries one.
    pub height: Option<f64>,
    /// Height type (`.all`) or sensor type (`.kmall`).
    pub height_type: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAttitude {
    pub time: Option<DateTime<Utc>>,
    pub system_descriptor: u8,
    /// Size of the first entry's raw input telegram.
    pub input_size: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwathPing {
    pub time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    pub height: Option<f64>,
    pub arrays: SubrecordSet,
}

/// Set of GSF swath sub-record ids present in a ping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubrecordSet(u64);

impl SubrecordSet {
    pub const fn insert(&mut self, id: u32) {
        if id > 0 && id < 64 {
            self.0 |= 1 << id;
        }
    }

    #[must_use]
    pub const fn contains(&self, id: u32) -> bool {
        id > 0 && id < 64 && self.0 & (1 << id) != 0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Names of the present arrays, in id order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        GSF_ARRAY_NAMES
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let id = u32::try_from(i + 1).ok()?;
                self.contains(id).then_some(*name)
            })
    }

    /// True when the array called `name` is present.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

/// Splits installation/runtime text into ordered `KEY=VALUE` pairs.
///
/// Entries are separated by commas or line breaks. An entry is split at
/// its first `=` or `:`, whichever comes first, so `POSI_1:X=0;U=ACTIVE`
/// yields key `POSI_1`. Entries without a separator are dropped.
#[must_use]
pub fn parse_parameter_text(text: &str) -> IndexMap<String, String> {
    text.split([',', '\n', '\r'])
        .filter_map(|entry| {
            let entry = entry.trim();
            let split = entry.find(['=', ':'])?;
            let key = entry[..split].trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), entry[split + 1..].trim().to_string()))
        })
        .collect()
}
