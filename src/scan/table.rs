use crate::decoder::RecordKind;

/// How a datagram type contributes to ping accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingCounting {
    /// Not ping-bearing.
    None,
    /// One ping per forward step of the record's sequence counter.
    Sequence,
    /// Every record is one ping; the format carries no counter.
    EveryRecord,
}

/// Which occurrences of a type keep their decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    Discard,
    All,
    FirstOnly,
}

/// Dispatch entry for one datagram type of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    pub id: &'static str,
    pub kind: RecordKind,
    pub ping: PingCounting,
    pub retention: Retention,
}

impl TypeEntry {
    /// Entry for a type that is counted and nothing else.
    pub const fn counted(id: &'static str, kind: RecordKind) -> Self {
        Self {
            id,
            kind,
            ping: PingCounting::None,
            retention: Retention::Discard,
        }
    }

    pub const fn retained(id: &'static str, kind: RecordKind, retention: Retention) -> Self {
        Self {
            id,
            kind,
            ping: PingCounting::None,
            retention,
        }
    }

    pub const fn ping(id: &'static str, kind: RecordKind, ping: PingCounting) -> Self {
        Self {
            id,
            kind,
            ping,
            retention: Retention::Discard,
        }
    }

    #[must_use]
    pub const fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    #[must_use]
    pub const fn is_ping_bearing(&self) -> bool {
        !matches!(self.ping, PingCounting::None)
    }
}

const UNKNOWN: TypeEntry = TypeEntry::counted("", RecordKind::Unknown);

/// Looks up `id` in `table`; ids not in the table are counted only.
#[must_use]
pub fn lookup(table: &'static [TypeEntry], id: &str) -> &'static TypeEntry {
    table.iter().find(|entry| entry.id == id).unwrap_or(&UNKNOWN)
}
