use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Verdict of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    Pass,
    Fail,
    Warning,
}

impl ScanState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a completed scan: a verdict, diagnostics in
/// order, and optional structured evidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub state: ScanState,
    pub messages: Vec<String>,
    pub data: Option<Value>,
}

impl ScanResult {
    #[must_use]
    pub const fn new(state: ScanState) -> Self {
        Self {
            state,
            messages: Vec::new(),
            data: None,
        }
    }

    #[must_use]
    pub const fn pass() -> Self {
        Self::new(ScanState::Pass)
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(ScanState::Fail).with_message(message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ScanState::Warning).with_message(message)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = String>) -> Self {
        self.messages.extend(messages);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}
