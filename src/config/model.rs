use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Contents of a `.sonar-qa.toml` file.
///
/// ```toml
/// [output]
/// pretty = true
///
/// [progress]
/// enabled = false
///
/// [params."d762fd79-75bc-4aff-a9d2-e0c36e744e17"]
/// threshold = 50
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    /// Default parameter overrides, keyed by check id then parameter name.
    #[serde(default)]
    pub params: IndexMap<String, IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print QA JSON documents (default: true).
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    /// Show a progress bar on stderr while checks run (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
