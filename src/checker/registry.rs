use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use super::{Check, CheckParams, builtin_checks};
use crate::error::{QaError, Result};
use crate::qajson::QajsonParam;

/// Checks known to the runner, keyed by `(id, version)`.
///
/// Parameter overrides from configuration replace a check's built-in
/// defaults; request parameters still win over both.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
    overrides: IndexMap<Uuid, Vec<QajsonParam>>,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new(builtin_checks())
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.checks.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("overrides", &self.overrides)
            .finish()
    }
}

impl CheckRegistry {
    #[must_use]
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self {
            checks,
            overrides: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Adds `check`, replacing any registered check with the same id and
    /// version.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks
            .retain(|existing| existing.id() != check.id() || existing.version() != check.version());
        self.checks.push(check);
    }

    /// Applies configured parameter overrides, keyed by check id.
    ///
    /// # Errors
    /// Returns [`QaError::Config`] if a key is not a UUID.
    pub fn with_param_overrides(mut self, overrides: &IndexMap<String, IndexMap<String, Value>>) -> Result<Self> {
        for (key, params) in overrides {
            let id = Uuid::parse_str(key)
                .map_err(|e| QaError::Config(format!("Invalid check id '{key}' in [params]: {e}")))?;
            let params = params
                .iter()
                .map(|(name, value)| QajsonParam::new(name.clone(), value.clone()))
                .collect();
            self.overrides.insert(id, params);
        }
        Ok(self)
    }

    /// Looks up a check by its textual id and version.
    #[must_use]
    pub fn get(&self, id: &str, version: &str) -> Option<&dyn Check> {
        let id = Uuid::parse_str(id).ok()?;
        self.checks
            .iter()
            .find(|check| check.id() == id && check.version() == version)
            .map(|check| &**check)
    }

    #[must_use]
    pub fn is_supported(&self, id: &str, version: &str) -> bool {
        self.get(id, version).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|check| &**check)
    }

    /// The check's built-in defaults with any configured overrides applied.
    #[must_use]
    pub fn default_params(&self, check: &dyn Check) -> Vec<QajsonParam> {
        let mut params = check.default_params();
        if let Some(overrides) = self.overrides.get(&check.id()) {
            for param in overrides {
                match params.iter_mut().find(|p| p.name == param.name) {
                    Some(existing) => existing.value = param.value.clone(),
                    None => params.push(param.clone()),
                }
            }
        }
        params
    }

    /// Parameters for one execution of `check` with the request's `requested`.
    #[must_use]
    pub fn params_for(&self, check: &dyn Check, requested: &[QajsonParam]) -> CheckParams {
        CheckParams::resolve(&self.default_params(check), requested)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
