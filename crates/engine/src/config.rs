//! Engine configuration, loadable from YAML.

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for call selection. Every field has a default, so an empty
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of candidate hands a solver query may examine before
    /// answering `Unknown`.
    pub solver_budget: u64,
    /// Evaluate (rule, call) pairs on the rayon thread pool.
    pub parallel: bool,
    /// Leave out rules that only exist to interpret partner's calls.
    pub skip_planning_rules: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver_budget: 200_000,
            parallel: true,
            skip_planning_rules: true,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(EngineConfig::from_yaml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_yaml_str("solver_budget: 10\nparallel: false\n").unwrap();
        assert_eq!(config.solver_budget, 10);
        assert!(!config.parallel);
        assert!(config.skip_planning_rules);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        assert!(EngineConfig::from_yaml_str("solver_budget: lots").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(EngineConfig::load("/nonexistent/engine.yaml").is_err());
    }
}
