//! Simulation Configuration
//!
//! Loaded from a JSON file; every field has a default so partial files work.
//! CLI flags override whatever the file sets.

use crate::sim::ProposalTextLengths;
use crate::types::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Default seed when neither the file nor the CLI sets one
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound on proposals per run
pub const MAX_PROPOSALS: usize = 100_000;

/// App params: per-operation overrides keyed by app params key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppParams(BTreeMap<String, serde_json::Value>);

impl AppParams {
    /// Override for `key` as a weight, or `default` when unset
    pub fn weight(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|w| u32::try_from(w).ok())
                .ok_or_else(|| ConfigError::InvalidWeight {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
        }
    }

    pub fn set_weight(&mut self, key: impl Into<String>, weight: u32) {
        self.0.insert(key.into(), serde_json::Value::from(weight));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Main configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the run's random source
    pub seed: u64,

    /// Number of proposals to generate
    pub proposals: usize,

    /// Generated title length (1..=140)
    pub title_length: usize,

    /// Generated description length (1..=5000)
    pub description_length: usize,

    /// Weight overrides
    pub app_params: AppParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            proposals: 1,
            title_length: MAX_TITLE_LENGTH,
            description_length: MAX_DESCRIPTION_LENGTH,
            app_params: AppParams::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        let config: SimConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;

        info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Generated text must pass proposal validation, and the run must be bounded
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proposals > MAX_PROPOSALS {
            return Err(ConfigError::InvalidCount {
                value: self.proposals,
                max: MAX_PROPOSALS,
            });
        }
        check_length("title_length", self.title_length, MAX_TITLE_LENGTH)?;
        check_length("description_length", self.description_length, MAX_DESCRIPTION_LENGTH)?;
        Ok(())
    }

    pub fn text_lengths(&self) -> ProposalTextLengths {
        ProposalTextLengths {
            title: self.title_length,
            description: self.description_length,
        }
    }
}

fn check_length(field: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::InvalidLength { field, value, max });
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid {field}: {value} (must be 1..={max})")]
    InvalidLength {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("Too many proposals: {value} (at most {max})")]
    InvalidCount { value: usize, max: usize },

    #[error("Invalid weight for {key}: {value}")]
    InvalidWeight { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.text_lengths(), ProposalTextLengths::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"seed": 7, "app_params": {{"op_weight_submit_param_change_proposal": 12}}}}"#
        )
        .unwrap();

        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.proposals, 1);
        assert_eq!(config.title_length, MAX_TITLE_LENGTH);
        assert_eq!(
            config.app_params.weight("op_weight_submit_param_change_proposal", 5),
            Ok(12)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(SimConfig::load(&path), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(SimConfig::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_oversized_title() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title_length": 141}}"#).unwrap();
        assert_eq!(
            SimConfig::load(file.path()),
            Err(ConfigError::InvalidLength {
                field: "title_length",
                value: 141,
                max: MAX_TITLE_LENGTH,
            })
        );
    }

    #[test]
    fn test_proposal_count_is_capped() {
        let mut config = SimConfig {
            proposals: MAX_PROPOSALS,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());

        config.proposals = usize::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCount {
                value: usize::MAX,
                max: MAX_PROPOSALS,
            })
        );
    }

    #[test]
    fn test_weight_override_must_be_unsigned_int() {
        let params: AppParams = serde_json::from_str(r#"{"a": "heavy", "b": -1, "c": 3}"#).unwrap();

        assert!(matches!(params.weight("a", 1), Err(ConfigError::InvalidWeight { .. })));
        assert!(matches!(params.weight("b", 1), Err(ConfigError::InvalidWeight { .. })));
        assert_eq!(params.weight("c", 1), Ok(3));
        assert_eq!(params.weight("d", 1), Ok(1));
    }
}
