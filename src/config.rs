//! Run configuration management.
//!
//! The pipeline consumes a raw key/value mapping (what a YAML or JSON config
//! file parses into) and validates it into a typed [`RunConfig`] before any
//! data is touched. Invalid configuration stops the run before dataset
//! validation begins.
//!
//! # Required keys
//!
//! | Key | Type | Constraint |
//! |-----|------|------------|
//! | `version` | string | non-empty, free-form provenance tag |
//! | `seed` | integer | >= 0 |
//! | `window` | integer | >= 1, rolling-window size |
//!
//! # Optional keys
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `threshold` | number | 0.0 (signal cutoff above the rolling mean) |
//! | `column` | string | `"close"` (signal column name) |
//!
//! # Example
//!
//! ```ignore
//! use signal_pipeline::config::RunConfig;
//!
//! let config = RunConfig::load_yaml("configs/run.yaml")?;
//! assert!(config.window >= 1);
//! ```

use crate::error::{ConfigError, PipelineError};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Default signal column when the config does not name one.
pub const DEFAULT_COLUMN: &str = "close";

/// Raw configuration mapping, as parsed from a config file.
pub type ConfigMap = Map<String, Value>;

/// Validated run configuration.
///
/// Construction goes through [`RunConfig::from_mapping`]; a `RunConfig` in
/// hand means every field already passed type and range checks.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    /// Free-form provenance tag, echoed into the metrics envelope.
    pub version: String,

    /// Seed for the run's deterministic random source. Applied exactly once
    /// at run start.
    pub seed: u64,

    /// Rolling-window size in rows.
    pub window: usize,

    /// Signal cutoff: a row is flagged when its value exceeds the rolling
    /// mean by more than this amount. Negative values loosen the cutoff and
    /// are accepted.
    pub threshold: f64,

    /// Name of the numeric column the rolling statistic is computed on.
    pub column: String,
}

impl RunConfig {
    /// Validate a raw configuration mapping.
    ///
    /// Pure validation: no side effects, no file access. Fails with a
    /// [`ConfigError`] naming the first offending key.
    pub fn from_mapping(mapping: &ConfigMap) -> Result<Self, ConfigError> {
        let version = require_string(mapping, "version")?;
        if version.is_empty() {
            return Err(ConfigError::OutOfRange {
                key: "version",
                detail: "must be non-empty".to_string(),
            });
        }

        let seed = require_integer(mapping, "seed")?;
        if seed < 0 {
            return Err(ConfigError::OutOfRange {
                key: "seed",
                detail: format!("must be >= 0, got {seed}"),
            });
        }

        let window = require_integer(mapping, "window")?;
        if window < 1 {
            return Err(ConfigError::OutOfRange {
                key: "window",
                detail: format!("must be >= 1, got {window}"),
            });
        }

        let threshold = match mapping.get("threshold") {
            None => 0.0,
            Some(value) => value.as_f64().ok_or(ConfigError::InvalidType {
                key: "threshold",
                expected: "number",
            })?,
        };

        let column = match mapping.get("column") {
            None => DEFAULT_COLUMN.to_string(),
            Some(value) => {
                let s = value.as_str().ok_or(ConfigError::InvalidType {
                    key: "column",
                    expected: "string",
                })?;
                if s.is_empty() {
                    return Err(ConfigError::OutOfRange {
                        key: "column",
                        detail: "must be non-empty".to_string(),
                    });
                }
                s.to_string()
            }
        };

        Ok(Self {
            version,
            seed: seed as u64,
            window: window as usize,
            threshold,
            column,
        })
    }

    /// Load and validate a configuration from a YAML file.
    pub fn load_yaml<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let mapping = load_mapping_yaml(path)?;
        Ok(Self::from_mapping(&mapping)?)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let mapping = load_mapping_json(path)?;
        Ok(Self::from_mapping(&mapping)?)
    }
}

/// Load a raw configuration mapping from a YAML file.
///
/// Returns the unvalidated mapping so the pipeline entry point can own the
/// validation step (and the error envelope on failure).
pub fn load_mapping_yaml<P: AsRef<Path>>(path: P) -> Result<ConfigMap, PipelineError> {
    let contents =
        fs::read_to_string(path.as_ref()).map_err(|e| PipelineError::Io(e.to_string()))?;
    let value: Value =
        serde_yaml::from_str(&contents).map_err(|e| PipelineError::Parse(e.to_string()))?;
    into_mapping(value)
}

/// Load a raw configuration mapping from a JSON file.
pub fn load_mapping_json<P: AsRef<Path>>(path: P) -> Result<ConfigMap, PipelineError> {
    let contents =
        fs::read_to_string(path.as_ref()).map_err(|e| PipelineError::Io(e.to_string()))?;
    let value: Value =
        serde_json::from_str(&contents).map_err(|e| PipelineError::Parse(e.to_string()))?;
    into_mapping(value)
}

// An empty YAML document parses to null, not to an empty mapping; both
// non-mapping cases fail the same way.
fn into_mapping(value: Value) -> Result<ConfigMap, PipelineError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::InvalidType {
            key: "<document>",
            expected: "mapping",
        }
        .into()),
    }
}

fn require_string(mapping: &ConfigMap, key: &'static str) -> Result<String, ConfigError> {
    let value = mapping.get(key).ok_or(ConfigError::MissingKey { key })?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ConfigError::InvalidType {
            key,
            expected: "string",
        })
}

fn require_integer(mapping: &ConfigMap, key: &'static str) -> Result<i64, ConfigError> {
    let value = mapping.get(key).ok_or(ConfigError::MissingKey { key })?;
    value.as_i64().ok_or(ConfigError::InvalidType {
        key,
        expected: "integer",
    })
}
