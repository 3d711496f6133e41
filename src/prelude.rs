//! Prelude module for convenient imports.
//!
//! ```ignore
//! use signal_pipeline::prelude::*;
//!
//! let mapping = load_mapping_yaml("run.yaml")?;
//! let dataset = load_csv("prices.csv")?;
//! let metrics = run(&mapping, dataset);
//! ```

pub use crate::config::{load_mapping_json, load_mapping_yaml, ConfigMap, RunConfig};
pub use crate::dataset::{RawDataset, ValidatedDataset};
pub use crate::error::{AggregationError, ConfigError, DataError, PipelineError};
pub use crate::loader::load_csv;
pub use crate::metrics::{signal_rate, Metrics, RunStatus, METRIC_NAME};
pub use crate::pipeline::run;
pub use crate::signal::{compute_signals, rolling_mean};
