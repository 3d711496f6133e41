//! Signal Pipeline
//!
//! Batch pipeline that computes a rolling-mean trading signal over one
//! tabular time-series dataset and emits a structured metrics report.
//!
//! # Overview
//!
//! One input table and one configuration mapping in, one metrics envelope
//! out, deterministic given a seed. The run is single-threaded and
//! synchronous: it proceeds to completion or to the first failure, and every
//! failure becomes an error-status envelope rather than a crash.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      Signal Pipeline                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  config/    - mapping validation, YAML/JSON loading        │
//! │  dataset/   - tabular validation, numeric coercion         │
//! │  signal/    - rolling mean + binary signal derivation      │
//! │  metrics/   - signal-rate aggregation, result envelope     │
//! │  pipeline/  - orchestration, seeding, timing, error path   │
//! │  loader/    - CSV ingestion (collaborator)                 │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use signal_pipeline::prelude::*;
//!
//! let mapping = load_mapping_yaml("run.yaml")?;
//! let dataset = load_csv("prices.csv")?;
//!
//! let metrics = run(&mapping, dataset);
//! println!("{}", metrics.to_json_pretty()?);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod prelude;
pub mod signal;

// Re-exports - Config
pub use config::{load_mapping_json, load_mapping_yaml, ConfigMap, RunConfig, DEFAULT_COLUMN};

// Re-exports - Dataset
pub use dataset::{RawDataset, ValidatedDataset};
pub use loader::load_csv;

// Re-exports - Signal
pub use signal::{compute_signals, rolling_mean};

// Re-exports - Metrics
pub use metrics::{signal_rate, Metrics, RunStatus, METRIC_NAME};

// Re-exports - Errors
pub use error::{AggregationError, ConfigError, DataError, PipelineError};

// Re-exports - Pipeline
pub use pipeline::run;
