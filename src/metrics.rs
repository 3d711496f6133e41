//! Metric aggregation and the result envelope.
//!
//! [`signal_rate`] reduces a signal series to the one scalar the pipeline
//! reports. [`Metrics`] is the structured report a run always produces,
//! success or error, serialized to the output artifact and to stdout.
//!
//! # Envelope shape
//!
//! ```json
//! {
//!   "version": "v1.0",
//!   "rows_processed": 5,
//!   "metric": "signal_rate",
//!   "value": 0.6,
//!   "latency_ms": 3,
//!   "seed": 42,
//!   "status": "success"
//! }
//! ```
//!
//! On error, `error_kind` and `error_message` are added, and fields not yet
//! known at failure time are omitted from the JSON rather than fabricated.

use crate::error::{AggregationError, PipelineError};
use serde::{Deserialize, Serialize};

/// The one metric this pipeline reports.
pub const METRIC_NAME: &str = "signal_rate";

/// Fraction of flagged rows over all rows, in [0, 1].
///
/// No rounding is applied here; rounding for display happens at the envelope
/// boundary. Fails on an empty series, which a validated dataset makes
/// unreachable.
pub fn signal_rate(signals: &[bool]) -> Result<f64, AggregationError> {
    if signals.is_empty() {
        return Err(AggregationError::EmptySeries);
    }

    let flagged = signals.iter().filter(|&&s| s).count();
    Ok(flagged as f64 / signals.len() as f64)
}

/// Run status carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// The result envelope for one pipeline run.
///
/// Constructed once at the end of a run and immutable thereafter. Optional
/// fields hold best-effort provenance on the error path: `version` and
/// `seed` are known once config validation passed, `rows_processed` once
/// dataset validation passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_processed: Option<usize>,

    /// Always [`METRIC_NAME`].
    pub metric: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Wall-clock milliseconds from the start of config validation to
    /// envelope construction, on both paths.
    pub latency_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub status: RunStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Metrics {
    /// Build a success envelope. The value is rounded to four decimals here,
    /// at the presentation boundary.
    pub fn success(
        version: String,
        seed: u64,
        rows_processed: usize,
        value: f64,
        latency_ms: u64,
    ) -> Self {
        Self {
            version: Some(version),
            rows_processed: Some(rows_processed),
            metric: METRIC_NAME.to_string(),
            value: Some(round4(value)),
            latency_ms,
            seed: Some(seed),
            status: RunStatus::Success,
            error_kind: None,
            error_message: None,
        }
    }

    /// Build an error envelope from a pipeline failure, carrying whatever
    /// provenance was already established before the failure.
    pub fn failure(
        error: &PipelineError,
        version: Option<String>,
        seed: Option<u64>,
        rows_processed: Option<usize>,
        latency_ms: u64,
    ) -> Self {
        Self {
            version,
            rows_processed,
            metric: METRIC_NAME.to_string(),
            value: None,
            latency_ms,
            seed,
            status: RunStatus::Error,
            error_kind: Some(error.kind().to_string()),
            error_message: Some(error.to_string()),
        }
    }

    /// Whether this envelope reports a successful run.
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Serialize the envelope as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
