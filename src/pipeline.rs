//! Pipeline orchestration.
//!
//! One run, start to finish, in a single control flow:
//!
//! ```text
//! ConfigMap ──▶ RunConfig ──▶ seed RNG ──▶ ValidatedDataset
//!                  │              (once)        │
//!                  ▼                            ▼
//!            error envelope ◀── any failure ── signals ──▶ signal_rate
//!                                                              │
//!                                                              ▼
//!                                                      success envelope
//! ```
//!
//! [`run`] never returns an error: every failure is caught here and becomes
//! an error-status [`Metrics`] envelope, so downstream tooling always
//! receives a well-formed report. The first failure is terminal for the run;
//! validation failures are deterministic given the same inputs, so there are
//! no retries.
//!
//! Wall-clock latency is measured from the start of config validation to
//! envelope construction, inclusive of the error path.

use crate::config::{ConfigMap, RunConfig};
use crate::dataset::RawDataset;
use crate::error::PipelineError;
use crate::metrics::{signal_rate, Metrics};
use crate::signal::compute_signals;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Provenance established as a run progresses, carried into the error
/// envelope so known fields are reported and unknown ones omitted.
#[derive(Debug, Default)]
struct RunProvenance {
    version: Option<String>,
    seed: Option<u64>,
    rows_processed: Option<usize>,
}

/// Execute one pipeline run.
///
/// The dataset and configuration are owned by this call for its duration
/// and released at the end. Deterministic: identical inputs yield identical
/// `value`, `rows_processed`, and `status` (latency may differ).
pub fn run(raw_config: &ConfigMap, dataset: RawDataset) -> Metrics {
    let started = Instant::now();
    let mut provenance = RunProvenance::default();

    let outcome = execute(raw_config, &dataset, &mut provenance);
    let latency_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(value) => {
            log::info!(
                "run complete: signal_rate={:.4} rows={} latency_ms={}",
                value,
                provenance.rows_processed.unwrap_or(0),
                latency_ms
            );
            Metrics::success(
                provenance.version.unwrap_or_default(),
                provenance.seed.unwrap_or_default(),
                provenance.rows_processed.unwrap_or_default(),
                value,
                latency_ms,
            )
        }
        Err(error) => {
            log::error!("run failed: {error}");
            Metrics::failure(
                &error,
                provenance.version,
                provenance.seed,
                provenance.rows_processed,
                latency_ms,
            )
        }
    }
}

/// The fallible stage sequence. Provenance is recorded as each stage
/// completes so the caller can build a best-effort error envelope.
fn execute(
    raw_config: &ConfigMap,
    dataset: &RawDataset,
    provenance: &mut RunProvenance,
) -> Result<f64, PipelineError> {
    let config = RunConfig::from_mapping(raw_config)?;
    provenance.version = Some(config.version.clone());
    provenance.seed = Some(config.seed);
    log::info!(
        "config validated: version={} seed={} window={} threshold={} column={}",
        config.version,
        config.seed,
        config.window,
        config.threshold,
        config.column
    );

    // Seeded exactly once, before any computation. The current stages are
    // pure, so nothing draws from it yet; any stochastic stage added to this
    // sequence must take its randomness from here and nowhere else.
    let _rng = ChaCha8Rng::seed_from_u64(config.seed);

    let validated = dataset.validate(&config)?;
    provenance.rows_processed = Some(validated.row_count());
    log::info!("dataset validated: {} rows", validated.row_count());

    let signals = compute_signals(validated.values(), config.window, config.threshold);
    log::info!(
        "signals computed: {} flagged of {}",
        signals.iter().filter(|&&s| s).count(),
        signals.len()
    );

    Ok(signal_rate(&signals)?)
}
