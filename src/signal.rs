//! Rolling statistic and signal derivation.
//!
//! The signal engine turns one validated numeric series into a boolean
//! signal series of identical length, in two steps:
//!
//! 1. **Rolling mean**: for row i (0-based), the arithmetic mean over rows
//!    `[i - window + 1, i]` once `i >= window - 1`. Earlier rows have no
//!    defined statistic.
//! 2. **Signal**: row i is flagged iff its value exceeds the rolling mean at
//!    i by more than the threshold.
//!
//! # Boundary policy
//!
//! Rows whose window has not filled yield `false`, never an error, so the
//! output length equals the input length and `rows_processed` stays
//! meaningful. This policy is explicit and tested; it is a common source of
//! silent divergence between rolling-window implementations.
//!
//! # No look-ahead
//!
//! The mean at i uses only rows <= i. Mutating any row j > i must not change
//! the signal at i. This is the core correctness invariant separating a
//! valid point-in-time signal from one leaking future data.
//!
//! Both functions are pure: no randomness, no state, fully determined by
//! their inputs.

/// Rolling mean over a trailing window.
///
/// Returns one entry per input value: `None` while the window has not
/// filled (`i < window - 1`), `Some(mean)` after. A running sum keeps the
/// pass O(n) instead of O(n * window).
///
/// `window` must be >= 1; config validation guarantees this upstream.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    debug_assert!(window >= 1, "window must be >= 1");

    let mut means = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }

        if i + 1 >= window {
            means.push(Some(sum / window as f64));
        } else {
            means.push(None);
        }
    }

    means
}

/// Derive the binary signal series from a numeric series.
///
/// Signal at i is `true` iff `values[i] > mean(i) + threshold`, where
/// `mean(i)` is the trailing rolling mean. Rows with an unfilled window are
/// `false` by policy. Output length always equals input length.
pub fn compute_signals(values: &[f64], window: usize, threshold: f64) -> Vec<bool> {
    rolling_mean(values, window)
        .into_iter()
        .zip(values)
        .map(|(mean, &value)| match mean {
            Some(mean) => value > mean + threshold,
            None => false,
        })
        .collect()
}
