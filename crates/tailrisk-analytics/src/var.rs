//! Value at Risk: historical, stressed, and scaled estimates.
//!
//! The historical VaR is a plain empirical quantile of the P&L series -
//! the observation at index `floor((1 - confidence) × N)` of the
//! ascending sort, with no interpolation. Missing history is not an
//! error: short series use every available point, empty series yield
//! zero.

use serde::{Deserialize, Serialize};

/// Default lookback window in trading days (one year).
pub const DEFAULT_VAR_WINDOW: usize = 250;

/// Default stress window: the first 60 observations of the series,
/// positioned by the caller over a historical stress episode.
pub const DEFAULT_STRESS_WINDOW: (usize, usize) = (0, 60);

/// Fixed scaling from a 95% to a 99% one-day estimate.
///
/// This is a crude heuristic rather than a re-estimation from the 99th
/// percentile of the raw series; it stands in until a real tail
/// computation replaces it.
pub const SCALE_95_TO_99: f64 = 1.3;

/// VaR metrics, all expressed as positive loss magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VaRMetrics {
    /// 1-day 95% historical VaR.
    pub var_1d_95: f64,
    /// VaR over the configured historical stress window.
    pub stressed_var: f64,
    /// 10-day 99% VaR, scaled from the 1-day 95% estimate.
    pub var_10d_99: f64,
}

/// Calculates 1-day historical VaR at 95% confidence.
///
/// Takes the trailing `window` observations (or the whole series if it
/// is shorter), sorts ascending, and returns the absolute value of the
/// observation at index `floor(0.05 × N)`. This is a lower-tail
/// empirical quantile, not an interpolated percentile.
///
/// Returns 0.0 for an empty series.
#[must_use]
pub fn historical_var_1d_95(pnl_series: &[f64], window: usize) -> f64 {
    let data = if pnl_series.len() < window {
        pnl_series
    } else {
        &pnl_series[pnl_series.len() - window..]
    };

    empirical_tail_quantile(data, 0.95)
}

/// Calculates VaR over an explicit historical stress window
/// `[start_idx, end_idx)` of the series.
///
/// Indices beyond the series length are clamped; an empty window
/// returns 0.0.
#[must_use]
pub fn stressed_var(pnl_series: &[f64], start_idx: usize, end_idx: usize, confidence: f64) -> f64 {
    let end = end_idx.min(pnl_series.len());
    let start = start_idx.min(end);

    empirical_tail_quantile(&pnl_series[start..end], confidence)
}

/// Calculates 10-day 99% VaR by scaling the 1-day 95% estimate.
///
/// ## Formula
///
/// ```text
/// VaR_10d_99 ≈ VaR_1d_95 × 1.3 × √10
/// ```
///
/// The 1.3 factor approximates the 95%→99% confidence move and √10 is
/// the square-root-of-time rule. Both are modeling simplifications, not
/// a precise regulatory method.
#[must_use]
pub fn var_10d_99(pnl_series: &[f64]) -> f64 {
    let var_1d_99 = historical_var_1d_95(pnl_series, DEFAULT_VAR_WINDOW) * SCALE_95_TO_99;
    var_1d_99 * 10.0_f64.sqrt()
}

/// Calculates the full VaR metrics package with the default stress
/// window.
///
/// Returns the all-zero metrics for an empty series.
#[must_use]
pub fn calculate_var_metrics(pnl_series: &[f64]) -> VaRMetrics {
    let (stress_start, stress_end) = DEFAULT_STRESS_WINDOW;
    VaRMetrics {
        var_1d_95: historical_var_1d_95(pnl_series, DEFAULT_VAR_WINDOW),
        stressed_var: stressed_var(pnl_series, stress_start, stress_end, 0.95),
        var_10d_99: var_10d_99(pnl_series),
    }
}

/// The observation at the `(1 - confidence)` empirical quantile of the
/// ascending sort, as a positive magnitude.
fn empirical_tail_quantile(data: &[f64], confidence: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let index = ((1.0 - confidence) * sorted.len() as f64) as usize;
    sorted[index.min(sorted.len() - 1)].abs()
}
