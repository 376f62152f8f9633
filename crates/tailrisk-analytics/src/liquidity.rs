//! Liquidity risk: coverage ratio, liquidation costs, funding gaps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ZERO_DENOMINATOR_SENTINEL;

/// Bid-ask spread assumed when a position carries none, in basis points.
pub const DEFAULT_SPREAD_BPS: f64 = 10.0;

/// Liquidity score assumed when a position carries none.
pub const DEFAULT_LIQUIDITY_SCORE: f64 = 0.5;

/// Cost multiplier for a forced one-day liquidation.
pub const URGENCY_1D: f64 = 1.5;

/// Cost multiplier for an orderly five-day liquidation.
pub const URGENCY_5D: f64 = 1.0;

/// Maturity bucket labels that count as short-term for the funding gap.
const SHORT_TERM_BUCKETS: [&str; 2] = ["0-7d", "7-30d"];

/// A position's liquidity attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    /// Position identifier.
    pub position_id: String,
    /// Market value.
    pub market_value: f64,
    /// Bid-ask spread in basis points, if observed.
    pub bid_ask_spread_bps: Option<f64>,
    /// Liquidity score in `[0, 1]` (1 = perfectly liquid), if assessed.
    pub liquidity_score: Option<f64>,
}

/// Portfolio liquidity metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    /// Liquidity coverage ratio: HQLA over net outflows.
    pub lcr: f64,
    /// Cost of a forced one-day liquidation.
    pub liquidation_cost_1d: f64,
    /// Cost of an orderly five-day liquidation.
    pub liquidation_cost_5d: f64,
    /// Market-value-weighted average liquidity score.
    pub weighted_liquidity_score: f64,
    /// Funding gap (assets minus liabilities) per maturity bucket.
    pub funding_gaps: BTreeMap<String, f64>,
    /// Gap over the 0-7d and 7-30d buckets combined.
    pub short_term_gap: f64,
}

/// Liquidity coverage ratio.
///
/// ## Formula
///
/// ```text
/// LCR = HQLA / net_outflows_30d
/// ```
///
/// Zero outflows mean no liquidity demand; the sentinel stands in for
/// an unbounded ratio.
#[must_use]
pub fn liquidity_coverage_ratio(hqla: f64, net_outflows_30d: f64) -> f64 {
    if net_outflows_30d == 0.0 {
        return ZERO_DENOMINATOR_SENTINEL;
    }
    hqla / net_outflows_30d
}

/// Estimated cost of liquidating the positions over the given horizon.
///
/// Each position contributes `mv × (spread_bps / 10_000) × urgency`,
/// with urgency 1.5 for a one-day fire sale and 1.0 for an orderly
/// five-day unwind.
#[must_use]
pub fn liquidation_cost(positions: &[LiquidityPosition], urgency: f64) -> f64 {
    positions
        .iter()
        .map(|p| {
            let spread = p.bid_ask_spread_bps.unwrap_or(DEFAULT_SPREAD_BPS);
            p.market_value * (spread / 10_000.0) * urgency
        })
        .sum()
}

/// Market-value-weighted average liquidity score.
///
/// Positions without a score contribute the default 0.5. An empty
/// portfolio is trivially liquid and scores 1.0.
#[must_use]
pub fn weighted_liquidity_score(positions: &[LiquidityPosition]) -> f64 {
    let total_mv: f64 = positions.iter().map(|p| p.market_value).sum();
    if positions.is_empty() || total_mv == 0.0 {
        return 1.0;
    }

    positions
        .iter()
        .map(|p| p.market_value * p.liquidity_score.unwrap_or(DEFAULT_LIQUIDITY_SCORE))
        .sum::<f64>()
        / total_mv
}

/// Funding gap (assets minus liabilities) per maturity bucket.
///
/// The result covers the union of bucket keys; a bucket present on only
/// one side treats the other side as zero.
#[must_use]
pub fn funding_gaps(
    assets_by_bucket: &BTreeMap<String, f64>,
    liabilities_by_bucket: &BTreeMap<String, f64>,
) -> BTreeMap<String, f64> {
    let mut gaps = BTreeMap::new();
    for bucket in assets_by_bucket.keys().chain(liabilities_by_bucket.keys()) {
        gaps.entry(bucket.clone()).or_insert_with(|| {
            assets_by_bucket.get(bucket).copied().unwrap_or(0.0)
                - liabilities_by_bucket.get(bucket).copied().unwrap_or(0.0)
        });
    }
    gaps
}

/// Calculates the full liquidity metrics package.
#[must_use]
pub fn calculate_liquidity_metrics(
    positions: &[LiquidityPosition],
    hqla: f64,
    net_outflows_30d: f64,
    assets_by_bucket: &BTreeMap<String, f64>,
    liabilities_by_bucket: &BTreeMap<String, f64>,
) -> LiquidityMetrics {
    let gaps = funding_gaps(assets_by_bucket, liabilities_by_bucket);
    let short_term_gap = SHORT_TERM_BUCKETS
        .iter()
        .map(|b| gaps.get(*b).copied().unwrap_or(0.0))
        .sum();

    LiquidityMetrics {
        lcr: liquidity_coverage_ratio(hqla, net_outflows_30d),
        liquidation_cost_1d: liquidation_cost(positions, URGENCY_1D),
        liquidation_cost_5d: liquidation_cost(positions, URGENCY_5D),
        weighted_liquidity_score: weighted_liquidity_score(positions),
        funding_gaps: gaps,
        short_term_gap,
    }
}
