//! IFR K-factor capital requirements.
//!
//! Implements the investment-firm K-factor aggregation for the factors
//! this engine can observe: net position risk from VaR (K-NPR), assets
//! under management (K-AUM), client money held (K-CMH), and client
//! orders handled (K-COH). Factors with no input contribute zero.

use serde::{Deserialize, Serialize};

use crate::ZERO_DENOMINATOR_SENTINEL;

/// K-AUM coefficient: 0.02% of assets under management.
pub const K_AUM_FACTOR: f64 = 0.0002;

/// K-CMH coefficient: 0.4% of client money held.
pub const K_CMH_FACTOR: f64 = 0.004;

/// K-COH coefficient: 0.1% of client orders handled.
pub const K_COH_FACTOR: f64 = 0.001;

/// Default VaR multiplier before backtesting adjustments.
pub const DEFAULT_VAR_MULTIPLIER: f64 = 3.0;

/// K-factor capital requirement breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalMetrics {
    /// Net position risk requirement: VaR times the multiplier.
    pub k_npr: f64,
    /// Assets-under-management requirement.
    pub k_aum: f64,
    /// Client-money-held requirement.
    pub k_cmh: f64,
    /// Client-orders-handled requirement.
    pub k_coh: f64,
    /// Sum of the K-factor requirements.
    pub total_requirement: f64,
    /// Own funds available against the requirement.
    pub own_funds: f64,
    /// Own funds over the total requirement.
    pub capital_ratio: f64,
}

/// Scalar capital inputs alongside the VaR figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalInputs {
    /// Assets under management.
    pub aum: f64,
    /// Client money held.
    pub cmh: f64,
    /// Client orders handled (daily flow).
    pub coh: f64,
    /// Own funds available against the requirement.
    pub own_funds: f64,
}

/// VaR multiplier from the trailing-year backtesting exception count.
///
/// The traffic-light schedule: up to 4 exceptions keeps the base 3.0
/// multiplier, the yellow zone ramps it up, 15 or more exceptions pins
/// it at 4.0.
#[must_use]
pub fn backtesting_multiplier(exceptions_250d: u32) -> f64 {
    match exceptions_250d {
        0..=4 => 3.0,
        5 => 3.4,
        6..=7 => 3.6,
        8..=9 => 3.8,
        10..=14 => 3.85,
        _ => 4.0,
    }
}

/// Calculates the K-factor capital requirements.
///
/// ## Formula
///
/// ```text
/// K-NPR = VaR_1d_95 × multiplier
/// K-AUM = AUM × 0.02%
/// K-CMH = CMH × 0.4%
/// K-COH = COH × 0.1%
/// ratio = own_funds / Σ K
/// ```
///
/// A zero total requirement yields the sentinel ratio rather than a
/// division by zero.
#[must_use]
pub fn calculate_capital_metrics(
    var_1d_95: f64,
    var_multiplier: f64,
    inputs: &CapitalInputs,
) -> CapitalMetrics {
    let k_npr = var_1d_95 * var_multiplier;
    let k_aum = inputs.aum * K_AUM_FACTOR;
    let k_cmh = inputs.cmh * K_CMH_FACTOR;
    let k_coh = inputs.coh * K_COH_FACTOR;
    let total_requirement = k_npr + k_aum + k_cmh + k_coh;

    let capital_ratio = if total_requirement > 0.0 {
        inputs.own_funds / total_requirement
    } else {
        ZERO_DENOMINATOR_SENTINEL
    };

    CapitalMetrics {
        k_npr,
        k_aum,
        k_cmh,
        k_coh,
        total_requirement,
        own_funds: inputs.own_funds,
        capital_ratio,
    }
}
