//! Input bundle for a portfolio risk calculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tailrisk_analytics::capital::{CapitalInputs, DEFAULT_VAR_MULTIPLIER};
use tailrisk_analytics::credit::CreditExposure;
use tailrisk_analytics::liquidity::LiquidityPosition;
use tailrisk_core::types::{BondPosition, Date, DerivativePosition, Rating};

/// Everything the engine needs to calculate one portfolio's risks.
///
/// Collections left empty and scalars left at zero mean "no data"; the
/// corresponding metrics groups are omitted from the result rather
/// than computed as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    /// Portfolio identifier.
    pub portfolio_id: i64,
    /// Valuation date.
    pub as_of: Date,
    /// Bond positions.
    pub bonds: Vec<BondPosition>,
    /// Derivative positions; grouped into counterparty netting sets by
    /// the CCR module.
    pub derivatives: Vec<DerivativePosition>,
    /// Daily P&L history, chronological, most recent last.
    pub pnl_history: Vec<f64>,
    /// Credit exposures with resolved rating and seniority.
    pub credit_exposures: Vec<CreditExposure>,
    /// External counterparty ratings; unrated counterparties fall back
    /// to the CCR default.
    pub counterparty_ratings: BTreeMap<i64, Rating>,
    /// Positions with liquidity attributes.
    pub liquidity_positions: Vec<LiquidityPosition>,
    /// High quality liquid assets.
    pub hqla: f64,
    /// Net cash outflows over 30 days.
    pub net_cash_outflows_30d: f64,
    /// Assets by maturity bucket.
    pub assets_by_bucket: BTreeMap<String, f64>,
    /// Liabilities by maturity bucket.
    pub liabilities_by_bucket: BTreeMap<String, f64>,
    /// Scalar capital inputs (AUM, client money, client orders, own
    /// funds).
    pub capital: CapitalInputs,
    /// VaR multiplier for K-NPR; callers feed the backtesting policy
    /// output here.
    pub var_multiplier: f64,
    /// Wrong-way-risk alpha applied to counterparty EAD.
    pub wwr_alpha: f64,
}

impl RiskInputs {
    /// Creates an empty input bundle for the portfolio and date.
    #[must_use]
    pub fn new(portfolio_id: i64, as_of: Date) -> Self {
        RiskInputs {
            portfolio_id,
            as_of,
            bonds: Vec::new(),
            derivatives: Vec::new(),
            pnl_history: Vec::new(),
            credit_exposures: Vec::new(),
            counterparty_ratings: BTreeMap::new(),
            liquidity_positions: Vec::new(),
            hqla: 0.0,
            net_cash_outflows_30d: 0.0,
            assets_by_bucket: BTreeMap::new(),
            liabilities_by_bucket: BTreeMap::new(),
            capital: CapitalInputs::default(),
            var_multiplier: DEFAULT_VAR_MULTIPLIER,
            wwr_alpha: 1.0,
        }
    }

    /// True when any scalar capital input is supplied.
    #[must_use]
    pub fn has_capital_inputs(&self) -> bool {
        self.capital.aum != 0.0
            || self.capital.cmh != 0.0
            || self.capital.coh != 0.0
            || self.capital.own_funds != 0.0
    }
}
