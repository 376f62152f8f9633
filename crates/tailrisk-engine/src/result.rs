//! The assembled portfolio risk snapshot.

use serde::{Deserialize, Serialize};

use tailrisk_analytics::bonds::PortfolioBondMetrics;
use tailrisk_analytics::capital::CapitalMetrics;
use tailrisk_analytics::ccr::CcrMetrics;
use tailrisk_analytics::credit::CreditMetrics;
use tailrisk_analytics::liquidity::LiquidityMetrics;
use tailrisk_analytics::var::VaRMetrics;
use tailrisk_core::types::Date;

/// Complete risk snapshot for one portfolio on one valuation date.
///
/// Each metrics group is `Some` only if its module ran; `None` means
/// the required inputs were absent. Optional groups are skipped during
/// serialization so downstream consumers see only what was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRiskResult {
    /// Portfolio identifier.
    pub portfolio_id: i64,
    /// Valuation date.
    pub as_of: Date,
    /// Version of the engine that produced this snapshot.
    pub engine_version: String,
    /// Bond analytics, if bond positions were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond_metrics: Option<PortfolioBondMetrics>,
    /// VaR metrics, if P&L history was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_metrics: Option<VaRMetrics>,
    /// Credit metrics, if credit exposures were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_metrics: Option<CreditMetrics>,
    /// Counterparty risk metrics, if derivatives were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccr_metrics: Option<CcrMetrics>,
    /// Liquidity metrics, if liquidity positions were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity_metrics: Option<LiquidityMetrics>,
    /// Capital metrics, if VaR ran or capital scalars were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_metrics: Option<CapitalMetrics>,
    /// Total CVA across counterparties, if CCR ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cva_total: Option<f64>,
    /// Wall-clock time of the calculation in seconds.
    pub calculation_time_seconds: f64,
}
