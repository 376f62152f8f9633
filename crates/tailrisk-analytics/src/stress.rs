//! Stress testing: the scenario catalog and sensitivity-based P&L.
//!
//! Stress P&L uses first-order sensitivities rather than a full
//! reprice: parallel rate shocks hit the portfolio DV01, credit spread
//! shocks the average spread duration. Shock fields with no defined
//! sensitivity mapping (steepeners, FX, vol, liquidity) are carried on
//! the scenario definition for downstream consumers but contribute no
//! P&L here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tailrisk_core::{RiskError, RiskResult};

/// Fraction of the stress loss taken as the VaR uplift estimate.
const DELTA_VAR_FACTOR: f64 = 0.8;

/// Identifier of a stress scenario.
///
/// The full regulatory catalog is enumerated; only a subset has shock
/// definitions in [`scenario_catalog`]. Requesting an undefined
/// scenario is an error, not a zero result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// +200 bps parallel shift
    #[serde(rename = "IR_01")]
    Ir01,
    /// -100 bps parallel shift
    #[serde(rename = "IR_02")]
    Ir02,
    /// Steepening: short +50, long +150
    #[serde(rename = "IR_03")]
    Ir03,
    /// Flattening: short +150, long +50
    #[serde(rename = "IR_04")]
    Ir04,
    /// Twist around the 5Y pivot (not yet defined)
    #[serde(rename = "IR_05")]
    Ir05,
    /// +100 bps all corporate spreads
    #[serde(rename = "CS_01")]
    Cs01,
    /// +200 bps high yield
    #[serde(rename = "CS_02")]
    Cs02,
    /// +50 bps investment grade
    #[serde(rename = "CS_03")]
    Cs03,
    /// +300 bps single-name top-5 (not yet defined)
    #[serde(rename = "CS_04")]
    Cs04,
    /// USD +10%
    #[serde(rename = "FX_01")]
    Fx01,
    /// USD -10%
    #[serde(rename = "FX_02")]
    Fx02,
    /// EUR/USD -15% (not yet defined)
    #[serde(rename = "FX_03")]
    Fx03,
    /// EM FX crisis -25% (not yet defined)
    #[serde(rename = "FX_04")]
    Fx04,
    /// Volatility x1.2
    #[serde(rename = "VOL_01")]
    Vol01,
    /// Volatility x1.4
    #[serde(rename = "VOL_02")]
    Vol02,
    /// Smile flattening (not yet defined)
    #[serde(rename = "VOL_03")]
    Vol03,
    /// Skew shift (not yet defined)
    #[serde(rename = "VOL_04")]
    Vol04,
    /// 2008 historical replay (not yet defined)
    #[serde(rename = "CRISIS_2008")]
    Crisis2008,
    /// 2020 historical replay (not yet defined)
    #[serde(rename = "CRISIS_2020")]
    Crisis2020,
    /// 2013 taper tantrum replay (not yet defined)
    #[serde(rename = "TAPER_2013")]
    Taper2013,
    /// Bid-ask spreads x3
    #[serde(rename = "LIQ_01")]
    Liq01,
    /// Market depth -50%
    #[serde(rename = "LIQ_02")]
    Liq02,
    /// Deposit run-off -20% (not yet defined)
    #[serde(rename = "LIQ_03")]
    Liq03,
    /// Simultaneous margin calls (not yet defined)
    #[serde(rename = "LIQ_04")]
    Liq04,
}

impl ScenarioId {
    /// Returns the catalog code.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Ir01 => "IR_01",
            ScenarioId::Ir02 => "IR_02",
            ScenarioId::Ir03 => "IR_03",
            ScenarioId::Ir04 => "IR_04",
            ScenarioId::Ir05 => "IR_05",
            ScenarioId::Cs01 => "CS_01",
            ScenarioId::Cs02 => "CS_02",
            ScenarioId::Cs03 => "CS_03",
            ScenarioId::Cs04 => "CS_04",
            ScenarioId::Fx01 => "FX_01",
            ScenarioId::Fx02 => "FX_02",
            ScenarioId::Fx03 => "FX_03",
            ScenarioId::Fx04 => "FX_04",
            ScenarioId::Vol01 => "VOL_01",
            ScenarioId::Vol02 => "VOL_02",
            ScenarioId::Vol03 => "VOL_03",
            ScenarioId::Vol04 => "VOL_04",
            ScenarioId::Crisis2008 => "CRISIS_2008",
            ScenarioId::Crisis2020 => "CRISIS_2020",
            ScenarioId::Taper2013 => "TAPER_2013",
            ScenarioId::Liq01 => "LIQ_01",
            ScenarioId::Liq02 => "LIQ_02",
            ScenarioId::Liq03 => "LIQ_03",
            ScenarioId::Liq04 => "LIQ_04",
        }
    }

    /// Returns the scenarios with shock definitions, in catalog order.
    #[must_use]
    pub fn defined() -> &'static [Self] {
        &[
            Self::Ir01,
            Self::Ir02,
            Self::Ir03,
            Self::Ir04,
            Self::Cs01,
            Self::Cs02,
            Self::Cs03,
            Self::Fx01,
            Self::Fx02,
            Self::Vol01,
            Self::Vol02,
            Self::Liq01,
            Self::Liq02,
        ]
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScenarioId {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IR_01" => Ok(ScenarioId::Ir01),
            "IR_02" => Ok(ScenarioId::Ir02),
            "IR_03" => Ok(ScenarioId::Ir03),
            "IR_04" => Ok(ScenarioId::Ir04),
            "IR_05" => Ok(ScenarioId::Ir05),
            "CS_01" => Ok(ScenarioId::Cs01),
            "CS_02" => Ok(ScenarioId::Cs02),
            "CS_03" => Ok(ScenarioId::Cs03),
            "CS_04" => Ok(ScenarioId::Cs04),
            "FX_01" => Ok(ScenarioId::Fx01),
            "FX_02" => Ok(ScenarioId::Fx02),
            "FX_03" => Ok(ScenarioId::Fx03),
            "FX_04" => Ok(ScenarioId::Fx04),
            "VOL_01" => Ok(ScenarioId::Vol01),
            "VOL_02" => Ok(ScenarioId::Vol02),
            "VOL_03" => Ok(ScenarioId::Vol03),
            "VOL_04" => Ok(ScenarioId::Vol04),
            "CRISIS_2008" => Ok(ScenarioId::Crisis2008),
            "CRISIS_2020" => Ok(ScenarioId::Crisis2020),
            "TAPER_2013" => Ok(ScenarioId::Taper2013),
            "LIQ_01" => Ok(ScenarioId::Liq01),
            "LIQ_02" => Ok(ScenarioId::Liq02),
            "LIQ_03" => Ok(ScenarioId::Liq03),
            "LIQ_04" => Ok(ScenarioId::Liq04),
            _ => Err(RiskError::unknown_scenario(s)),
        }
    }
}

/// Shock definition of a stress scenario.
///
/// Each field is `Some` only when the scenario moves that risk factor.
/// Definitions are static catalog entries, so they serialize but are
/// never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressScenario {
    /// Scenario identifier.
    pub id: ScenarioId,
    /// Human-readable description.
    pub description: &'static str,
    /// Parallel rate shift in basis points.
    pub ir_parallel_bps: Option<f64>,
    /// Short-end rate shift in basis points.
    pub ir_short_bps: Option<f64>,
    /// Long-end rate shift in basis points.
    pub ir_long_bps: Option<f64>,
    /// Spread shift on all corporates in basis points.
    pub credit_spread_bps: Option<f64>,
    /// Spread shift on high yield in basis points.
    pub credit_hy_bps: Option<f64>,
    /// Spread shift on investment grade in basis points.
    pub credit_ig_bps: Option<f64>,
    /// FX move in percent.
    pub fx_shock_pct: Option<f64>,
    /// Implied volatility multiplier.
    pub vol_multiplier: Option<f64>,
    /// Bid-ask spread multiplier.
    pub bid_ask_multiplier: Option<f64>,
    /// Market depth change in percent.
    pub market_depth_pct: Option<f64>,
}

impl StressScenario {
    const fn base(id: ScenarioId, description: &'static str) -> Self {
        StressScenario {
            id,
            description,
            ir_parallel_bps: None,
            ir_short_bps: None,
            ir_long_bps: None,
            credit_spread_bps: None,
            credit_hy_bps: None,
            credit_ig_bps: None,
            fx_shock_pct: None,
            vol_multiplier: None,
            bid_ask_multiplier: None,
            market_depth_pct: None,
        }
    }
}

/// Portfolio sensitivities consumed by the stress engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSensitivities {
    /// Total market value.
    pub total_market_value: f64,
    /// Total portfolio DV01.
    pub total_dv01: f64,
    /// Average spread duration.
    pub avg_spread_duration: f64,
}

/// A position's contribution to a stress loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressContributor {
    /// Position identifier.
    pub position_id: String,
    /// P&L contribution under the scenario.
    pub pnl: f64,
}

/// Outcome of one stress scenario.
///
/// The optional fields need a position-level reprice to fill and stay
/// `None` under the sensitivity-based engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Scenario identifier.
    pub scenario: ScenarioId,
    /// P&L impact (signed; losses negative).
    pub pnl_impact: f64,
    /// P&L as a percentage of market value.
    pub pnl_pct: f64,
    /// Estimated VaR uplift under the scenario.
    pub delta_var: f64,
    /// DV01 change; a full reprice would populate this.
    pub delta_dv01: f64,
    /// Duration change; a full reprice would populate this.
    pub delta_duration: f64,
    /// Change in the total K-factor requirement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_k_factors: Option<f64>,
    /// Change in the capital ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_capital_ratio: Option<f64>,
    /// Change in the liquidity coverage ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_lcr: Option<f64>,
    /// Largest position-level loss contributions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_contributors: Option<Vec<StressContributor>>,
}

/// Looks up the shock definition for a scenario.
///
/// # Errors
///
/// Returns `RiskError::UnknownScenario` for catalog codes without a
/// shock definition.
pub fn scenario_catalog(id: ScenarioId) -> RiskResult<StressScenario> {
    let scenario = match id {
        ScenarioId::Ir01 => StressScenario {
            ir_parallel_bps: Some(200.0),
            ..StressScenario::base(id, "Interest rate shock: +200 bps parallel")
        },
        ScenarioId::Ir02 => StressScenario {
            ir_parallel_bps: Some(-100.0),
            ..StressScenario::base(id, "Interest rate shock: -100 bps parallel")
        },
        ScenarioId::Ir03 => StressScenario {
            ir_short_bps: Some(50.0),
            ir_long_bps: Some(150.0),
            ..StressScenario::base(id, "Interest rate shock: steepening")
        },
        ScenarioId::Ir04 => StressScenario {
            ir_short_bps: Some(150.0),
            ir_long_bps: Some(50.0),
            ..StressScenario::base(id, "Interest rate shock: flattening")
        },
        ScenarioId::Cs01 => StressScenario {
            credit_spread_bps: Some(100.0),
            ..StressScenario::base(id, "Credit spread shock: +100 bps all corporates")
        },
        ScenarioId::Cs02 => StressScenario {
            credit_hy_bps: Some(200.0),
            ..StressScenario::base(id, "Credit spread shock: +200 bps high yield")
        },
        ScenarioId::Cs03 => StressScenario {
            credit_ig_bps: Some(50.0),
            ..StressScenario::base(id, "Credit spread shock: +50 bps investment grade")
        },
        ScenarioId::Fx01 => StressScenario {
            fx_shock_pct: Some(10.0),
            ..StressScenario::base(id, "FX shock: USD +10%")
        },
        ScenarioId::Fx02 => StressScenario {
            fx_shock_pct: Some(-10.0),
            ..StressScenario::base(id, "FX shock: USD -10%")
        },
        ScenarioId::Vol01 => StressScenario {
            vol_multiplier: Some(1.2),
            ..StressScenario::base(id, "Volatility shock: vol x1.2")
        },
        ScenarioId::Vol02 => StressScenario {
            vol_multiplier: Some(1.4),
            ..StressScenario::base(id, "Volatility shock: vol x1.4")
        },
        ScenarioId::Liq01 => StressScenario {
            bid_ask_multiplier: Some(3.0),
            ..StressScenario::base(id, "Liquidity stress: bid-ask x3")
        },
        ScenarioId::Liq02 => StressScenario {
            market_depth_pct: Some(-50.0),
            ..StressScenario::base(id, "Liquidity stress: market depth -50%")
        },
        other => return Err(RiskError::unknown_scenario(other.name())),
    };
    Ok(scenario)
}

/// P&L of a parallel rate shock against a DV01.
///
/// ## Formula
///
/// ```text
/// P&L = -DV01 × shock_bps / 100
/// ```
#[must_use]
pub fn ir_shock_pnl(dv01: f64, shock_bps: f64) -> f64 {
    -dv01 * (shock_bps / 100.0)
}

/// P&L of a credit spread shock against a spread duration.
///
/// ## Formula
///
/// ```text
/// P&L = -spread_duration × MV × shock_bps / 10000
/// ```
#[must_use]
pub fn credit_shock_pnl(spread_duration: f64, market_value: f64, shock_bps: f64) -> f64 {
    -spread_duration * market_value * (shock_bps / 10_000.0)
}

/// Runs one stress scenario against portfolio sensitivities.
///
/// Parallel rate and all-corporate spread shocks produce P&L; the other
/// shock fields have no sensitivity mapping and contribute nothing.
/// The VaR uplift is estimated as 80% of the absolute loss; DV01 and
/// duration deltas would need a full reprice and report zero.
///
/// # Errors
///
/// Returns `RiskError::UnknownScenario` for scenarios without a shock
/// definition.
pub fn run_stress_test(
    id: ScenarioId,
    sensitivities: &PortfolioSensitivities,
) -> RiskResult<StressResult> {
    let scenario = scenario_catalog(id)?;

    let mut pnl = 0.0;
    if let Some(bps) = scenario.ir_parallel_bps {
        pnl += ir_shock_pnl(sensitivities.total_dv01, bps);
    }
    if let Some(bps) = scenario.credit_spread_bps {
        pnl += credit_shock_pnl(
            sensitivities.avg_spread_duration,
            sensitivities.total_market_value,
            bps,
        );
    }

    let pnl_pct = if sensitivities.total_market_value > 0.0 {
        pnl / sensitivities.total_market_value * 100.0
    } else {
        0.0
    };

    log::debug!("stress {id}: pnl={pnl:.2} pct={pnl_pct:.4}");

    Ok(StressResult {
        scenario: id,
        pnl_impact: pnl,
        pnl_pct,
        delta_var: pnl.abs() * DELTA_VAR_FACTOR,
        delta_dv01: 0.0,
        delta_duration: 0.0,
        delta_k_factors: None,
        delta_capital_ratio: None,
        delta_lcr: None,
        top_contributors: None,
    })
}

/// Runs every defined scenario against the sensitivities.
///
/// # Errors
///
/// Propagates `RiskError::UnknownScenario` if a scenario in the defined
/// list has no catalog entry; a scenario must never drop out of the
/// results silently.
pub fn run_all_stress_tests(
    sensitivities: &PortfolioSensitivities,
) -> RiskResult<Vec<StressResult>> {
    ScenarioId::defined()
        .iter()
        .map(|id| run_stress_test(*id, sensitivities))
        .collect()
}
