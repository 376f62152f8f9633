//! Bond risk analytics: duration, convexity, DV01, accrued interest,
//! and portfolio-level aggregation.
//!
//! All present values use flat annual compounding at the bond's yield to
//! maturity: `DF(t) = (1 + y)^-t`. This is the same simplification the
//! golden fixtures were calibrated against; no curve discounting is
//! performed here.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use tailrisk_core::types::{BondPosition, Cashflow, Date};
use tailrisk_core::RiskResult;

use crate::cashflows::generate_cashflows;

/// Risk metrics for a single bond position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondMetrics {
    /// Position identifier (ISIN).
    pub position_id: String,
    /// Dollar value of one basis point.
    pub dv01: f64,
    /// Modified duration in years.
    pub modified_duration: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// Market value (`clean_price / 100 × nominal × quantity`).
    pub market_value: f64,
    /// Accrued interest since the last coupon, per unit held.
    pub accrued_interest: f64,
}

/// Aggregated bond portfolio metrics.
///
/// Duration and convexity are market-value weighted averages; DV01 and
/// market value are additive sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBondMetrics {
    /// Sum of position market values.
    pub total_market_value: f64,
    /// Sum of position DV01s.
    pub total_dv01: f64,
    /// Market-value weighted modified duration.
    pub weighted_avg_duration: f64,
    /// Market-value weighted years to maturity.
    pub weighted_avg_maturity: f64,
    /// Market-value weighted convexity.
    pub convexity: f64,
}

/// Prices a bond from its yield, returning the clean price as % of nominal.
///
/// # Errors
///
/// Propagates position validation errors from cashflow generation.
pub fn price_from_yield(bond: &BondPosition, ytm: f64, as_of: Date) -> RiskResult<f64> {
    let cashflows = generate_cashflows(bond, as_of)?;
    let pv: f64 = cashflows
        .iter()
        .map(|cf| cf.amount / (1.0 + ytm).powf(cf.year_fraction))
        .sum();

    let nominal = bond.nominal.to_f64().unwrap_or(0.0);
    if nominal == 0.0 {
        return Ok(0.0);
    }
    Ok(pv / nominal * 100.0)
}

/// Calculates Macaulay duration: PV-time-weighted average life in years.
///
/// ## Formula
///
/// ```text
/// D_mac = Σ(t_i × PV_i) / Σ(PV_i)
/// ```
///
/// # Errors
///
/// Propagates position validation errors from cashflow generation.
pub fn macaulay_duration(bond: &BondPosition, ytm: f64, as_of: Date) -> RiskResult<f64> {
    let cashflows = generate_cashflows(bond, as_of)?;
    Ok(macaulay_from_cashflows(&cashflows, ytm))
}

/// Calculates modified duration: Macaulay duration / (1 + ytm).
///
/// Flat annual-compounding approximation; a semi-annual payer would
/// strictly divide by `(1 + y/2)`, but the fixtures use the annual form.
///
/// # Errors
///
/// Propagates position validation errors from cashflow generation.
pub fn modified_duration(bond: &BondPosition, ytm: f64, as_of: Date) -> RiskResult<f64> {
    Ok(macaulay_duration(bond, ytm, as_of)? / (1.0 + ytm))
}

/// Calculates convexity under flat annual compounding.
///
/// ## Formula
///
/// ```text
/// C = Σ(t_i × (t_i + 1) × PV_i) / (Σ(PV_i) × (1 + y)²)
/// ```
///
/// # Errors
///
/// Propagates position validation errors from cashflow generation.
pub fn convexity(bond: &BondPosition, ytm: f64, as_of: Date) -> RiskResult<f64> {
    let cashflows = generate_cashflows(bond, as_of)?;

    let mut pv_total = 0.0;
    let mut convexity_sum = 0.0;
    for cf in &cashflows {
        let pv = cf.amount / (1.0 + ytm).powf(cf.year_fraction);
        pv_total += pv;
        convexity_sum += cf.year_fraction * (cf.year_fraction + 1.0) * pv;
    }

    if pv_total == 0.0 {
        return Ok(0.0);
    }
    Ok(convexity_sum / (pv_total * (1.0 + ytm).powi(2)))
}

/// Calculates DV01: the dollar P&L of a one basis point yield move.
///
/// ## Formula
///
/// ```text
/// DV01 = D_mod × MV × 0.0001
/// ```
///
/// # Errors
///
/// Propagates position validation errors from cashflow generation.
pub fn dv01(bond: &BondPosition, ytm: f64, market_value: f64, as_of: Date) -> RiskResult<f64> {
    Ok(modified_duration(bond, ytm, as_of)? * market_value * 0.0001)
}

/// Calculates spread duration: sensitivity to credit spread changes.
///
/// ## Formula
///
/// ```text
/// SD ≈ D_mod × (s / (y + s))       s = spread_bps / 10000
/// ```
///
/// # Errors
///
/// Propagates position validation errors from cashflow generation.
pub fn spread_duration(
    bond: &BondPosition,
    ytm: f64,
    spread_bps: f64,
    as_of: Date,
) -> RiskResult<f64> {
    let mod_dur = modified_duration(bond, ytm, as_of)?;

    let spread = spread_bps / 10_000.0;
    let total_yield = ytm + spread;
    if total_yield == 0.0 {
        return Ok(0.0);
    }
    Ok(mod_dur * (spread / total_yield))
}

/// Calculates accrued interest since the last coupon, per unit held.
///
/// Locates the bracketing coupon dates by walking backward from
/// maturity in frequency-sized steps, then pro-rates the coupon by
/// elapsed / total actual days in the period. Zero-coupon bonds accrue
/// nothing.
///
/// # Errors
///
/// Propagates position validation errors.
pub fn accrued_interest(bond: &BondPosition, as_of: Date) -> RiskResult<f64> {
    bond.validate(as_of)?;

    if bond.coupon_frequency == 0 {
        return Ok(0.0);
    }

    let months_interval = (12 / bond.coupon_frequency) as i32;

    let mut last_coupon = bond.maturity_date;
    while last_coupon > as_of {
        last_coupon = last_coupon.add_months(-months_interval)?;
    }
    let next_coupon = last_coupon.add_months(months_interval)?;

    let days_accrued = last_coupon.days_until(as_of) as f64;
    let days_in_period = last_coupon.days_until(next_coupon) as f64;
    if days_in_period == 0.0 {
        return Ok(0.0);
    }

    let nominal = bond.nominal.to_f64().unwrap_or(0.0);
    let coupon_payment = bond.coupon * nominal / f64::from(bond.coupon_frequency);
    Ok(coupon_payment * (days_accrued / days_in_period))
}

/// Calculates the full metrics bundle for a single bond position.
///
/// The cashflow schedule is generated once and shared across the
/// duration, convexity, and DV01 calculations.
///
/// # Errors
///
/// Propagates position validation errors.
pub fn calculate_bond_metrics(bond: &BondPosition, as_of: Date) -> RiskResult<BondMetrics> {
    let cashflows = generate_cashflows(bond, as_of)?;
    let market_value = bond.market_value();

    let mac_dur = macaulay_from_cashflows(&cashflows, bond.ytm);
    let mod_dur = mac_dur / (1.0 + bond.ytm);

    let mut pv_total = 0.0;
    let mut convexity_sum = 0.0;
    for cf in &cashflows {
        let pv = cf.amount / (1.0 + bond.ytm).powf(cf.year_fraction);
        pv_total += pv;
        convexity_sum += cf.year_fraction * (cf.year_fraction + 1.0) * pv;
    }
    let convexity = if pv_total == 0.0 {
        0.0
    } else {
        convexity_sum / (pv_total * (1.0 + bond.ytm).powi(2))
    };

    Ok(BondMetrics {
        position_id: bond.isin.clone(),
        dv01: mod_dur * market_value * 0.0001,
        modified_duration: mod_dur,
        macaulay_duration: mac_dur,
        convexity,
        market_value,
        accrued_interest: accrued_interest(bond, as_of)?,
    })
}

/// Aggregates per-bond metrics into portfolio-level figures.
///
/// DV01 and market value are additive; duration and convexity are
/// market-value weighted; weighted average maturity is the value
/// weighted year fraction to maturity under each bond's own day count.
/// An empty position list yields the all-zero aggregate.
///
/// # Errors
///
/// Propagates validation errors from any position - one malformed bond
/// fails the whole portfolio calculation rather than silently skewing
/// the aggregate.
pub fn calculate_portfolio_metrics(
    bonds: &[BondPosition],
    as_of: Date,
) -> RiskResult<PortfolioBondMetrics> {
    if bonds.is_empty() {
        return Ok(PortfolioBondMetrics::default());
    }

    let metrics: Vec<BondMetrics> = bonds
        .iter()
        .map(|b| calculate_bond_metrics(b, as_of))
        .collect::<RiskResult<_>>()?;

    let total_mv: f64 = metrics.iter().map(|m| m.market_value).sum();
    let total_dv01: f64 = metrics.iter().map(|m| m.dv01).sum();

    let (weighted_duration, weighted_convexity, wam) = if total_mv > 0.0 {
        let duration = metrics
            .iter()
            .map(|m| m.modified_duration * m.market_value)
            .sum::<f64>()
            / total_mv;
        let convexity = metrics
            .iter()
            .map(|m| m.convexity * m.market_value)
            .sum::<f64>()
            / total_mv;
        let wam = bonds
            .iter()
            .zip(&metrics)
            .map(|(b, m)| b.day_count.year_fraction(as_of, b.maturity_date) * m.market_value)
            .sum::<f64>()
            / total_mv;
        (duration, convexity, wam)
    } else {
        (0.0, 0.0, 0.0)
    };

    Ok(PortfolioBondMetrics {
        total_market_value: total_mv,
        total_dv01,
        weighted_avg_duration: weighted_duration,
        weighted_avg_maturity: wam,
        convexity: weighted_convexity,
    })
}

/// Macaulay duration from a pre-generated cashflow schedule.
fn macaulay_from_cashflows(cashflows: &[Cashflow], ytm: f64) -> f64 {
    let mut pv_total = 0.0;
    let mut weighted_time = 0.0;
    for cf in cashflows {
        let pv = cf.amount / (1.0 + ytm).powf(cf.year_fraction);
        pv_total += pv;
        weighted_time += cf.year_fraction * pv;
    }

    if pv_total == 0.0 {
        return 0.0;
    }
    weighted_time / pv_total
}
