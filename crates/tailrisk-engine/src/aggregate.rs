//! The aggregation orchestrator.

use std::time::Instant;

use tailrisk_analytics::{bonds, capital, ccr, credit, liquidity, var};
use tailrisk_core::RiskResult;

use crate::inputs::RiskInputs;
use crate::result::PortfolioRiskResult;
use crate::ENGINE_VERSION;

/// Calculates all risk metrics for one portfolio.
///
/// Each module runs only when its required inputs are present:
///
/// - bond analytics need bond positions
/// - VaR needs P&L history
/// - credit metrics need credit exposures
/// - CCR needs derivative positions
/// - liquidity metrics need liquidity positions
/// - capital runs when VaR ran or any capital scalar is non-zero,
///   since K-NPR can be zero while the client-flow K-factors are not
///
/// Modules that did not run leave their result field `None`.
///
/// # Errors
///
/// Returns the first module error encountered (invalid position,
/// matured bond, non-positive notional). A calculation either fully succeeds
/// or fails; there is no partial result.
pub fn aggregate_portfolio_risks(inputs: &RiskInputs) -> RiskResult<PortfolioRiskResult> {
    let started = Instant::now();

    log::debug!(
        "portfolio {}: {} bonds, {} derivatives, {} pnl points",
        inputs.portfolio_id,
        inputs.bonds.len(),
        inputs.derivatives.len(),
        inputs.pnl_history.len()
    );

    let bond_metrics = if inputs.bonds.is_empty() {
        None
    } else {
        Some(bonds::calculate_portfolio_metrics(
            &inputs.bonds,
            inputs.as_of,
        )?)
    };

    let var_metrics = if inputs.pnl_history.is_empty() {
        None
    } else {
        Some(var::calculate_var_metrics(&inputs.pnl_history))
    };

    let credit_metrics = if inputs.credit_exposures.is_empty() {
        None
    } else {
        Some(credit::calculate_credit_metrics(&inputs.credit_exposures))
    };

    let (ccr_metrics, cva_total) = if inputs.derivatives.is_empty() {
        (None, None)
    } else {
        let metrics = ccr::calculate_ccr_metrics(
            &inputs.derivatives,
            inputs.as_of,
            &inputs.counterparty_ratings,
            inputs.wwr_alpha,
        )?;
        let cva = metrics.cva_total;
        (Some(metrics), Some(cva))
    };

    let liquidity_metrics = if inputs.liquidity_positions.is_empty() {
        None
    } else {
        Some(liquidity::calculate_liquidity_metrics(
            &inputs.liquidity_positions,
            inputs.hqla,
            inputs.net_cash_outflows_30d,
            &inputs.assets_by_bucket,
            &inputs.liabilities_by_bucket,
        ))
    };

    let capital_metrics = if var_metrics.is_some() || inputs.has_capital_inputs() {
        let var_1d_95 = var_metrics.map_or(0.0, |m| m.var_1d_95);
        Some(capital::calculate_capital_metrics(
            var_1d_95,
            inputs.var_multiplier,
            &inputs.capital,
        ))
    } else {
        None
    };

    let elapsed = started.elapsed().as_secs_f64();
    log::info!(
        "portfolio {} calculated in {:.3}s",
        inputs.portfolio_id,
        elapsed
    );

    Ok(PortfolioRiskResult {
        portfolio_id: inputs.portfolio_id,
        as_of: inputs.as_of,
        engine_version: ENGINE_VERSION.to_string(),
        bond_metrics,
        var_metrics,
        credit_metrics,
        ccr_metrics,
        liquidity_metrics,
        capital_metrics,
        cva_total,
        calculation_time_seconds: elapsed,
    })
}
