//! End-to-end scenarios for the aggregation engine.
//!
//! The bond fixture mirrors the reference emerging-market portfolio
//! (Kazakhstan / Navoi / Uzbekistan eurobonds) valued on 2025-12-01.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use rust_decimal_macros::dec;

use tailrisk_analytics::credit::CreditExposure;
use tailrisk_analytics::liquidity::LiquidityPosition;
use tailrisk_analytics::stress::{run_stress_test, PortfolioSensitivities, ScenarioId};
use tailrisk_core::types::{
    BondPosition, Date, DayCountConvention, DerivativePosition, InstrumentType, Rating, Seniority,
    TradeDirection,
};
use tailrisk_engine::{aggregate_portfolio_risks, RiskInputs, ENGINE_VERSION};

fn as_of() -> Date {
    Date::from_ymd(2025, 12, 1).unwrap()
}

fn sample_bonds() -> Vec<BondPosition> {
    vec![
        BondPosition {
            isin: "XS2010028593".to_string(),
            nominal: dec!(1000),
            quantity: dec!(100),
            coupon: 0.05,
            coupon_frequency: 2,
            maturity_date: Date::from_ymd(2030, 7, 21).unwrap(),
            issue_date: Date::from_ymd(2019, 7, 21).unwrap(),
            clean_price: dec!(98.5),
            ytm: 0.052,
            day_count: DayCountConvention::Act365,
            issuer_id: Some(1),
            currency: "USD".to_string(),
            seniority: Seniority::SeniorUnsecured,
            rating: Some(Rating::BBBMinus),
        },
        BondPosition {
            isin: "XS2243048671".to_string(),
            nominal: dec!(1000),
            quantity: dec!(50),
            coupon: 0.08,
            coupon_frequency: 2,
            maturity_date: Date::from_ymd(2027, 11, 4).unwrap(),
            issue_date: Date::from_ymd(2020, 11, 4).unwrap(),
            clean_price: dec!(102.0),
            ytm: 0.075,
            day_count: DayCountConvention::Act365,
            issuer_id: Some(2),
            currency: "USD".to_string(),
            seniority: Seniority::SeniorUnsecured,
            rating: Some(Rating::BPlus),
        },
        BondPosition {
            isin: "XS2686115544".to_string(),
            nominal: dec!(1000),
            quantity: dec!(75),
            coupon: 0.07,
            coupon_frequency: 2,
            maturity_date: Date::from_ymd(2029, 10, 20).unwrap(),
            issue_date: Date::from_ymd(2023, 10, 20).unwrap(),
            clean_price: dec!(99.0),
            ytm: 0.0715,
            day_count: DayCountConvention::Act365,
            issuer_id: Some(3),
            currency: "USD".to_string(),
            seniority: Seniority::SeniorUnsecured,
            rating: Some(Rating::BBMinus),
        },
    ]
}

/// Deterministic 250-day P&L series with a stressed opening window and
/// three known tail losses. Base values stay inside ±150k; everything
/// at or below -175k is injected deliberately.
fn sample_pnl_series() -> Vec<f64> {
    let mut series: Vec<f64> = (0..250)
        .map(|i| f64::from((i * 7919) % 300_000) - 150_000.0)
        .collect();

    // Ten deep losses inside the first 60 days (the stress window)
    let crisis = [
        (3, -300_000.0),
        (7, -280_000.0),
        (13, -260_000.0),
        (18, -240_000.0),
        (22, -230_000.0),
        (27, -220_000.0),
        (33, -210_000.0),
        (38, -200_000.0),
        (44, -195_000.0),
        (51, -190_000.0),
    ];
    for (idx, loss) in crisis {
        series[idx] = loss;
    }

    // Tail losses at the known quantile boundary
    series[5] = -180_000.0;
    series[10] = -185_000.0;
    series[12] = -175_000.0;

    series
}

#[test]
fn test_bond_portfolio_golden_values() {
    let mut inputs = RiskInputs::new(1, as_of());
    inputs.bonds = sample_bonds();

    let result = aggregate_portfolio_risks(&inputs).unwrap();
    let metrics = result.bond_metrics.expect("bond metrics should be computed");

    // 98,500 + 51,000 + 74,250
    assert_relative_eq!(metrics.total_market_value, 223_750.0, epsilon = 1.0);
    // DV01 = duration-weighted market value × 1bp; roughly 71 for this
    // three-to-four-year book
    assert!(metrics.total_dv01 > 50.0 && metrics.total_dv01 < 100.0);
    assert!(metrics.weighted_avg_duration > 3.0 && metrics.weighted_avg_duration < 6.0);
    assert!(metrics.weighted_avg_maturity > 2.0 && metrics.weighted_avg_maturity < 5.0);
    assert!(metrics.convexity > 0.0);
}

#[test]
fn test_var_golden_series() {
    let mut inputs = RiskInputs::new(1, as_of());
    inputs.pnl_history = sample_pnl_series();

    let result = aggregate_portfolio_risks(&inputs).unwrap();
    let metrics = result.var_metrics.expect("var metrics should be computed");

    // 13 observations at or below -175k; floor(0.05 × 250) = 12 lands
    // exactly on the -175k injection
    assert_relative_eq!(metrics.var_1d_95, 175_000.0, epsilon = 1e-6);
    assert!((metrics.var_1d_95 - 180_000.0).abs() <= 20_000.0);

    // The crisis window dominates the stressed estimate
    assert!(metrics.stressed_var >= metrics.var_1d_95);
    assert_relative_eq!(
        metrics.var_10d_99,
        metrics.var_1d_95 * 1.3 * 10.0_f64.sqrt(),
        epsilon = 1e-6
    );
}

#[test]
fn test_empty_inputs_omit_all_modules() {
    let inputs = RiskInputs::new(42, as_of());
    let result = aggregate_portfolio_risks(&inputs).unwrap();

    assert_eq!(result.portfolio_id, 42);
    assert_eq!(result.engine_version, ENGINE_VERSION);
    assert!(result.bond_metrics.is_none());
    assert!(result.var_metrics.is_none());
    assert!(result.credit_metrics.is_none());
    assert!(result.ccr_metrics.is_none());
    assert!(result.liquidity_metrics.is_none());
    assert!(result.capital_metrics.is_none());
    assert!(result.cva_total.is_none());
    assert!(result.calculation_time_seconds >= 0.0);
}

#[test]
fn test_ir_parallel_stress_golden_value() {
    let sensitivities = PortfolioSensitivities {
        total_market_value: 10_000_000.0,
        total_dv01: 5_000.0,
        avg_spread_duration: 0.0,
    };
    let result = run_stress_test(ScenarioId::Ir01, &sensitivities).unwrap();
    // -5000 × 200 / 100
    assert_relative_eq!(result.pnl_impact, -10_000.0, epsilon = 1e-9);
}

#[test]
fn test_capital_runs_when_var_present() {
    let mut inputs = RiskInputs::new(1, as_of());
    inputs.pnl_history = sample_pnl_series();
    inputs.capital.own_funds = 1_000_000.0;

    let result = aggregate_portfolio_risks(&inputs).unwrap();
    let capital = result.capital_metrics.expect("capital should be computed");

    // K-NPR = 175,000 × 3.0
    assert_relative_eq!(capital.k_npr, 525_000.0, epsilon = 1e-3);
    assert_relative_eq!(capital.total_requirement, 525_000.0, epsilon = 1e-3);
    assert_relative_eq!(
        capital.capital_ratio,
        1_000_000.0 / 525_000.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_capital_runs_on_scalars_without_var() {
    let mut inputs = RiskInputs::new(1, as_of());
    inputs.capital.aum = 500_000_000.0;

    let result = aggregate_portfolio_risks(&inputs).unwrap();
    let capital = result.capital_metrics.expect("capital should be computed");

    assert_eq!(capital.k_npr, 0.0);
    assert_relative_eq!(capital.k_aum, 100_000.0, epsilon = 1e-9);
    assert!(result.var_metrics.is_none());
}

#[test]
fn test_full_calculation_with_all_inputs() {
    let mut inputs = RiskInputs::new(7, as_of());
    inputs.bonds = sample_bonds();
    inputs.pnl_history = sample_pnl_series();
    inputs.credit_exposures = vec![CreditExposure {
        ead: 223_750.0,
        rating: Some(Rating::BBBMinus),
        seniority: Some(Seniority::SeniorUnsecured),
    }];
    inputs.derivatives = vec![DerivativePosition {
        instrument_id: "IRS-001".to_string(),
        instrument_type: InstrumentType::IrSwap,
        notional: dec!(5_000_000),
        direction: TradeDirection::Pay,
        underlying: "USD-SOFR".to_string(),
        trade_date: Date::from_ymd(2025, 6, 1).unwrap(),
        maturity_date: Date::from_ymd(2028, 6, 1).unwrap(),
        counterparty_id: 11,
        mtm: dec!(42_000),
        currency: "USD".to_string(),
        strike: None,
        option_type: None,
        exercise_type: None,
        fixed_rate: Some(0.0375),
        floating_index: Some("SOFR".to_string()),
    }];
    inputs.counterparty_ratings = BTreeMap::from([(11, Rating::A)]);
    inputs.liquidity_positions = vec![LiquidityPosition {
        position_id: "XS2010028593".to_string(),
        market_value: 98_500.0,
        bid_ask_spread_bps: Some(25.0),
        liquidity_score: Some(0.6),
    }];
    inputs.hqla = 500_000.0;
    inputs.net_cash_outflows_30d = 250_000.0;
    inputs.capital.own_funds = 2_000_000.0;

    let result = aggregate_portfolio_risks(&inputs).unwrap();

    assert!(result.bond_metrics.is_some());
    assert!(result.var_metrics.is_some());
    assert!(result.credit_metrics.is_some());
    assert!(result.liquidity_metrics.is_some());
    assert!(result.capital_metrics.is_some());

    let ccr = result.ccr_metrics.as_ref().expect("ccr should be computed");
    assert_eq!(ccr.exposures.len(), 1);
    assert_eq!(ccr.exposures[0].counterparty_id, 11);
    assert!(ccr.exposures[0].current_exposure > 0.0);
    assert_relative_eq!(
        result.cva_total.unwrap(),
        ccr.cva_total,
        epsilon = 1e-12
    );

    let liquidity = result.liquidity_metrics.as_ref().unwrap();
    assert_relative_eq!(liquidity.lcr, 2.0, epsilon = 1e-12);

    // Serialized snapshot keeps only the computed groups
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("bond_metrics"));
    assert!(json.contains("cva_total"));
}

#[test]
fn test_matured_bond_fails_whole_calculation() {
    let mut inputs = RiskInputs::new(1, as_of());
    inputs.bonds = sample_bonds();
    inputs.bonds[0].maturity_date = Date::from_ymd(2024, 1, 1).unwrap();
    inputs.pnl_history = sample_pnl_series();

    assert!(aggregate_portfolio_risks(&inputs).is_err());
}

#[test]
fn test_result_roundtrip() {
    let mut inputs = RiskInputs::new(5, as_of());
    inputs.bonds = sample_bonds();

    let result = aggregate_portfolio_risks(&inputs).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: tailrisk_engine::PortfolioRiskResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
