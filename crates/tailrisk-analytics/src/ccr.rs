//! Counterparty credit risk: current exposure, PFE add-ons, EAD, CVA.
//!
//! Follows the current exposure method: netting-set exposure is the
//! positive part of the summed mark-to-market, plus notional-based
//! add-ons scaled by residual maturity. CVA is the simple
//! `LGD × PD × EAD` approximation per counterparty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tailrisk_core::types::{Date, DerivativePosition, Rating, Seniority};
use tailrisk_core::RiskResult;

use crate::credit::{loss_given_default, probability_of_default};

/// PFE add-on factor for FX products (1% of notional per √year).
pub const FX_ADDON_FACTOR: f64 = 0.01;

/// PFE add-on factor for interest-rate products (0.5% of notional per √year).
pub const IR_ADDON_FACTOR: f64 = 0.005;

/// Trading days per year used to scale residual maturity.
const TRADING_DAYS_PER_YEAR: f64 = 250.0;

/// Rating assumed for counterparties with no external rating.
pub const DEFAULT_COUNTERPARTY_RATING: Rating = Rating::BBB;

/// Exposure metrics for a single counterparty netting set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyExposure {
    /// Counterparty reference.
    pub counterparty_id: i64,
    /// Current exposure: `max(Σ MtM, 0)`.
    pub current_exposure: f64,
    /// Sum of potential future exposure add-ons.
    pub pfe_addon: f64,
    /// Largest single-trade add-on (the exposure peak).
    pub peak_pfe: f64,
    /// Exposure at default: `(CE + add-ons) × α`.
    pub ead: f64,
    /// Credit valuation adjustment for the netting set.
    pub cva: f64,
    /// Number of trades in the netting set.
    pub trade_count: usize,
}

/// Portfolio-level counterparty risk metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CcrMetrics {
    /// Per-counterparty exposures, ordered by counterparty id.
    pub exposures: Vec<CounterpartyExposure>,
    /// Sum of EADs across counterparties.
    pub total_ead: f64,
    /// Sum of CVAs across counterparties.
    pub cva_total: f64,
}

/// PFE add-on for a single trade.
///
/// ## Formula
///
/// ```text
/// addon = notional × factor × √(days_to_maturity / 250)
/// ```
///
/// with factor 1% for FX products and 0.5% for interest-rate products.
/// A matured or same-day trade contributes no add-on.
#[must_use]
pub fn pfe_addon(position: &DerivativePosition, as_of: Date) -> f64 {
    let days = as_of.days_until(position.maturity_date);
    if days <= 0 {
        return 0.0;
    }

    let factor = if position.instrument_type.is_fx() {
        FX_ADDON_FACTOR
    } else {
        IR_ADDON_FACTOR
    };

    position.notional_value() * factor * (days as f64 / TRADING_DAYS_PER_YEAR).sqrt()
}

/// Calculates counterparty exposures from a set of derivative trades.
///
/// Trades are grouped by `counterparty_id` into netting sets. Within a
/// set, mark-to-market values net against each other before the
/// exposure floor; add-ons are gross. `wwr_alpha` scales the EAD for
/// wrong-way risk (1.0 = none). The CVA uses the counterparty's rating
/// where supplied, otherwise BBB, with senior unsecured recovery.
///
/// # Errors
///
/// Returns `RiskError::InvalidPosition` if any trade has a zero or
/// negative notional. Short exposure is expressed through the
/// `direction` field, not a signed notional.
pub fn calculate_ccr_metrics(
    positions: &[DerivativePosition],
    as_of: Date,
    counterparty_ratings: &BTreeMap<i64, Rating>,
    wwr_alpha: f64,
) -> RiskResult<CcrMetrics> {
    if positions.is_empty() {
        return Ok(CcrMetrics::default());
    }

    let mut netting_sets: BTreeMap<i64, Vec<&DerivativePosition>> = BTreeMap::new();
    for position in positions {
        position.validate()?;
        netting_sets
            .entry(position.counterparty_id)
            .or_default()
            .push(position);
    }

    let mut exposures = Vec::with_capacity(netting_sets.len());
    let mut total_ead = 0.0;
    let mut cva_total = 0.0;

    for (counterparty_id, trades) in netting_sets {
        let net_mtm: f64 = trades.iter().map(|t| t.mtm_value()).sum();
        let current_exposure = net_mtm.max(0.0);

        let mut addon_sum = 0.0;
        let mut peak_pfe = 0.0_f64;
        for trade in &trades {
            let addon = pfe_addon(trade, as_of);
            addon_sum += addon;
            peak_pfe = peak_pfe.max(addon);
        }

        let ead = (current_exposure + addon_sum) * wwr_alpha;

        let rating = counterparty_ratings
            .get(&counterparty_id)
            .copied()
            .unwrap_or(DEFAULT_COUNTERPARTY_RATING);
        let cva = loss_given_default(Seniority::SeniorUnsecured)
            * probability_of_default(rating)
            * ead;

        log::debug!(
            "counterparty {counterparty_id}: ce={current_exposure:.2} addons={addon_sum:.2} ead={ead:.2} cva={cva:.2}"
        );

        total_ead += ead;
        cva_total += cva;
        exposures.push(CounterpartyExposure {
            counterparty_id,
            current_exposure,
            pfe_addon: addon_sum,
            peak_pfe,
            ead,
            cva,
            trade_count: trades.len(),
        });
    }

    Ok(CcrMetrics {
        exposures,
        total_ead,
        cva_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use tailrisk_core::types::{InstrumentType, TradeDirection};

    fn trade(
        id: &str,
        instrument_type: InstrumentType,
        notional: f64,
        mtm: f64,
        counterparty_id: i64,
        maturity: Date,
    ) -> DerivativePosition {
        DerivativePosition {
            instrument_id: id.to_string(),
            instrument_type,
            notional: rust_decimal::Decimal::try_from(notional).unwrap(),
            direction: TradeDirection::Long,
            underlying: "EURUSD".to_string(),
            trade_date: Date::from_ymd(2025, 1, 10).unwrap(),
            maturity_date: maturity,
            counterparty_id,
            mtm: rust_decimal::Decimal::try_from(mtm).unwrap(),
            currency: "USD".to_string(),
            strike: None,
            option_type: None,
            exercise_type: None,
            fixed_rate: None,
            floating_index: None,
        }
    }

    fn as_of() -> Date {
        Date::from_ymd(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_fx_addon() {
        // 250 calendar days out: √(250/250) = 1
        let maturity = as_of().add_days(250);
        let fx = trade("T1", InstrumentType::FxForward, 1_000_000.0, 0.0, 1, maturity);
        assert_relative_eq!(pfe_addon(&fx, as_of()), 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ir_addon_is_half_of_fx() {
        let maturity = as_of().add_days(250);
        let fx = trade("T1", InstrumentType::FxForward, 1_000_000.0, 0.0, 1, maturity);
        let ir = trade("T2", InstrumentType::IrSwap, 1_000_000.0, 0.0, 1, maturity);
        assert_relative_eq!(
            pfe_addon(&ir, as_of()),
            pfe_addon(&fx, as_of()) / 2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_matured_trade_no_addon() {
        let matured = trade(
            "T1",
            InstrumentType::FxForward,
            1_000_000.0,
            0.0,
            1,
            Date::from_ymd(2025, 6, 1).unwrap(),
        );
        assert_eq!(pfe_addon(&matured, as_of()), 0.0);
    }

    #[test]
    fn test_negative_notional_is_error() {
        let maturity = as_of().add_days(250);
        let short = trade("T1", InstrumentType::FxForward, -1_000_000.0, 0.0, 1, maturity);
        let err = calculate_ccr_metrics(&[short], as_of(), &BTreeMap::new(), 1.0).unwrap_err();
        assert!(err.to_string().contains("notional"));
    }

    #[test]
    fn test_netting_within_counterparty() {
        let maturity = as_of().add_days(250);
        let trades = vec![
            trade("T1", InstrumentType::IrSwap, 1_000_000.0, 50_000.0, 7, maturity),
            trade("T2", InstrumentType::IrSwap, 1_000_000.0, -30_000.0, 7, maturity),
        ];

        let metrics =
            calculate_ccr_metrics(&trades, as_of(), &BTreeMap::new(), 1.0).unwrap();
        assert_eq!(metrics.exposures.len(), 1);

        let exposure = &metrics.exposures[0];
        // Net MtM = 20,000; add-ons stay gross (2 × 5,000)
        assert_relative_eq!(exposure.current_exposure, 20_000.0, epsilon = 1e-9);
        assert_relative_eq!(exposure.pfe_addon, 10_000.0, epsilon = 1e-9);
        assert_relative_eq!(exposure.peak_pfe, 5_000.0, epsilon = 1e-9);
        assert_relative_eq!(exposure.ead, 30_000.0, epsilon = 1e-9);
        assert_eq!(exposure.trade_count, 2);
    }

    #[test]
    fn test_negative_net_mtm_floors_at_zero() {
        let maturity = as_of().add_days(250);
        let trades = vec![trade(
            "T1",
            InstrumentType::IrSwap,
            1_000_000.0,
            -80_000.0,
            7,
            maturity,
        )];

        let metrics =
            calculate_ccr_metrics(&trades, as_of(), &BTreeMap::new(), 1.0).unwrap();
        assert_eq!(metrics.exposures[0].current_exposure, 0.0);
        // EAD reduces to the add-on
        assert_relative_eq!(metrics.exposures[0].ead, 5_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cva_default_rating() {
        let maturity = as_of().add_days(250);
        let trades = vec![trade(
            "T1",
            InstrumentType::FxForward,
            1_000_000.0,
            0.0,
            9,
            maturity,
        )];

        let metrics =
            calculate_ccr_metrics(&trades, as_of(), &BTreeMap::new(), 1.0).unwrap();
        // EAD = 10,000; CVA = 0.40 × 0.0075 × 10,000 = 30
        assert_relative_eq!(metrics.exposures[0].cva, 30.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.cva_total, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cva_rated_counterparty() {
        let maturity = as_of().add_days(250);
        let trades = vec![trade(
            "T1",
            InstrumentType::FxForward,
            1_000_000.0,
            0.0,
            9,
            maturity,
        )];
        let mut ratings = BTreeMap::new();
        ratings.insert(9, Rating::B);

        let metrics = calculate_ccr_metrics(&trades, as_of(), &ratings, 1.0).unwrap();
        // CVA = 0.40 × 0.15 × 10,000 = 600
        assert_relative_eq!(metrics.exposures[0].cva, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wwr_alpha_scales_ead() {
        let maturity = as_of().add_days(250);
        let trades = vec![trade(
            "T1",
            InstrumentType::FxForward,
            1_000_000.0,
            20_000.0,
            3,
            maturity,
        )];

        let base = calculate_ccr_metrics(&trades, as_of(), &BTreeMap::new(), 1.0).unwrap();
        let scaled = calculate_ccr_metrics(&trades, as_of(), &BTreeMap::new(), 1.4).unwrap();
        assert_relative_eq!(
            scaled.exposures[0].ead,
            base.exposures[0].ead * 1.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_counterparties_ordered_by_id() {
        let maturity = as_of().add_days(250);
        let trades = vec![
            trade("T1", InstrumentType::IrSwap, 1_000_000.0, 0.0, 9, maturity),
            trade("T2", InstrumentType::IrSwap, 1_000_000.0, 0.0, 3, maturity),
        ];

        let metrics =
            calculate_ccr_metrics(&trades, as_of(), &BTreeMap::new(), 1.0).unwrap();
        assert_eq!(metrics.exposures[0].counterparty_id, 3);
        assert_eq!(metrics.exposures[1].counterparty_id, 9);
    }

    #[test]
    fn test_empty_input() {
        let metrics =
            calculate_ccr_metrics(&[], as_of(), &BTreeMap::new(), 1.0).unwrap();
        assert_eq!(metrics, CcrMetrics::default());
    }

    #[test]
    fn test_zero_notional_is_error() {
        let maturity = as_of().add_days(250);
        let mut bad = trade("T1", InstrumentType::IrSwap, 1.0, 0.0, 1, maturity);
        bad.notional = dec!(0);
        assert!(calculate_ccr_metrics(&[bad], as_of(), &BTreeMap::new(), 1.0).is_err());
    }
}
