//! Position types: bonds and derivatives.
//!
//! Positions are immutable value objects created from the position /
//! market-data join at calculation time. Monetary fields (nominal,
//! prices, notional, mark-to-market) are `Decimal`; rates and yields are
//! `f64` since every downstream analytic is floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RiskError, RiskResult};

use super::{Date, DayCountConvention, Rating, Seniority};

/// A fixed-coupon bond position with the attributes needed for risk
/// calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondPosition {
    /// ISIN identifier.
    pub isin: String,
    /// Nominal per unit (face value).
    pub nominal: Decimal,
    /// Number of units held.
    pub quantity: Decimal,
    /// Annual coupon rate as a decimal (0.05 = 5%).
    pub coupon: f64,
    /// Coupon payments per year; must divide 12 (0 for zero-coupon bonds).
    pub coupon_frequency: u32,
    /// Maturity date.
    pub maturity_date: Date,
    /// Issue date.
    pub issue_date: Date,
    /// Clean market price as % of par.
    pub clean_price: Decimal,
    /// Yield to maturity as a decimal.
    pub ytm: f64,
    /// Day count convention for year fractions.
    pub day_count: DayCountConvention,
    /// Issuer reference, if known.
    pub issuer_id: Option<i64>,
    /// Position currency (ISO code).
    pub currency: String,
    /// Debt seniority.
    pub seniority: Seniority,
    /// Credit rating, if rated.
    pub rating: Option<Rating>,
}

impl BondPosition {
    /// Market value of the position: `clean_price / 100 × nominal × quantity`.
    #[must_use]
    pub fn market_value(&self) -> f64 {
        let mv = self.clean_price / Decimal::from(100) * self.nominal * self.quantity;
        mv.to_f64().unwrap_or(0.0)
    }

    /// Validates the position against a valuation date.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidPosition` if the nominal or quantity is
    /// not positive, if the coupon frequency does not divide 12 (the
    /// schedule walk steps `12 / frequency` months and needs a whole,
    /// non-zero step), or if the bond matures on or before `as_of` - a
    /// matured position in a calculation request is an upstream data
    /// fault, not a degenerate case to zero-fill.
    pub fn validate(&self, as_of: Date) -> RiskResult<()> {
        if self.nominal <= Decimal::ZERO {
            return Err(RiskError::invalid_position(
                &self.isin,
                format!("nominal must be positive, got {}", self.nominal),
            ));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(RiskError::invalid_position(
                &self.isin,
                format!("quantity must be positive, got {}", self.quantity),
            ));
        }
        if self.coupon_frequency > 12
            || (self.coupon_frequency != 0 && 12 % self.coupon_frequency != 0)
        {
            return Err(RiskError::invalid_position(
                &self.isin,
                format!(
                    "coupon frequency must divide 12, got {}",
                    self.coupon_frequency
                ),
            ));
        }
        if self.maturity_date <= as_of {
            return Err(RiskError::invalid_position(
                &self.isin,
                format!(
                    "maturity {} is not after valuation date {}",
                    self.maturity_date, as_of
                ),
            ));
        }
        Ok(())
    }
}

/// Derivative instrument kind.
///
/// Drives the PFE add-on classification: FX products carry the 1% add-on
/// factor, interest-rate products the 0.5% factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    /// FX forward
    FxForward,
    /// FX option
    FxOption,
    /// Interest rate swap
    IrSwap,
    /// Interest rate cap
    IrCap,
    /// Interest rate floor
    IrFloor,
    /// Swaption
    Swaption,
}

impl InstrumentType {
    /// True for FX products (forward, option).
    #[must_use]
    pub fn is_fx(&self) -> bool {
        matches!(self, InstrumentType::FxForward | InstrumentType::FxOption)
    }

    /// True for interest-rate products (swap, cap, floor, swaption).
    #[must_use]
    pub fn is_interest_rate(&self) -> bool {
        matches!(
            self,
            InstrumentType::IrSwap
                | InstrumentType::IrCap
                | InstrumentType::IrFloor
                | InstrumentType::Swaption
        )
    }

    /// Returns the canonical feed string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentType::FxForward => "FX_FORWARD",
            InstrumentType::FxOption => "FX_OPTION",
            InstrumentType::IrSwap => "IR_SWAP",
            InstrumentType::IrCap => "IR_CAP",
            InstrumentType::IrFloor => "IR_FLOOR",
            InstrumentType::Swaption => "SWAPTION",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for InstrumentType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FX_FORWARD" => Ok(InstrumentType::FxForward),
            "FX_OPTION" => Ok(InstrumentType::FxOption),
            "IR_SWAP" => Ok(InstrumentType::IrSwap),
            "IR_CAP" => Ok(InstrumentType::IrCap),
            "IR_FLOOR" => Ok(InstrumentType::IrFloor),
            "SWAPTION" => Ok(InstrumentType::Swaption),
            _ => Err(RiskError::InvalidPosition {
                position_id: s.to_string(),
                reason: "unknown instrument type".to_string(),
            }),
        }
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    /// Long the underlying
    Long,
    /// Short the underlying
    Short,
    /// Pay fixed (swaps)
    Pay,
    /// Receive fixed (swaps)
    Receive,
}

/// Option style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}

/// Option exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseType {
    /// Exercisable only at expiry
    European,
    /// Exercisable any time up to expiry
    American,
}

/// A derivative position, grouped by counterparty for CCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivativePosition {
    /// Instrument identifier.
    pub instrument_id: String,
    /// Instrument kind.
    pub instrument_type: InstrumentType,
    /// Notional amount.
    pub notional: Decimal,
    /// Trade direction.
    pub direction: TradeDirection,
    /// Underlying identifier (currency pair, index, ...).
    pub underlying: String,
    /// Trade date.
    pub trade_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Counterparty reference.
    pub counterparty_id: i64,
    /// Mark-to-market value (signed).
    pub mtm: Decimal,
    /// Position currency (ISO code).
    pub currency: String,
    /// Option strike, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<Decimal>,
    /// Call/put flag, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
    /// Exercise style, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<ExerciseType>,
    /// Fixed leg rate for swaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_rate: Option<f64>,
    /// Floating leg index for swaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_index: Option<String>,
}

impl DerivativePosition {
    /// Notional as `f64`, for add-on calculations.
    #[must_use]
    pub fn notional_value(&self) -> f64 {
        self.notional.to_f64().unwrap_or(0.0)
    }

    /// Mark-to-market as `f64`.
    #[must_use]
    pub fn mtm_value(&self) -> f64 {
        self.mtm.to_f64().unwrap_or(0.0)
    }

    /// Validates the position.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidPosition` for a zero or negative
    /// notional. Direction is carried explicitly in `direction`, never
    /// encoded in the sign of the notional.
    pub fn validate(&self) -> RiskResult<()> {
        if self.notional <= Decimal::ZERO {
            return Err(RiskError::invalid_position(
                &self.instrument_id,
                format!("notional must be positive, got {}", self.notional),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn sample_bond() -> BondPosition {
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
        }
    }

    #[test]
    fn test_market_value() {
        // 98.5% × 1000 × 100 = 98,500
        assert_relative_eq!(sample_bond().market_value(), 98_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validate_ok() {
        let as_of = Date::from_ymd(2025, 12, 1).unwrap();
        assert!(sample_bond().validate(as_of).is_ok());
    }

    #[test]
    fn test_validate_negative_nominal() {
        let mut bond = sample_bond();
        bond.nominal = dec!(-1000);
        let as_of = Date::from_ymd(2025, 12, 1).unwrap();
        assert!(bond.validate(as_of).is_err());
    }

    #[test]
    fn test_validate_frequency_must_divide_year() {
        let as_of = Date::from_ymd(2025, 12, 1).unwrap();
        for frequency in [5, 7, 13, 24, 52] {
            let mut bond = sample_bond();
            bond.coupon_frequency = frequency;
            let err = bond.validate(as_of).unwrap_err();
            assert!(err.to_string().contains("frequency"), "{frequency}");
        }
        // Whole-month schedules and zero-coupon pass
        for frequency in [0, 1, 2, 3, 4, 6, 12] {
            let mut bond = sample_bond();
            bond.coupon_frequency = frequency;
            assert!(bond.validate(as_of).is_ok(), "{frequency}");
        }
    }

    #[test]
    fn test_validate_matured() {
        let bond = sample_bond();
        let as_of = Date::from_ymd(2031, 1, 1).unwrap();
        let err = bond.validate(as_of).unwrap_err();
        assert!(err.to_string().contains("maturity"));
    }

    #[test]
    fn test_instrument_type_classification() {
        assert!(InstrumentType::FxForward.is_fx());
        assert!(InstrumentType::FxOption.is_fx());
        assert!(!InstrumentType::FxOption.is_interest_rate());
        assert!(InstrumentType::IrSwap.is_interest_rate());
        assert!(InstrumentType::Swaption.is_interest_rate());
    }

    #[test]
    fn test_instrument_type_parse() {
        assert_eq!(
            "fx_forward".parse::<InstrumentType>().unwrap(),
            InstrumentType::FxForward
        );
        assert!("CDS".parse::<InstrumentType>().is_err());
    }

    fn sample_derivative() -> DerivativePosition {
        DerivativePosition {
            instrument_id: "FXF-001".to_string(),
            instrument_type: InstrumentType::FxForward,
            notional: dec!(1_000_000),
            direction: TradeDirection::Long,
            underlying: "EURUSD".to_string(),
            trade_date: Date::from_ymd(2025, 1, 10).unwrap(),
            maturity_date: Date::from_ymd(2026, 1, 10).unwrap(),
            counterparty_id: 42,
            mtm: dec!(12_500),
            currency: "USD".to_string(),
            strike: None,
            option_type: None,
            exercise_type: None,
            fixed_rate: None,
            floating_index: None,
        }
    }

    #[test]
    fn test_derivative_serde_roundtrip() {
        let deriv = sample_derivative();
        let json = serde_json::to_string(&deriv).unwrap();
        assert!(json.contains("FX_FORWARD"));
        let back: DerivativePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deriv);
    }

    #[test]
    fn test_derivative_validate_rejects_non_positive_notional() {
        assert!(sample_derivative().validate().is_ok());

        let mut zero = sample_derivative();
        zero.notional = dec!(0);
        assert!(zero.validate().is_err());

        let mut short = sample_derivative();
        short.notional = dec!(-1_000_000);
        let err = short.validate().unwrap_err();
        assert!(err.to_string().contains("notional"));
    }
}
