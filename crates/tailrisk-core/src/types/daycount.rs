//! Day count conventions for year fraction calculations.
//!
//! The engine deliberately uses *simplified* formulas calibrated against
//! the golden test fixtures:
//!
//! - ACT/360 and ACT/365 divide actual days by the fixed basis
//! - ACT/ACT is approximated as actual days / 365.25
//! - 30/360 and 30E/360 use the plain `(ΔY·360 + ΔM·30 + ΔD) / 360`
//!   component-difference formula, *not* the ISDA end-of-month adjustment
//!   rules. Downstream tolerances were calibrated against this formula,
//!   so it must not be "fixed" to full ISDA 30/360.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

use super::Date;

/// Closed set of supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - money market convention
    Act360,
    /// Actual/365 Fixed - the engine default
    #[default]
    Act365,
    /// Actual/Actual, approximated as actual days / 365.25
    ActAct,
    /// 30/360, simplified component-difference formula
    Thirty360,
    /// 30E/360, same simplified formula as 30/360
    ThirtyE360,
}

impl DayCountConvention {
    /// Calculates the year fraction between two dates.
    ///
    /// Can be negative if `end` is before `start`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        let days = start.days_until(end) as f64;

        match self {
            DayCountConvention::Act360 => days / 360.0,
            DayCountConvention::Act365 => days / 365.0,
            DayCountConvention::ActAct => days / 365.25,
            DayCountConvention::Thirty360 | DayCountConvention::ThirtyE360 => {
                let years = f64::from(end.year() - start.year());
                let months = f64::from(end.month() as i32 - start.month() as i32);
                let day_diff = f64::from(end.day() as i32 - start.day() as i32);
                (years * 360.0 + months * 30.0 + day_diff) / 360.0
            }
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365 => "ACT/365",
            DayCountConvention::ActAct => "ACT/ACT",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::ThirtyE360 => "30E/360",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365,
            DayCountConvention::ActAct,
            DayCountConvention::Thirty360,
            DayCountConvention::ThirtyE360,
        ]
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = RiskError;

    /// Parses a day count convention from its market name.
    ///
    /// Case-insensitive; accepts the common aliases found in position
    /// feeds ("ACTUAL/360", "ACT365", ...). Unknown strings fail loudly
    /// rather than defaulting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACTUAL/365" | "ACT365" | "ACT/365F" => Ok(DayCountConvention::Act365),
            "ACT/ACT" | "ACTUAL/ACTUAL" | "ACTACT" => Ok(DayCountConvention::ActAct),
            "30/360" | "THIRTY360" | "BOND" => Ok(DayCountConvention::Thirty360),
            "30E/360" | "30E360" | "EUROBOND" => Ok(DayCountConvention::ThirtyE360),
            _ => Err(RiskError::UnknownDayCount {
                name: s.to_string(),
            }),
        }
    }
}
