//! Cash flow type for bond analytics.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// A single bond cash flow as seen from the valuation date.
///
/// Cash flows are derived values: they are regenerated from the bond
/// terms on every calculation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Payment date.
    pub date: Date,
    /// Cash amount in the bond's currency (coupon, or coupon plus
    /// principal for the maturity payment).
    pub amount: f64,
    /// Year fraction from the valuation date to the payment date,
    /// under the bond's day count convention.
    pub year_fraction: f64,
}

impl Cashflow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64, year_fraction: f64) -> Self {
        Self {
            date,
            amount,
            year_fraction,
        }
    }
}

impl fmt::Display for Cashflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2} (t={:.4})", self.date, self.amount, self.year_fraction)
    }
}
