//! Bond cashflow schedule generation.
//!
//! Schedules are built by walking backward from maturity in fixed
//! `12 / coupon_frequency` month steps until the valuation date is
//! reached. This reproduces regular coupon grids without needing the
//! full issue-date roll convention; stub periods are out of scope.

use rust_decimal::prelude::ToPrimitive;

use tailrisk_core::types::{BondPosition, Cashflow, Date};
use tailrisk_core::RiskResult;

/// Generates the remaining cashflows of a bond as seen from `as_of`.
///
/// Walks backward from the maturity date in `12 / coupon_frequency`
/// month steps. Each step strictly after `as_of` yields a coupon of
/// `coupon × nominal / frequency`; the maturity payment additionally
/// repays the principal. A coupon falling exactly on `as_of` is treated
/// as already paid. The result is in chronological order.
///
/// Zero-coupon bonds (`coupon_frequency == 0`) produce a single
/// principal-only cashflow at maturity.
///
/// Amounts are per unit held: quantity scaling happens at the market
/// value level, so durations remain quantity-invariant.
///
/// # Errors
///
/// Returns `RiskError::InvalidPosition` if the position fails
/// validation (non-positive nominal or quantity, coupon frequency not
/// dividing 12, maturity not after `as_of`).
pub fn generate_cashflows(bond: &BondPosition, as_of: Date) -> RiskResult<Vec<Cashflow>> {
    bond.validate(as_of)?;

    let nominal = bond.nominal.to_f64().unwrap_or(0.0);

    // Degenerate case: zero-coupon bond pays principal at maturity only.
    if bond.coupon_frequency == 0 {
        let yf = bond.day_count.year_fraction(as_of, bond.maturity_date);
        return Ok(vec![Cashflow::new(bond.maturity_date, nominal, yf)]);
    }

    let coupon_payment = bond.coupon * nominal / f64::from(bond.coupon_frequency);
    let months_interval = (12 / bond.coupon_frequency) as i32;

    let mut cashflows = Vec::new();
    let mut current = bond.maturity_date;
    while current > as_of {
        let yf = bond.day_count.year_fraction(as_of, current);
        let amount = if current == bond.maturity_date {
            coupon_payment + nominal
        } else {
            coupon_payment
        };
        cashflows.push(Cashflow::new(current, amount, yf));
        current = current.add_months(-months_interval)?;
    }

    cashflows.reverse();
    Ok(cashflows)
}
