//! # Tailrisk Analytics
//!
//! Risk calculation modules for the Tailrisk portfolio risk engine.
//!
//! Every module is a set of pure functions: deterministic in its inputs,
//! no I/O, no shared state, no internal parallelism. Callers may run
//! portfolio calculations concurrently; nothing here requires
//! synchronization.
//!
//! ## Module Overview
//!
//! - [`cashflows`] - bond cashflow schedule generation
//! - [`bonds`] - duration, convexity, DV01, accrued interest, portfolio aggregates
//! - [`var`] - historical and stressed Value at Risk
//! - [`credit`] - PD/LGD tables, expected loss, credit VaR
//! - [`ccr`] - counterparty exposure, PFE add-ons, EAD, CVA
//! - [`liquidity`] - LCR, liquidation costs, funding gaps
//! - [`capital`] - IFR K-factor requirements and the backtesting multiplier policy
//! - [`concentration`] - Herfindahl indices across exposure dimensions
//! - [`stress`] - shock catalog and stress P&L application
//!
//! ## Conventions
//!
//! All VaR, DV01, exposure, and cost outputs are non-negative loss
//! magnitudes; the sign of the economic loss is implicit. Ratio metrics
//! with a zero denominator return [`ZERO_DENOMINATOR_SENTINEL`] rather
//! than infinity so that serialized results stay finite.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bonds;
pub mod capital;
pub mod cashflows;
pub mod ccr;
pub mod concentration;
pub mod credit;
pub mod liquidity;
pub mod stress;
pub mod var;

/// Sentinel for ratio metrics whose denominator is zero (capital ratio
/// with no requirement, LCR with no outflows). A large finite value is
/// used instead of infinity so results serialize cleanly.
pub const ZERO_DENOMINATOR_SENTINEL: f64 = 999.9;
