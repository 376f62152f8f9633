//! # Tailrisk Core
//!
//! Core types and abstractions for the Tailrisk portfolio risk engine.
//!
//! This crate provides the foundation shared by every calculation module:
//!
//! - [`types::Date`] - calendar date newtype with month-stepping arithmetic
//! - [`types::DayCountConvention`] - closed set of supported day count bases
//! - [`types::BondPosition`] / [`types::DerivativePosition`] - immutable
//!   position snapshots joined from position and market data
//! - [`types::Rating`] / [`types::Seniority`] - closed credit classification
//!   enums used by the PD/LGD lookup tables
//! - [`RiskError`] - structured error type for input validation failures
//!
//! ## Design Philosophy
//!
//! Positions are value objects: they are created once per calculation from
//! the position/market-data join and never mutated. Malformed inputs
//! (negative nominal, maturity before the valuation date, unknown enum
//! strings) fail loudly instead of defaulting to zero, since silent
//! defaults corrupt every downstream risk figure.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{RiskError, RiskResult};
