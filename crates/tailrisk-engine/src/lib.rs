//! # Tailrisk Engine
//!
//! The portfolio risk aggregation engine: a single synchronous entry
//! point that runs every calculation module against one portfolio's
//! inputs and assembles the complete risk snapshot.
//!
//! ## Data Flow
//!
//! ```text
//! Positions ─┬─> Bond Analytics ──> PortfolioBondMetrics
//!            │
//!            ├─> CCR ─────────────> CounterpartyExposure + CVA
//!            │
//! P&L series ──> VaR ─┬───────────> VaRMetrics
//!                     │
//!                     └─> Capital ─> CapitalMetrics (K-NPR from VaR)
//!
//! Credit / Liquidity inputs ──────> CreditMetrics / LiquidityMetrics
//! ```
//!
//! Each module runs only when its required inputs are present; a
//! metrics group that was not computed is `None` in the result, never
//! zero-filled, so consumers can tell "not computed" from "computed as
//! zero".
//!
//! The engine is a pure function of its inputs: no I/O, no shared
//! state, no internal parallelism. Callers may run portfolios
//! concurrently.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod aggregate;
mod inputs;
mod result;

pub use aggregate::aggregate_portfolio_risks;
pub use inputs::RiskInputs;
pub use result::PortfolioRiskResult;

/// Engine version tag stamped onto every result.
pub const ENGINE_VERSION: &str = "0.1.0";
