//! Core types for risk calculations.

mod cashflow;
mod date;
mod daycount;
mod position;
mod rating;
mod seniority;

pub use cashflow::Cashflow;
pub use date::Date;
pub use daycount::DayCountConvention;
pub use position::{
    BondPosition, DerivativePosition, ExerciseType, InstrumentType, OptionType, TradeDirection,
};
pub use rating::Rating;
pub use seniority::Seniority;
