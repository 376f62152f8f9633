//! Error types for the Tailrisk engine.
//!
//! Only *input* errors are represented here: malformed dates, non-positive
//! notionals, and unknown enum identifiers. Missing market data and empty
//! collections are not errors - the calculation modules degrade gracefully
//! and the orchestrator simply omits the affected metrics group.

use thiserror::Error;

/// A specialized Result type for Tailrisk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// The main error type for risk calculations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A position failed validation (e.g. non-positive nominal,
    /// maturity on or before the valuation date).
    #[error("Invalid position {position_id}: {reason}")]
    InvalidPosition {
        /// Identifier of the offending position.
        position_id: String,
        /// Description of what is invalid.
        reason: String,
    },

    /// Unrecognized day count convention string.
    #[error("Unknown day count convention: '{name}'")]
    UnknownDayCount {
        /// The unrecognized identifier.
        name: String,
    },

    /// Unrecognized credit rating string.
    #[error("Unknown rating: '{name}'")]
    UnknownRating {
        /// The unrecognized identifier.
        name: String,
    },

    /// Unrecognized seniority string.
    #[error("Unknown seniority: '{name}'")]
    UnknownSeniority {
        /// The unrecognized identifier.
        name: String,
    },

    /// Stress scenario not present in the shock catalog.
    #[error("Unknown stress scenario: '{name}'")]
    UnknownScenario {
        /// The unrecognized scenario identifier.
        name: String,
    },
}

impl RiskError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid position error.
    #[must_use]
    pub fn invalid_position(position_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            position_id: position_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown scenario error.
    #[must_use]
    pub fn unknown_scenario(name: impl Into<String>) -> Self {
        Self::UnknownScenario { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_invalid_position_display() {
        let err = RiskError::invalid_position("XS0000000000", "nominal must be positive");
        let msg = err.to_string();
        assert!(msg.contains("XS0000000000"));
        assert!(msg.contains("nominal"));
    }

    #[test]
    fn test_unknown_scenario_display() {
        let err = RiskError::unknown_scenario("CRISIS_2008");
        assert!(err.to_string().contains("CRISIS_2008"));
    }
}
