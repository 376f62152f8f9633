//! Seniority classification for debt positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Normalized debt seniority, ordered from most senior to most junior.
///
/// The LGD lookup table matches on this exhaustively. The legacy feed
/// strings `SENIOR` and `SENIOR_UNSECURED` both map to
/// [`Seniority::SeniorUnsecured`] (they carried the same recovery
/// assumption).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Seniority {
    /// Secured by collateral
    SeniorSecured,
    /// Unsecured senior debt (feed strings "SENIOR" / "SENIOR_UNSECURED")
    #[default]
    SeniorUnsecured,
    /// Subordinated debt
    Subordinated,
    /// Junior / deeply subordinated
    Junior,
}

impl Seniority {
    /// Returns the canonical feed string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Seniority::SeniorSecured => "SENIOR_SECURED",
            Seniority::SeniorUnsecured => "SENIOR_UNSECURED",
            Seniority::Subordinated => "SUBORDINATED",
            Seniority::Junior => "JUNIOR",
        }
    }

    /// Returns all seniority levels in order (most senior first).
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::SeniorSecured,
            Self::SeniorUnsecured,
            Self::Subordinated,
            Self::Junior,
        ]
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Seniority {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SENIOR_SECURED" => Ok(Seniority::SeniorSecured),
            "SENIOR" | "SENIOR_UNSECURED" => Ok(Seniority::SeniorUnsecured),
            "SUBORDINATED" => Ok(Seniority::Subordinated),
            "JUNIOR" => Ok(Seniority::Junior),
            _ => Err(RiskError::UnknownSeniority {
                name: s.to_string(),
            }),
        }
    }
}
