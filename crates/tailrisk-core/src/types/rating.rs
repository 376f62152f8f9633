//! Credit rating scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Normalized credit rating (S&P-style notation, AAA to D).
///
/// This is a closed enumeration: the PD lookup table matches on it
/// exhaustively, so introducing a new rating notch is a compile-time
/// event rather than a silent fallback to the default PD.
///
/// # Examples
///
/// ```
/// use tailrisk_core::types::Rating;
///
/// let rating: Rating = "bbb-".parse().unwrap();
/// assert_eq!(rating, Rating::BBBMinus);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// Highest quality
    AAA,
    /// AA+
    AAPlus,
    /// AA
    AA,
    /// AA-
    AAMinus,
    /// A+
    APlus,
    /// A
    A,
    /// A-
    AMinus,
    /// BBB+
    BBBPlus,
    /// BBB
    BBB,
    /// BBB- (lowest investment grade)
    BBBMinus,
    /// BB+ (highest high yield)
    BBPlus,
    /// BB
    BB,
    /// BB-
    BBMinus,
    /// B+
    BPlus,
    /// B
    B,
    /// B-
    BMinus,
    /// CCC+
    CCCPlus,
    /// CCC
    CCC,
    /// CCC-
    CCCMinus,
    /// CC
    CC,
    /// C
    C,
    /// In default
    D,
}

impl Rating {
    /// Returns the rating in S&P notation.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Rating::AAA => "AAA",
            Rating::AAPlus => "AA+",
            Rating::AA => "AA",
            Rating::AAMinus => "AA-",
            Rating::APlus => "A+",
            Rating::A => "A",
            Rating::AMinus => "A-",
            Rating::BBBPlus => "BBB+",
            Rating::BBB => "BBB",
            Rating::BBBMinus => "BBB-",
            Rating::BBPlus => "BB+",
            Rating::BB => "BB",
            Rating::BBMinus => "BB-",
            Rating::BPlus => "B+",
            Rating::B => "B",
            Rating::BMinus => "B-",
            Rating::CCCPlus => "CCC+",
            Rating::CCC => "CCC",
            Rating::CCCMinus => "CCC-",
            Rating::CC => "CC",
            Rating::C => "C",
            Rating::D => "D",
        }
    }

    /// Returns the full scale in order of decreasing quality.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::AAA,
            Self::AAPlus,
            Self::AA,
            Self::AAMinus,
            Self::APlus,
            Self::A,
            Self::AMinus,
            Self::BBBPlus,
            Self::BBB,
            Self::BBBMinus,
            Self::BBPlus,
            Self::BB,
            Self::BBMinus,
            Self::BPlus,
            Self::B,
            Self::BMinus,
            Self::CCCPlus,
            Self::CCC,
            Self::CCCMinus,
            Self::CC,
            Self::C,
            Self::D,
        ]
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Rating {
    type Err = RiskError;

    /// Parses a rating string, case-insensitively.
    ///
    /// Unknown strings fail loudly; callers that tolerate unrated
    /// positions should carry `Option<Rating>` and apply the documented
    /// default PD at the lookup site.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AAA" => Ok(Rating::AAA),
            "AA+" => Ok(Rating::AAPlus),
            "AA" => Ok(Rating::AA),
            "AA-" => Ok(Rating::AAMinus),
            "A+" => Ok(Rating::APlus),
            "A" => Ok(Rating::A),
            "A-" => Ok(Rating::AMinus),
            "BBB+" => Ok(Rating::BBBPlus),
            "BBB" => Ok(Rating::BBB),
            "BBB-" => Ok(Rating::BBBMinus),
            "BB+" => Ok(Rating::BBPlus),
            "BB" => Ok(Rating::BB),
            "BB-" => Ok(Rating::BBMinus),
            "B+" => Ok(Rating::BPlus),
            "B" => Ok(Rating::B),
            "B-" => Ok(Rating::BMinus),
            "CCC+" => Ok(Rating::CCCPlus),
            "CCC" => Ok(Rating::CCC),
            "CCC-" => Ok(Rating::CCCMinus),
            "CC" => Ok(Rating::CC),
            "C" => Ok(Rating::C),
            "D" => Ok(Rating::D),
            _ => Err(RiskError::UnknownRating {
                name: s.to_string(),
            }),
        }
    }
}
