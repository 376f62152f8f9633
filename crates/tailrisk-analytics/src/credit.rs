//! Credit risk: PD/LGD lookups, expected loss, and credit VaR.
//!
//! Probabilities of default come from a fixed through-the-cycle table
//! keyed by rating notch; loss-given-default from seniority. Both fall
//! back to conservative defaults when the attribute is missing.

use serde::{Deserialize, Serialize};

use tailrisk_core::types::{Rating, Seniority};

/// PD applied when a position carries no rating.
pub const DEFAULT_PD: f64 = 0.01;

/// LGD applied when no seniority mapping exists.
pub const DEFAULT_LGD: f64 = 0.45;

/// Z-score at 99% confidence used by the credit VaR approximation.
const Z_99: f64 = 2.33;

/// A single credit exposure with its risk attributes resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditExposure {
    /// Exposure at default.
    pub ead: f64,
    /// Rating notch, if known.
    pub rating: Option<Rating>,
    /// Seniority of the claim, if known.
    pub seniority: Option<Seniority>,
}

/// Aggregated credit risk metrics for a portfolio of exposures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditMetrics {
    /// Total exposure at default.
    pub total_ead: f64,
    /// Sum of per-exposure expected losses.
    pub expected_loss: f64,
    /// 99% credit VaR (expected plus unexpected loss).
    pub credit_var_99: f64,
    /// EAD-weighted average probability of default.
    pub weighted_avg_pd: f64,
    /// EAD-weighted average loss given default.
    pub weighted_avg_lgd: f64,
}

/// One-year probability of default for a rating notch.
///
/// Through-the-cycle estimates on the S&P scale; `D` means the default
/// has already occurred.
#[must_use]
pub fn probability_of_default(rating: Rating) -> f64 {
    match rating {
        Rating::AAA => 0.0001,
        Rating::AAPlus => 0.0002,
        Rating::AA => 0.0003,
        Rating::AAMinus => 0.0005,
        Rating::APlus => 0.0010,
        Rating::A => 0.0015,
        Rating::AMinus => 0.0025,
        Rating::BBBPlus => 0.0050,
        Rating::BBB => 0.0075,
        Rating::BBBMinus => 0.0120,
        Rating::BBPlus => 0.0200,
        Rating::BB => 0.0350,
        Rating::BBMinus => 0.0600,
        Rating::BPlus => 0.1000,
        Rating::B => 0.1500,
        Rating::BMinus => 0.2500,
        Rating::CCCPlus => 0.3500,
        Rating::CCC => 0.5000,
        Rating::CCCMinus => 0.6500,
        Rating::CC => 0.8000,
        Rating::C => 0.9000,
        Rating::D => 1.0000,
    }
}

/// Loss given default for a claim seniority.
#[must_use]
pub fn loss_given_default(seniority: Seniority) -> f64 {
    match seniority {
        Seniority::SeniorSecured => 0.25,
        Seniority::SeniorUnsecured => 0.40,
        Seniority::Subordinated => 0.60,
        Seniority::Junior => 0.75,
    }
}

/// Expected loss of a single exposure.
///
/// ## Formula
///
/// ```text
/// EL = EAD × PD × LGD
/// ```
#[must_use]
pub fn expected_loss(ead: f64, pd: f64, lgd: f64) -> f64 {
    ead * pd * lgd
}

/// Calculates aggregate credit metrics over a set of exposures.
///
/// Expected loss is additive. The 99% credit VaR adds an unexpected
/// loss term under a one-factor Gaussian approximation:
///
/// ```text
/// CVaR_99 = EL + 2.33 × √(EL × (1 − PD_w))
/// ```
///
/// where `PD_w` is the EAD-weighted average PD. When `PD_w ≥ 1` the
/// portfolio is fully defaulted and the VaR collapses to the expected
/// loss. Empty input yields the all-zero metrics.
#[must_use]
pub fn calculate_credit_metrics(exposures: &[CreditExposure]) -> CreditMetrics {
    if exposures.is_empty() {
        return CreditMetrics::default();
    }

    let mut total_ead = 0.0;
    let mut total_el = 0.0;
    let mut pd_weighted = 0.0;
    let mut lgd_weighted = 0.0;

    for exposure in exposures {
        let pd = exposure.rating.map_or(DEFAULT_PD, probability_of_default);
        let lgd = exposure.seniority.map_or(DEFAULT_LGD, loss_given_default);

        total_ead += exposure.ead;
        total_el += expected_loss(exposure.ead, pd, lgd);
        pd_weighted += exposure.ead * pd;
        lgd_weighted += exposure.ead * lgd;
    }

    let (weighted_avg_pd, weighted_avg_lgd) = if total_ead > 0.0 {
        (pd_weighted / total_ead, lgd_weighted / total_ead)
    } else {
        (0.0, 0.0)
    };

    let credit_var_99 = if weighted_avg_pd < 1.0 {
        total_el + Z_99 * (total_el * (1.0 - weighted_avg_pd)).sqrt()
    } else {
        total_el
    };

    CreditMetrics {
        total_ead,
        expected_loss: total_el,
        credit_var_99,
        weighted_avg_pd,
        weighted_avg_lgd,
    }
}
