//! Concentration metrics: largest exposures and Herfindahl indices.
//!
//! Exposure maps use `BTreeMap` so that iteration order, and therefore
//! the serialized output, is deterministic across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Concentration profile of one exposure dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionConcentration {
    /// Largest single exposure.
    pub largest_exposure: f64,
    /// Sum of the five largest exposures.
    pub top_5_exposure: f64,
    /// Herfindahl-Hirschman index in `[0, 1]`.
    pub hhi: f64,
}

/// Concentration metrics across the standard exposure dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationMetrics {
    /// By issuer.
    pub issuer: DimensionConcentration,
    /// Sum of the ten largest issuer exposures.
    pub top_10_issuer_exposure: f64,
    /// By country.
    pub country: DimensionConcentration,
    /// By sector.
    pub sector: DimensionConcentration,
    /// By counterparty.
    pub counterparty: DimensionConcentration,
}

/// Herfindahl-Hirschman index of an exposure vector.
///
/// ## Formula
///
/// ```text
/// HHI = Σ (eᵢ / Σe)²
/// ```
///
/// 1.0 means a single exposure holds everything; 1/N is the floor for N
/// equal exposures. A zero total yields 0.
#[must_use]
pub fn herfindahl_index(exposures: &[f64]) -> f64 {
    let total: f64 = exposures.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    exposures.iter().map(|e| (e / total).powi(2)).sum()
}

/// Sum of the `n` largest values of an exposure vector.
#[must_use]
pub fn top_n_exposure(exposures: &[f64], n: usize) -> f64 {
    let mut sorted = exposures.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted.iter().take(n).sum()
}

/// Concentration profile of a single dimension.
#[must_use]
pub fn dimension_concentration<K: Ord>(exposures: &BTreeMap<K, f64>) -> DimensionConcentration {
    let values: Vec<f64> = exposures.values().copied().collect();
    DimensionConcentration {
        largest_exposure: top_n_exposure(&values, 1),
        top_5_exposure: top_n_exposure(&values, 5),
        hhi: herfindahl_index(&values),
    }
}

/// Calculates concentration metrics across all dimensions.
#[must_use]
pub fn calculate_concentration_metrics(
    by_issuer: &BTreeMap<i64, f64>,
    by_country: &BTreeMap<String, f64>,
    by_sector: &BTreeMap<String, f64>,
    by_counterparty: &BTreeMap<i64, f64>,
) -> ConcentrationMetrics {
    let issuer_values: Vec<f64> = by_issuer.values().copied().collect();

    ConcentrationMetrics {
        issuer: dimension_concentration(by_issuer),
        top_10_issuer_exposure: top_n_exposure(&issuer_values, 10),
        country: dimension_concentration(by_country),
        sector: dimension_concentration(by_sector),
        counterparty: dimension_concentration(by_counterparty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hhi_single_exposure() {
        assert_relative_eq!(herfindahl_index(&[1_000_000.0]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hhi_equal_exposures() {
        let equal = [250_000.0; 4];
        assert_relative_eq!(herfindahl_index(&equal), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_hhi_skewed() {
        // 90/10 split: 0.81 + 0.01
        assert_relative_eq!(
            herfindahl_index(&[900_000.0, 100_000.0]),
            0.82,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_hhi_zero_total() {
        assert_eq!(herfindahl_index(&[]), 0.0);
        assert_eq!(herfindahl_index(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_top_n() {
        let exposures = [100.0, 500.0, 300.0, 200.0, 400.0, 50.0];
        assert_relative_eq!(top_n_exposure(&exposures, 1), 500.0);
        assert_relative_eq!(top_n_exposure(&exposures, 3), 1_200.0);
        // n larger than the vector takes everything
        assert_relative_eq!(top_n_exposure(&exposures, 100), 1_550.0);
    }

    #[test]
    fn test_dimension_concentration() {
        let mut by_issuer = BTreeMap::new();
        for (id, mv) in [(1_i64, 600_000.0), (2, 300_000.0), (3, 100_000.0)] {
            by_issuer.insert(id, mv);
        }

        let dim = dimension_concentration(&by_issuer);
        assert_relative_eq!(dim.largest_exposure, 600_000.0);
        assert_relative_eq!(dim.top_5_exposure, 1_000_000.0);
        assert_relative_eq!(dim.hhi, 0.36 + 0.09 + 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_all_dimensions() {
        let mut by_issuer = BTreeMap::new();
        for id in 1..=12_i64 {
            by_issuer.insert(id, 100_000.0);
        }
        let mut by_country = BTreeMap::new();
        by_country.insert("DE".to_string(), 700_000.0);
        by_country.insert("FR".to_string(), 500_000.0);
        let by_sector = BTreeMap::new();
        let by_counterparty = BTreeMap::new();

        let metrics = calculate_concentration_metrics(
            &by_issuer,
            &by_country,
            &by_sector,
            &by_counterparty,
        );

        assert_relative_eq!(metrics.issuer.top_5_exposure, 500_000.0);
        assert_relative_eq!(metrics.top_10_issuer_exposure, 1_000_000.0);
        assert_relative_eq!(metrics.issuer.hhi, 12.0 * (1.0 / 144.0), epsilon = 1e-12);
        assert_relative_eq!(metrics.country.largest_exposure, 700_000.0);
        assert_eq!(metrics.sector, DimensionConcentration::default());
        assert_eq!(metrics.counterparty, DimensionConcentration::default());
    }
}
