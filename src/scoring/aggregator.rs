use crate::config::ScoringWeights;
use crate::core::{clamp_unit, FactorScore};
use crate::errors::{Error, Result};

/// Combines factor scores into one overall score using a weight set that
/// was validated at construction. Aggregation itself cannot fail.
#[derive(Debug, Clone)]
pub struct WeightedAggregator {
    weights: ScoringWeights,
}

impl WeightedAggregator {
    /// Fails with a configuration error unless every weight is within
    /// [0, 1] and the weights sum to 1.0 within tolerance.
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate().map_err(Error::Configuration)?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// `clamp(Σ weightᵢ · valueᵢ, 0, 1)`. Factors without a configured
    /// weight contribute nothing.
    pub fn aggregate(&self, factors: &[FactorScore]) -> f64 {
        let sum: f64 = factors
            .iter()
            .map(|f| self.weights.weight_for(&f.name).unwrap_or(0.0) * f.value)
            .sum();
        clamp_unit(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_factors(value: f64) -> Vec<FactorScore> {
        ScoringWeights::default()
            .entries()
            .iter()
            .map(|(name, weight)| FactorScore::new(*name, value, *weight, ""))
            .collect()
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let weights = ScoringWeights {
            documentation: 0.10,
            ..ScoringWeights::default()
        };
        let err = WeightedAggregator::new(weights).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn uniform_values_aggregate_to_the_same_value() {
        let aggregator = WeightedAggregator::new(ScoringWeights::default()).unwrap();
        assert!((aggregator.aggregate(&all_factors(1.0)) - 1.0).abs() < 1e-12);
        assert_eq!(aggregator.aggregate(&all_factors(0.0)), 0.0);
    }

    #[test]
    fn unknown_factors_are_ignored() {
        let aggregator = WeightedAggregator::new(ScoringWeights::default()).unwrap();
        let factors = vec![
            FactorScore::new("security", 1.0, 0.15, ""),
            FactorScore::new("vibes", 1.0, 0.9, ""),
        ];
        assert_eq!(aggregator.aggregate(&factors), 0.15);
    }

    #[test]
    fn result_is_clamped_to_unit_interval() {
        let aggregator = WeightedAggregator::new(ScoringWeights::default()).unwrap();
        assert!(aggregator.aggregate(&all_factors(1.0)) <= 1.0);
    }
}
