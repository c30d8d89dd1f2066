//! Quality scoring: factor calculators, weighted aggregation, tier
//! classification and recommendations.

pub mod aggregator;
pub mod factors;
pub mod recommendations;
pub mod tiers;

pub use aggregator::WeightedAggregator;
pub use factors::{Factor, FactorCalculator, FactorValue, VACUOUS_SCORE};
pub use tiers::{classify, health_status, quality_tier, TierTable, TierThreshold, HEALTH_TIERS, QUALITY_TIERS};

use crate::config::{FactorConfig, ScoringWeights};
use crate::core::{MetricSnapshot, QualityReport, REPORT_SCHEMA_VERSION};
use crate::errors::Result;
use chrono::{DateTime, Utc};

/// Turns a snapshot into a [`QualityReport`]
#[derive(Debug, Clone)]
pub struct QualityScorer {
    calculator: FactorCalculator,
    aggregator: WeightedAggregator,
    factor_config: FactorConfig,
}

impl QualityScorer {
    /// Validates weights up front; an invalid set is a configuration error.
    pub fn new(weights: ScoringWeights, factor_config: FactorConfig) -> Result<Self> {
        let aggregator = WeightedAggregator::new(weights.clone())?;
        Ok(Self {
            calculator: FactorCalculator::new(factor_config.clone(), weights),
            aggregator,
            factor_config,
        })
    }

    pub fn score(&self, snapshot: &MetricSnapshot) -> QualityReport {
        self.score_at(snapshot, Utc::now())
    }

    /// Deterministic for a given snapshot and timestamp
    pub fn score_at(&self, snapshot: &MetricSnapshot, timestamp: DateTime<Utc>) -> QualityReport {
        let factors = self.calculator.score_all(snapshot);
        let overall_score = self.aggregator.aggregate(&factors);
        let recommendations =
            recommendations::recommendations(&factors, snapshot, &self.factor_config);

        QualityReport {
            schema_version: REPORT_SCHEMA_VERSION,
            timestamp,
            factors,
            overall_score,
            tier: quality_tier(overall_score).to_string(),
            health_status: health_status(overall_score * 100.0).to_string(),
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scorer_rejects_invalid_weights() {
        let weights = ScoringWeights {
            security: 0.5,
            ..ScoringWeights::default()
        };
        assert!(QualityScorer::new(weights, FactorConfig::default()).is_err());
    }

    #[test]
    fn empty_project_reaches_high_tier() {
        let scorer = QualityScorer::new(ScoringWeights::default(), FactorConfig::default()).unwrap();
        let report = scorer.score(&MetricSnapshot::default());
        // 0.8 weights of perfect factors + 0.1*0.8 + 0.1*0.85
        assert!((report.overall_score - 0.965).abs() < 1e-9);
        assert_eq!(report.tier, "target achieved");
        assert_eq!(report.health_status, "healthy");
        assert!(report.recommendations.is_empty());
    }
}
