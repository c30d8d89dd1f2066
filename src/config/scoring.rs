//! Scoring weight configuration
//!
//! Weights are data, validated once at startup. The aggregator refuses to
//! be constructed from a weight set that does not sum to 1.0.

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weights sum to 1.0
pub const WEIGHT_SUM_EPSILON: f64 = 0.001;

/// Scoring weights configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for complexity factor (0.0-1.0)
    #[serde(default = "default_complexity_weight")]
    pub complexity: f64,

    /// Weight for documentation factor (0.0-1.0)
    #[serde(default = "default_documentation_weight")]
    pub documentation: f64,

    /// Weight for testing factor (0.0-1.0)
    #[serde(default = "default_testing_weight")]
    pub testing: f64,

    /// Weight for security factor (0.0-1.0)
    #[serde(default = "default_security_weight")]
    pub security: f64,

    /// Weight for architecture factor (0.0-1.0)
    #[serde(default = "default_architecture_weight")]
    pub architecture: f64,

    /// Weight for performance factor (0.0-1.0)
    #[serde(default = "default_performance_weight")]
    pub performance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            complexity: default_complexity_weight(),
            documentation: default_documentation_weight(),
            testing: default_testing_weight(),
            security: default_security_weight(),
            architecture: default_architecture_weight(),
            performance: default_performance_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "{} weight must be between 0.0 and 1.0, got {}",
                name, weight
            ))
        }
    }

    // Pure function: Validate weights sum to 1.0
    pub fn validate_sum(sum: f64) -> Result<(), String> {
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            Err(format!(
                "Scoring weights must sum to 1.0, but sum to {:.3}",
                sum
            ))
        } else {
            Ok(())
        }
    }

    /// Weights in factor order, paired with their factor names
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("complexity", self.complexity),
            ("documentation", self.documentation),
            ("testing", self.testing),
            ("security", self.security),
            ("architecture", self.architecture),
            ("performance", self.performance),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    /// Validate each weight and that they sum to 1.0
    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in self.entries() {
            Self::validate_weight(weight, name)?;
        }
        Self::validate_sum(self.sum())
    }

    /// Weight for a named factor
    pub fn weight_for(&self, factor: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == factor)
            .map(|(_, weight)| weight)
    }
}

pub fn default_complexity_weight() -> f64 {
    0.25
}
pub fn default_documentation_weight() -> f64 {
    0.20
}
pub fn default_testing_weight() -> f64 {
    0.20
}
pub fn default_security_weight() -> f64 {
    0.15
}
pub fn default_architecture_weight() -> f64 {
    0.10
}
pub fn default_performance_weight() -> f64 {
    0.10
}
