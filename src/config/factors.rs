//! Factor calculator parameters
//!
//! Named defaults for the factor calculators, overridable from `[factors]`
//! in `.debtpilot.toml`.

use crate::metrics::patterns;
use serde::{Deserialize, Serialize};

/// Per-file complexity estimate above which a file counts as high-complexity
pub const DEFAULT_COMPLEXITY_THRESHOLD: f64 = 50.0;

/// Multiplier applied to test functions before dividing by total functions.
/// One test per five functions counts as full coverage.
pub const DEFAULT_TEST_MULTIPLIER: f64 = 5.0;

/// Tolerated security pattern hits per file
pub const DEFAULT_SECURITY_RISK_BUDGET: u64 = 2;

/// Factors below this value produce a recommendation and remediation candidates
pub const DEFAULT_RECOMMENDATION_FLOOR: f64 = 0.80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorConfig {
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: f64,

    #[serde(default = "default_test_multiplier")]
    pub test_multiplier: f64,

    #[serde(default = "default_security_risk_budget")]
    pub security_risk_budget: u64,

    #[serde(default = "default_recommendation_floor")]
    pub recommendation_floor: f64,

    #[serde(default = "PatternBonusConfig::architecture")]
    pub architecture: PatternBonusConfig,

    #[serde(default = "PatternBonusConfig::performance")]
    pub performance: PatternBonusConfig,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            test_multiplier: default_test_multiplier(),
            security_risk_budget: default_security_risk_budget(),
            recommendation_floor: default_recommendation_floor(),
            architecture: PatternBonusConfig::architecture(),
            performance: PatternBonusConfig::performance(),
        }
    }
}

impl FactorConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.complexity_threshold.is_finite() || self.complexity_threshold < 0.0 {
            return Err(format!(
                "complexity_threshold must be a non-negative number, got {}",
                self.complexity_threshold
            ));
        }
        if !self.test_multiplier.is_finite() || self.test_multiplier <= 0.0 {
            return Err(format!(
                "test_multiplier must be positive, got {}",
                self.test_multiplier
            ));
        }
        if !(0.0..=1.0).contains(&self.recommendation_floor) {
            return Err(format!(
                "recommendation_floor must be between 0.0 and 1.0, got {}",
                self.recommendation_floor
            ));
        }
        self.architecture.validate("architecture")?;
        self.performance.validate("performance")
    }
}

/// Baseline score plus presence bonuses for a pattern-driven factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternBonusConfig {
    pub baseline: f64,
    #[serde(default)]
    pub bonuses: Vec<BonusRule>,
}

/// Adds `bonus` when `counter` reaches `min_count`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRule {
    pub counter: String,
    pub min_count: u64,
    pub bonus: f64,
}

impl BonusRule {
    fn new(counter: &str, min_count: u64, bonus: f64) -> Self {
        Self {
            counter: counter.to_string(),
            min_count,
            bonus,
        }
    }
}

impl PatternBonusConfig {
    pub fn architecture() -> Self {
        Self {
            baseline: 0.80,
            bonuses: vec![
                BonusRule::new(patterns::MODERN_CONCURRENCY, 10, 0.10),
                BonusRule::new(patterns::DEPENDENCY_INJECTION, 5, 0.05),
            ],
        }
    }

    pub fn performance() -> Self {
        Self {
            baseline: 0.85,
            bonuses: vec![
                BonusRule::new(patterns::LAZY_INITIALIZATION, 5, 0.05),
                BonusRule::new(patterns::CACHING, 5, 0.05),
            ],
        }
    }

    fn validate(&self, factor: &str) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.baseline) {
            return Err(format!(
                "{} baseline must be between 0.0 and 1.0, got {}",
                factor, self.baseline
            ));
        }
        match self.bonuses.iter().find(|b| !(b.bonus.is_finite() && b.bonus >= 0.0)) {
            Some(rule) => Err(format!(
                "{} bonus for '{}' must be non-negative, got {}",
                factor, rule.counter, rule.bonus
            )),
            None => Ok(()),
        }
    }
}

pub fn default_complexity_threshold() -> f64 {
    DEFAULT_COMPLEXITY_THRESHOLD
}
pub fn default_test_multiplier() -> f64 {
    DEFAULT_TEST_MULTIPLIER
}
pub fn default_security_risk_budget() -> u64 {
    DEFAULT_SECURITY_RISK_BUDGET
}
pub fn default_recommendation_floor() -> f64 {
    DEFAULT_RECOMMENDATION_FLOOR
}
