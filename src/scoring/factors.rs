//! Factor calculators
//!
//! Each calculator is a pure function of a [`MetricSnapshot`]. A factor
//! whose denominator is zero has nothing to measure and scores a perfect
//! 1.0; no other fallback constants are used.

use crate::config::{FactorConfig, PatternBonusConfig, ScoringWeights};
use crate::core::snapshot::complexity_estimate;
use crate::core::{clamp_unit, FactorScore, MetricSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score assigned when a factor has nothing to measure
pub const VACUOUS_SCORE: f64 = 1.0;

/// The scored dimensions, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Complexity,
    Documentation,
    Testing,
    Security,
    Architecture,
    Performance,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Complexity,
        Factor::Documentation,
        Factor::Testing,
        Factor::Security,
        Factor::Architecture,
        Factor::Performance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Factor::Complexity => "complexity",
            Factor::Documentation => "documentation",
            Factor::Testing => "testing",
            Factor::Security => "security",
            Factor::Architecture => "architecture",
            Factor::Performance => "performance",
        }
    }

    pub fn from_name(name: &str) -> Option<Factor> {
        Factor::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn weight(&self, weights: &ScoringWeights) -> f64 {
        match self {
            Factor::Complexity => weights.complexity,
            Factor::Documentation => weights.documentation,
            Factor::Testing => weights.testing,
            Factor::Security => weights.security,
            Factor::Architecture => weights.architecture,
            Factor::Performance => weights.performance,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unweighted result of a calculator
#[derive(Debug, Clone, PartialEq)]
pub struct FactorValue {
    pub value: f64,
    pub rationale: String,
}

impl FactorValue {
    fn new(value: f64, rationale: String) -> Self {
        Self {
            value: clamp_unit(value),
            rationale,
        }
    }

    fn vacuous(what: &str) -> Self {
        Self::new(VACUOUS_SCORE, format!("no {} to measure", what))
    }
}

// Pure function: number of files whose estimate exceeds the threshold
fn high_complexity_files(snapshot: &MetricSnapshot, threshold: f64) -> (u64, u64) {
    if !snapshot.files.is_empty() {
        let high = snapshot
            .files
            .iter()
            .filter(|f| f.complexity_estimate() > threshold)
            .count() as u64;
        return (high, snapshot.files.len() as u64);
    }

    // Aggregates only: assume counts are spread evenly across files
    let files = snapshot.file_count as f64;
    let average = complexity_estimate(
        snapshot.function_count as f64 / files,
        snapshot.class_count as f64 / files,
        snapshot.line_count as f64 / files,
    );
    let high = if average > threshold {
        snapshot.file_count
    } else {
        0
    };
    (high, snapshot.file_count)
}

/// `1 - ratio*0.5` where ratio is the share of high-complexity files
pub fn complexity(snapshot: &MetricSnapshot, threshold: f64) -> FactorValue {
    if snapshot.file_count == 0 && snapshot.files.is_empty() {
        return FactorValue::vacuous("files");
    }
    let (high, total) = high_complexity_files(snapshot, threshold);
    let ratio = high as f64 / total as f64;
    FactorValue::new(
        1.0 - ratio * 0.5,
        format!(
            "{} of {} files exceed complexity estimate {}",
            high, total, threshold
        ),
    )
}

/// Share of functions carrying a doc comment
pub fn documentation(snapshot: &MetricSnapshot) -> FactorValue {
    if snapshot.function_count == 0 {
        return FactorValue::vacuous("functions");
    }
    FactorValue::new(
        snapshot.documented_function_count as f64 / snapshot.function_count as f64,
        format!(
            "{} of {} functions documented",
            snapshot.documented_function_count, snapshot.function_count
        ),
    )
}

/// Test functions scaled by `multiplier`, relative to all functions
pub fn testing(snapshot: &MetricSnapshot, multiplier: f64) -> FactorValue {
    if snapshot.function_count == 0 {
        return FactorValue::vacuous("functions");
    }
    FactorValue::new(
        snapshot.test_function_count as f64 * multiplier / snapshot.function_count as f64,
        format!(
            "{} test functions x{} for {} functions",
            snapshot.test_function_count, multiplier, snapshot.function_count
        ),
    )
}

/// Security hits against a per-file risk budget
pub fn security(snapshot: &MetricSnapshot, risk_budget: u64) -> FactorValue {
    let budget = snapshot.file_count.saturating_mul(risk_budget);
    if budget == 0 {
        return FactorValue::vacuous("files");
    }
    FactorValue::new(
        1.0 - snapshot.security_hit_count as f64 / budget as f64,
        format!(
            "{} security pattern hits against a budget of {}",
            snapshot.security_hit_count, budget
        ),
    )
}

/// Baseline plus presence bonuses for pattern counters, capped at 1.0
pub fn pattern_bonus(snapshot: &MetricSnapshot, config: &PatternBonusConfig) -> FactorValue {
    let earned: Vec<_> = config
        .bonuses
        .iter()
        .filter(|rule| snapshot.pattern_count(&rule.counter) >= rule.min_count)
        .collect();
    let bonus: f64 = earned.iter().map(|rule| rule.bonus).sum();

    let rationale = if earned.is_empty() {
        format!("baseline {}", config.baseline)
    } else {
        let names: Vec<&str> = earned.iter().map(|rule| rule.counter.as_str()).collect();
        format!("baseline {} with bonuses for {}", config.baseline, names.join(", "))
    };
    FactorValue::new((config.baseline + bonus).min(1.0), rationale)
}

/// Computes every factor for a snapshot using one configuration
#[derive(Debug, Clone, Default)]
pub struct FactorCalculator {
    config: FactorConfig,
    weights: ScoringWeights,
}

impl FactorCalculator {
    pub fn new(config: FactorConfig, weights: ScoringWeights) -> Self {
        Self { config, weights }
    }

    pub fn value(&self, factor: Factor, snapshot: &MetricSnapshot) -> FactorValue {
        match factor {
            Factor::Complexity => complexity(snapshot, self.config.complexity_threshold),
            Factor::Documentation => documentation(snapshot),
            Factor::Testing => testing(snapshot, self.config.test_multiplier),
            Factor::Security => security(snapshot, self.config.security_risk_budget),
            Factor::Architecture => pattern_bonus(snapshot, &self.config.architecture),
            Factor::Performance => pattern_bonus(snapshot, &self.config.performance),
        }
    }

    pub fn score(&self, factor: Factor, snapshot: &MetricSnapshot) -> FactorScore {
        let FactorValue { value, rationale } = self.value(factor, snapshot);
        FactorScore::new(factor.name(), value, factor.weight(&self.weights), rationale)
    }

    pub fn score_all(&self, snapshot: &MetricSnapshot) -> Vec<FactorScore> {
        Factor::ALL
            .iter()
            .map(|factor| self.score(*factor, snapshot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileCounts;
    use crate::metrics::patterns::{CACHING, DEPENDENCY_INJECTION, MODERN_CONCURRENCY};
    use std::path::PathBuf;

    fn aggregate_snapshot() -> MetricSnapshot {
        MetricSnapshot {
            file_count: 10,
            function_count: 50,
            class_count: 5,
            line_count: 3000,
            documented_function_count: 10,
            test_function_count: 5,
            security_hit_count: 2,
            ..MetricSnapshot::default()
        }
    }

    #[test]
    fn empty_snapshot_scores_perfectly_everywhere_measurable() {
        let empty = MetricSnapshot::default();
        assert_eq!(complexity(&empty, 50.0).value, 1.0);
        assert_eq!(documentation(&empty).value, 1.0);
        assert_eq!(testing(&empty, 5.0).value, 1.0);
        assert_eq!(security(&empty, 2).value, 1.0);
    }

    #[test]
    fn complexity_uses_per_file_estimates() {
        let files = vec![
            FileCounts {
                path: PathBuf::from("big.swift"),
                functions: 20,
                classes: 2,
                lines: 400,
            },
            FileCounts {
                path: PathBuf::from("small.swift"),
                functions: 2,
                classes: 0,
                lines: 40,
            },
        ];
        let snapshot = MetricSnapshot {
            file_count: 2,
            files,
            ..MetricSnapshot::default()
        };
        // big: 40 + 6 + 40 = 86 > 50, small: 4 + 0 + 4 = 8
        assert_eq!(complexity(&snapshot, 50.0).value, 0.75);
    }

    #[test]
    fn complexity_from_aggregates_assumes_even_spread() {
        // average estimate 10 + 1.5 + 30 = 41.5
        assert_eq!(complexity(&aggregate_snapshot(), 50.0).value, 1.0);
        assert_eq!(complexity(&aggregate_snapshot(), 40.0).value, 0.5);
    }

    #[test]
    fn documentation_and_testing_ratios() {
        let snapshot = aggregate_snapshot();
        assert_eq!(documentation(&snapshot).value, 0.2);
        assert_eq!(testing(&snapshot, 5.0).value, 0.5);
        assert_eq!(testing(&snapshot, 10.0).value, 1.0);
        assert_eq!(testing(&snapshot, 100.0).value, 1.0);
    }

    #[test]
    fn security_budget_scales_with_files() {
        assert_eq!(security(&aggregate_snapshot(), 2).value, 0.9);
        assert_eq!(security(&aggregate_snapshot(), 0).value, 1.0);

        let flooded = MetricSnapshot {
            security_hit_count: 500,
            ..aggregate_snapshot()
        };
        assert_eq!(security(&flooded, 2).value, 0.0);
    }

    #[test]
    fn pattern_bonuses_are_capped() {
        let mut snapshot = MetricSnapshot::default();
        let config = PatternBonusConfig::architecture();
        assert_eq!(pattern_bonus(&snapshot, &config).value, 0.8);

        snapshot.pattern_usage.insert(MODERN_CONCURRENCY.to_string(), 12);
        let value = pattern_bonus(&snapshot, &config);
        assert!((value.value - 0.9).abs() < 1e-12);
        assert!(value.rationale.contains(MODERN_CONCURRENCY));

        snapshot.pattern_usage.insert(DEPENDENCY_INJECTION.to_string(), 5);
        let generous = PatternBonusConfig {
            baseline: 0.95,
            ..config
        };
        assert_eq!(pattern_bonus(&snapshot, &generous).value, 1.0);

        snapshot.pattern_usage.insert(CACHING.to_string(), 4);
        let perf = pattern_bonus(&snapshot, &PatternBonusConfig::performance());
        assert_eq!(perf.value, 0.85);
    }

    #[test]
    fn calculator_assigns_configured_weights() {
        let calculator = FactorCalculator::default();
        let scores = calculator.score_all(&aggregate_snapshot());
        let names: Vec<_> = scores.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["complexity", "documentation", "testing", "security", "architecture", "performance"]
        );
        assert_eq!(scores[0].weight, 0.25);
        assert_eq!(scores[5].weight, 0.10);
    }

    #[test]
    fn factor_names_round_trip() {
        for factor in Factor::ALL {
            assert_eq!(Factor::from_name(factor.name()), Some(factor));
        }
    }
}
