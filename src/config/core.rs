use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::factors::FactorConfig;
use super::scheduler::SchedulerConfig;
use super::scoring::ScoringWeights;
use crate::errors::Error;

/// Default minimum confidence for autonomous application
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.85;

/// Root configuration structure for debtpilot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtpilotConfig {
    /// Scoring weights configuration
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Factor calculator parameters
    #[serde(default)]
    pub factors: FactorConfig,

    /// Decision engine configuration
    #[serde(default)]
    pub decision: DecisionConfig,

    /// Adaptive scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Action executor configuration
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Metrics collector configuration
    #[serde(default)]
    pub collector: CollectorConfig,
}

impl DebtpilotConfig {
    /// Validate the whole configuration. Any problem is a fatal
    /// configuration error; no cycle may run on an invalid config.
    pub fn validate(&self) -> crate::errors::Result<()> {
        let checks = [
            self.scoring.validate(),
            self.factors.validate(),
            self.decision.validate(),
            self.scheduler.validate(),
            self.executor.validate(),
        ];
        let errors: Vec<String> = checks.into_iter().filter_map(|c| c.err()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::configuration(errors.join("; ")))
        }
    }

    /// Apply a CLI-supplied confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(threshold) = threshold {
            self.decision.confidence_threshold = threshold;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

impl DecisionConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_confidence_threshold(self.confidence_threshold)
    }
}

// Pure function: threshold must lie in [0, 1]
pub fn validate_confidence_threshold(threshold: f64) -> std::result::Result<(), String> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(format!(
            "confidence threshold must be between 0.0 and 1.0, got {}",
            threshold
        ))
    }
}

pub fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutorMode {
    /// Log the action and report success without side effects
    #[default]
    DryRun,
    /// Run a configured shell command per action
    Command,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    #[serde(default)]
    pub mode: ExecutorMode,

    /// Shell command per action name
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

impl ExecutorConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self
            .commands
            .iter()
            .find(|(_, command)| command.trim().is_empty())
        {
            Some((action, _)) => Err(format!("command for action '{}' is empty", action)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// File extensions treated as source files
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from collection
    #[serde(default = "default_ignore_patterns")]
    pub ignore: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore: default_ignore_patterns(),
        }
    }
}

pub fn default_extensions() -> Vec<String> {
    ["swift", "kt", "java", "dart", "ts", "tsx", "js", "rs", "py"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_ignore_patterns() -> Vec<String> {
    ["**/build/**", "**/node_modules/**", "**/Pods/**", "**/target/**"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
