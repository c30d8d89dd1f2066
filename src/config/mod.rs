//! Configuration for debtpilot, read from `.debtpilot.toml`.
//!
//! Every field has a serde default so partial files are valid. Validation
//! happens once when the configuration is loaded; the scoring, decision and
//! scheduling code then trusts the values it receives.

pub mod core;
pub mod factors;
pub mod loader;
pub mod scheduler;
pub mod scoring;

pub use self::core::{
    validate_confidence_threshold, CollectorConfig, DebtpilotConfig, DecisionConfig,
    ExecutorConfig, ExecutorMode, DEFAULT_CONFIDENCE_THRESHOLD,
};
pub use factors::{
    BonusRule, FactorConfig, PatternBonusConfig, DEFAULT_COMPLEXITY_THRESHOLD,
    DEFAULT_RECOMMENDATION_FLOOR, DEFAULT_SECURITY_RISK_BUDGET, DEFAULT_TEST_MULTIPLIER,
};
pub use loader::{find_config_file, load_config, parse_and_validate_config, CONFIG_FILE_NAME};
pub use scheduler::SchedulerConfig;
pub use scoring::ScoringWeights;
