use serde::{Deserialize, Serialize};

pub const MIN_INTERVAL_SECS: u64 = 900;
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;
pub const MAX_INTERVAL_SECS: u64 = 14_400;

/// Normalized load (1-minute load average per CPU) above which runs back off
pub const DEFAULT_LOAD_THRESHOLD: f64 = 0.80;

/// Adaptive scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,

    #[serde(default = "default_default_interval_secs")]
    pub default_interval_secs: u64,

    #[serde(default = "default_max_interval_secs")]
    pub max_interval_secs: u64,

    #[serde(default = "default_load_threshold")]
    pub load_threshold: f64,

    /// Number of recent run records the success rate is computed over
    #[serde(default = "default_success_window")]
    pub success_window: usize,

    /// Success rate (percent) below which the longest interval is used
    #[serde(default = "default_low_success_rate")]
    pub low_success_rate: f64,

    /// Success rate (percent) above which the shortest interval is used
    #[serde(default = "default_high_success_rate")]
    pub high_success_rate: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval_secs(),
            default_interval_secs: default_default_interval_secs(),
            max_interval_secs: default_max_interval_secs(),
            load_threshold: default_load_threshold(),
            success_window: default_success_window(),
            low_success_rate: default_low_success_rate(),
            high_success_rate: default_high_success_rate(),
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_interval_secs == 0 {
            return Err("min_interval_secs must be greater than zero".to_string());
        }
        if !(self.min_interval_secs <= self.default_interval_secs
            && self.default_interval_secs <= self.max_interval_secs)
        {
            return Err(format!(
                "intervals must satisfy min <= default <= max, got {} / {} / {}",
                self.min_interval_secs, self.default_interval_secs, self.max_interval_secs
            ));
        }
        if !self.load_threshold.is_finite() || self.load_threshold < 0.0 {
            return Err(format!(
                "load_threshold must be a non-negative number, got {}",
                self.load_threshold
            ));
        }
        if self.success_window == 0 {
            return Err("success_window must be at least 1".to_string());
        }
        let in_percent = |v: f64| (0.0..=100.0).contains(&v);
        if !(in_percent(self.low_success_rate)
            && in_percent(self.high_success_rate)
            && self.low_success_rate <= self.high_success_rate)
        {
            return Err(format!(
                "success rate bounds must satisfy 0 <= low <= high <= 100, got {} / {}",
                self.low_success_rate, self.high_success_rate
            ));
        }
        Ok(())
    }
}

pub fn default_min_interval_secs() -> u64 {
    MIN_INTERVAL_SECS
}
pub fn default_default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}
pub fn default_max_interval_secs() -> u64 {
    MAX_INTERVAL_SECS
}
pub fn default_load_threshold() -> f64 {
    DEFAULT_LOAD_THRESHOLD
}
pub fn default_success_window() -> usize {
    10
}
pub fn default_low_success_rate() -> f64 {
    70.0
}
pub fn default_high_success_rate() -> f64 {
    95.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SchedulerConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_intervals_are_rejected() {
        let config = SchedulerConfig {
            min_interval_secs: 7200,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = SchedulerConfig {
            success_window: 0,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
