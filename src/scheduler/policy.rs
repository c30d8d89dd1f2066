use crate::config::SchedulerConfig;

/// Interval before the next cycle.
///
/// The success rate picks the base interval: below the low bound backs off
/// to the maximum, above the high bound tightens to the minimum, anything
/// else (including no history) uses the default. Load above the threshold
/// doubles the base, capped at the maximum.
pub fn next_interval(config: &SchedulerConfig, success_rate: Option<f64>, load: f64) -> u64 {
    let base = match success_rate {
        Some(rate) if rate < config.low_success_rate => config.max_interval_secs,
        Some(rate) if rate > config.high_success_rate => config.min_interval_secs,
        _ => config.default_interval_secs,
    };

    if load > config.load_threshold {
        base.saturating_mul(2).min(config.max_interval_secs)
    } else {
        base
    }
}
