use std::fs;

const LOADAVG_PATH: &str = "/proc/loadavg";

/// Source of the normalized system load (1-minute average per CPU)
pub trait LoadGauge {
    fn normalized_load(&self) -> f64;
}

/// Reads `/proc/loadavg`; reports 0.0 where it is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoad;

impl LoadGauge for SystemLoad {
    fn normalized_load(&self) -> f64 {
        match fs::read_to_string(LOADAVG_PATH)
            .ok()
            .as_deref()
            .and_then(parse_loadavg)
        {
            Some(load) => normalize(load, num_cpus::get()),
            None => {
                tracing::debug!("system load unavailable, assuming idle");
                0.0
            }
        }
    }
}

/// Constant load, for tests and fixed environments
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLoad(pub f64);

impl LoadGauge for FixedLoad {
    fn normalized_load(&self) -> f64 {
        self.0
    }
}

// Pure function: first field of /proc/loadavg
fn parse_loadavg(contents: &str) -> Option<f64> {
    contents
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|load| load.is_finite() && *load >= 0.0)
}

fn normalize(load: f64, cpus: usize) -> f64 {
    load / cpus.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_field() {
        assert_eq!(parse_loadavg("1.50 0.80 0.40 2/345 6789\n"), Some(1.5));
        assert_eq!(parse_loadavg(""), None);
        assert_eq!(parse_loadavg("abc"), None);
    }

    #[test]
    fn normalizes_by_cpu_count() {
        assert_eq!(normalize(4.0, 8), 0.5);
        assert_eq!(normalize(1.0, 0), 1.0);
    }

    #[test]
    fn system_load_is_never_negative() {
        assert!(SystemLoad.normalized_load() >= 0.0);
    }
}
