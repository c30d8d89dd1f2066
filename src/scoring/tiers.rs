//! Tier classification
//!
//! One `classify` primitive maps a score to a label through an ordered
//! threshold table. The quality scale (0-1) and the health scale (0-100)
//! are just two tables.

/// A label assigned to scores at or above `min_value`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThreshold {
    pub min_value: f64,
    pub label: &'static str,
}

/// Thresholds plus the label for scores below all of them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierTable {
    pub thresholds: &'static [TierThreshold],
    pub fallback: &'static str,
}

pub const QUALITY_TIERS: TierTable = TierTable {
    thresholds: &[
        TierThreshold {
            min_value: 0.95,
            label: "target achieved",
        },
        TierThreshold {
            min_value: 0.90,
            label: "very good",
        },
        TierThreshold {
            min_value: 0.85,
            label: "good",
        },
    ],
    fallback: "needs work",
};

pub const HEALTH_TIERS: TierTable = TierTable {
    thresholds: &[
        TierThreshold {
            min_value: 80.0,
            label: "healthy",
        },
        TierThreshold {
            min_value: 60.0,
            label: "warning",
        },
    ],
    fallback: "critical",
};

/// Label of the highest threshold whose `min_value <= score`.
///
/// Table order does not matter. NaN matches no threshold.
pub fn classify(score: f64, table: &TierTable) -> &'static str {
    table
        .thresholds
        .iter()
        .filter(|t| t.min_value <= score)
        .max_by(|a, b| a.min_value.total_cmp(&b.min_value))
        .map(|t| t.label)
        .unwrap_or(table.fallback)
}

pub fn quality_tier(score: f64) -> &'static str {
    classify(score, &QUALITY_TIERS)
}

pub fn health_status(percentage: f64) -> &'static str {
    classify(percentage, &HEALTH_TIERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_scale_boundaries() {
        assert_eq!(quality_tier(1.0), "target achieved");
        assert_eq!(quality_tier(0.95), "target achieved");
        assert_eq!(quality_tier(0.9499), "very good");
        assert_eq!(quality_tier(0.90), "very good");
        assert_eq!(quality_tier(0.85), "good");
        assert_eq!(quality_tier(0.8499), "needs work");
        assert_eq!(quality_tier(0.0), "needs work");
    }

    #[test]
    fn health_scale_boundaries() {
        assert_eq!(health_status(100.0), "healthy");
        assert_eq!(health_status(80.0), "healthy");
        assert_eq!(health_status(79.9), "warning");
        assert_eq!(health_status(60.0), "warning");
        assert_eq!(health_status(59.9), "critical");
    }

    #[test]
    fn unordered_tables_still_pick_highest_match() {
        static UNORDERED: [TierThreshold; 3] = [
            TierThreshold {
                min_value: 0.2,
                label: "low",
            },
            TierThreshold {
                min_value: 0.8,
                label: "high",
            },
            TierThreshold {
                min_value: 0.5,
                label: "mid",
            },
        ];
        let table = TierTable {
            thresholds: &UNORDERED,
            fallback: "none",
        };
        assert_eq!(classify(0.9, &table), "high");
        assert_eq!(classify(0.6, &table), "mid");
        assert_eq!(classify(0.1, &table), "none");
    }

    #[test]
    fn nan_falls_back() {
        assert_eq!(quality_tier(f64::NAN), "needs work");
        assert_eq!(health_status(f64::NAN), "critical");
    }
}
