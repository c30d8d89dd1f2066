use super::factors::Factor;
use crate::config::FactorConfig;
use crate::core::{FactorScore, MetricSnapshot};

/// One recommendation per factor below the floor, largest weighted gap first
pub fn recommendations(
    factors: &[FactorScore],
    snapshot: &MetricSnapshot,
    config: &FactorConfig,
) -> Vec<String> {
    let mut lagging: Vec<(Factor, &FactorScore)> = factors
        .iter()
        .filter(|f| f.value < config.recommendation_floor)
        .filter_map(|f| Factor::from_name(&f.name).map(|factor| (factor, f)))
        .collect();

    lagging.sort_by(|(_, a), (_, b)| weighted_gap(b).total_cmp(&weighted_gap(a)));

    lagging
        .into_iter()
        .map(|(factor, score)| recommend(factor, score, snapshot, config))
        .collect()
}

fn weighted_gap(score: &FactorScore) -> f64 {
    score.weight * (1.0 - score.value)
}

// Smallest count reaching `fraction` of `total`
fn needed(fraction: f64, total: u64) -> u64 {
    (fraction * total as f64).ceil() as u64
}

fn recommend(
    factor: Factor,
    score: &FactorScore,
    snapshot: &MetricSnapshot,
    config: &FactorConfig,
) -> String {
    let floor = config.recommendation_floor;
    let floor_pct = floor * 100.0;
    match factor {
        Factor::Complexity => format!(
            "Split or simplify large files: {} (score {:.2})",
            score.rationale, score.value
        ),
        Factor::Documentation => {
            let missing = needed(floor, snapshot.function_count)
                .saturating_sub(snapshot.documented_function_count);
            format!(
                "Document {} more functions to reach {:.0}% documentation coverage (score {:.2})",
                missing, floor_pct, score.value
            )
        }
        Factor::Testing => {
            let target = needed(floor / config.test_multiplier, snapshot.function_count);
            let missing = target.saturating_sub(snapshot.test_function_count);
            format!(
                "Add {} more test functions to reach the {:.0}% testing target (score {:.2})",
                missing, floor_pct, score.value
            )
        }
        Factor::Security => format!(
            "Replace insecure URLs and hard-coded credentials: {} (score {:.2})",
            score.rationale, score.value
        ),
        Factor::Architecture => format!(
            "Adopt structured concurrency and dependency injection: {} (score {:.2})",
            score.rationale, score.value
        ),
        Factor::Performance => format!(
            "Introduce lazy initialization and caching on hot paths: {} (score {:.2})",
            score.rationale, score.value
        ),
    }
}
