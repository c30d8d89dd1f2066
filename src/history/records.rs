use crate::core::{OptimizationDecision, QualityReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted cycle: the report and every decision made in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub sequence: u64,
    pub report: QualityReport,
    pub decisions: Vec<OptimizationDecision>,
    /// No decision in the batch carries a failure reason
    pub succeeded: bool,
    /// Cycles that failed between the previous record and this one
    #[serde(default)]
    pub failed_cycles_before: u32,
}

impl RunRecord {
    pub fn new(
        sequence: u64,
        report: QualityReport,
        decisions: Vec<OptimizationDecision>,
        failed_cycles_before: u32,
    ) -> Self {
        let succeeded = !decisions.iter().any(OptimizationDecision::is_failure);
        Self {
            sequence,
            report,
            decisions,
            succeeded,
            failed_cycles_before,
        }
    }

    pub fn applied_any(&self) -> bool {
        self.decisions.iter().any(|d| d.applied)
    }

    pub fn applied_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.applied).count()
    }

    /// Cycles this record accounts for, including the failed ones before it
    pub fn attempts(&self) -> u64 {
        1 + u64::from(self.failed_cycles_before)
    }

    /// Attach a back-filled delta to every applied decision
    pub(crate) fn with_outcome(mut self, delta: f64) -> Self {
        for decision in self.decisions.iter_mut().filter(|d| d.applied) {
            decision.outcome_score_delta = Some(delta);
        }
        self
    }
}

/// Score change observed by the run after `sequence`. Written once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
    pub sequence: u64,
    pub outcome_score_delta: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Failed cycles not yet folded into a record. The count belongs to the
/// record after `after_sequence`; a newer record makes it stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFailures {
    pub after_sequence: u64,
    pub failed_cycles: u32,
}

impl PendingFailures {
    /// Count owed to the record following `last_sequence`
    pub fn owed_after(&self, last_sequence: u64) -> u32 {
        if self.after_sequence == last_sequence {
            self.failed_cycles
        } else {
            0
        }
    }

    /// The pending count after one more failed cycle
    pub fn incremented(self, last_sequence: u64) -> Self {
        Self {
            after_sequence: last_sequence,
            failed_cycles: self.owed_after(last_sequence).saturating_add(1),
        }
    }
}

/// Percentage of successful cycles among `records`, `None` when empty
pub fn success_rate(records: &[RunRecord]) -> Option<f64> {
    let attempts: u64 = records.iter().map(RunRecord::attempts).sum();
    if attempts == 0 {
        return None;
    }
    let succeeded = records.iter().filter(|r| r.succeeded).count() as f64;
    Some(100.0 * succeeded / attempts as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FactorConfig, ScoringWeights};
    use crate::core::MetricSnapshot;
    use crate::scoring::QualityScorer;

    fn report() -> QualityReport {
        QualityScorer::new(ScoringWeights::default(), FactorConfig::default())
            .unwrap()
            .score(&MetricSnapshot::default())
    }

    fn record(succeeded: bool, failed_before: u32) -> RunRecord {
        let now = Utc::now();
        let decisions = if succeeded {
            vec![OptimizationDecision::applied("a", now)]
        } else {
            vec![OptimizationDecision::failed("a", now, "boom")]
        };
        RunRecord::new(0, report(), decisions, failed_before)
    }

    #[test]
    fn pending_failures_go_stale_after_a_newer_record() {
        let pending = PendingFailures::default().incremented(3).incremented(3);
        assert_eq!(pending.owed_after(3), 2);
        assert_eq!(pending.owed_after(4), 0);

        let restarted = pending.incremented(4);
        assert_eq!(restarted, PendingFailures { after_sequence: 4, failed_cycles: 1 });
    }

    #[test]
    fn success_follows_failure_reasons() {
        assert!(record(true, 0).succeeded);
        assert!(!record(false, 0).succeeded);

        let rejected_only = RunRecord::new(
            0,
            report(),
            vec![OptimizationDecision::rejected("r", Utc::now())],
            0,
        );
        assert!(rejected_only.succeeded);
        assert!(!rejected_only.applied_any());
    }

    #[test]
    fn rate_counts_unpersisted_failures() {
        assert_eq!(success_rate(&[]), None);
        assert_eq!(success_rate(&[record(true, 0), record(false, 0)]), Some(50.0));
        // 2 successes over 2 + 2 attempts
        assert_eq!(success_rate(&[record(true, 2), record(true, 0)]), Some(50.0));
    }

    #[test]
    fn outcome_is_attached_to_applied_decisions_only() {
        let now = Utc::now();
        let record = RunRecord::new(
            1,
            report(),
            vec![
                OptimizationDecision::applied("a", now),
                OptimizationDecision::rejected("b", now),
            ],
            0,
        )
        .with_outcome(0.05);
        assert_eq!(record.decisions[0].outcome_score_delta, Some(0.05));
        assert_eq!(record.decisions[1].outcome_score_delta, None);
    }
}
