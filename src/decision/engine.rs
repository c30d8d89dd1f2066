use super::executor::ActionExecutor;
use crate::config::validate_confidence_threshold;
use crate::core::{OptimizationCandidate, OptimizationDecision};
use crate::errors::{Error, Result};
use chrono::Utc;

pub const CONFIDENCE_OUT_OF_RANGE: &str = "confidence out of range";

/// Confidence-gated application of candidates
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    threshold: f64,
}

impl DecisionEngine {
    pub fn new(threshold: f64) -> Result<Self> {
        validate_confidence_threshold(threshold).map_err(Error::configuration)?;
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Stable order: priority descending, then confidence descending
    pub fn order(mut candidates: Vec<OptimizationCandidate>) -> Vec<OptimizationCandidate> {
        candidates.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });
        candidates
    }

    /// Decide every candidate in order. Executor failures are recorded and
    /// never stop the batch.
    pub fn decide<E>(
        &self,
        candidates: Vec<OptimizationCandidate>,
        executor: &E,
    ) -> Vec<OptimizationDecision>
    where
        E: ActionExecutor + ?Sized,
    {
        Self::order(candidates)
            .iter()
            .map(|candidate| self.decide_one(candidate, executor))
            .collect()
    }

    fn decide_one<E>(&self, candidate: &OptimizationCandidate, executor: &E) -> OptimizationDecision
    where
        E: ActionExecutor + ?Sized,
    {
        let now = Utc::now();
        if !candidate.has_valid_confidence() {
            tracing::warn!(
                candidate = %candidate.id,
                confidence = candidate.confidence,
                "rejecting candidate with invalid confidence"
            );
            return OptimizationDecision::failed(&candidate.id, now, CONFIDENCE_OUT_OF_RANGE);
        }

        if candidate.confidence < self.threshold {
            tracing::debug!(
                candidate = %candidate.id,
                confidence = candidate.confidence,
                threshold = self.threshold,
                "below confidence threshold"
            );
            return OptimizationDecision::rejected(&candidate.id, now);
        }

        match executor.apply(candidate) {
            Ok(()) => {
                tracing::info!(candidate = %candidate.id, action = %candidate.action, "applied");
                OptimizationDecision::applied(&candidate.id, now)
            }
            Err(e) => {
                let reason = match e {
                    Error::ActionApplication { reason, .. } => reason,
                    other => other.to_string(),
                };
                tracing::warn!(candidate = %candidate.id, reason = %reason, "action failed");
                OptimizationDecision::failed(&candidate.id, now, reason)
            }
        }
    }
}
