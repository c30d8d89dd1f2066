use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed remediation with an estimated confidence and priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationCandidate {
    pub id: String,
    pub action: String,
    /// Estimated confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Higher values are considered first
    pub priority: u32,
    #[serde(default)]
    pub estimated_impact: f64,
}

impl OptimizationCandidate {
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}

/// Outcome of considering one candidate during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationDecision {
    pub candidate_id: String,
    pub applied: bool,
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Back-filled by the following run, never at creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_score_delta: Option<f64>,
}

impl OptimizationDecision {
    pub fn applied(candidate_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            applied: true,
            applied_at: at,
            failure_reason: None,
            outcome_score_delta: None,
        }
    }

    pub fn failed(candidate_id: &str, at: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            applied: false,
            applied_at: at,
            failure_reason: Some(reason.into()),
            outcome_score_delta: None,
        }
    }

    /// Below threshold: not applied and no failure reason
    pub fn rejected(candidate_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            applied: false,
            applied_at: at,
            failure_reason: None,
            outcome_score_delta: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure_reason.is_some()
    }
}
