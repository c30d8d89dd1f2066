use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the persisted report schema
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// One normalized dimension of code health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: String,
    /// Always within [0.0, 1.0]
    pub value: f64,
    pub weight: f64,
    #[serde(default)]
    pub rationale: String,
}

impl FactorScore {
    /// Build a factor score, clamping `value` into [0, 1]. NaN becomes 0.
    pub fn new(name: impl Into<String>, value: f64, weight: f64, rationale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: clamp_unit(value),
            weight,
            rationale: rationale.into(),
        }
    }
}

/// Clamp into [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Persisted result of one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub timestamp: DateTime<Utc>,
    pub factors: Vec<FactorScore>,
    pub overall_score: f64,
    /// Label on the 0-1 quality scale
    pub tier: String,
    /// Label on the 0-100 health scale
    #[serde(default)]
    pub health_status: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

fn default_schema_version() -> u32 {
    REPORT_SCHEMA_VERSION
}

impl QualityReport {
    pub fn factor(&self, name: &str) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.name == name)
    }

    /// Overall score on the 0-100 health scale
    pub fn health_percentage(&self) -> f64 {
        self.overall_score * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_values_are_clamped() {
        assert_eq!(FactorScore::new("x", 1.7, 0.1, "").value, 1.0);
        assert_eq!(FactorScore::new("x", -0.2, 0.1, "").value, 0.0);
        assert_eq!(FactorScore::new("x", f64::NAN, 0.1, "").value, 0.0);
        assert_eq!(FactorScore::new("x", f64::INFINITY, 0.1, "").value, 1.0);
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let report = QualityReport {
            schema_version: REPORT_SCHEMA_VERSION,
            timestamp: Utc::now(),
            factors: vec![FactorScore::new("documentation", 0.5, 0.2, "5/10 documented")],
            overall_score: 0.5,
            tier: "needs work".to_string(),
            health_status: "critical".to_string(),
            recommendations: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("overallScore").is_some());
        assert!(json.get("schemaVersion").is_some());
        assert_eq!(json["factors"][0]["name"], "documentation");
        assert_eq!(json["factors"][0]["weight"], 0.2);
    }
}
