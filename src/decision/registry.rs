//! Candidate registries
//!
//! A registry turns a scored report into a list of remediation candidates.
//! The built-in catalog covers the six scored factors; extra candidates can
//! be supplied through a JSON file.

use crate::core::{MetricSnapshot, OptimizationCandidate, QualityReport};
use crate::errors::Error;
use crate::scoring::factors::Factor;
use std::fs;
use std::path::PathBuf;

pub trait CandidateRegistry {
    fn candidates(
        &self,
        report: &QualityReport,
        snapshot: &MetricSnapshot,
    ) -> Vec<OptimizationCandidate>;
}

/// A remediation kind in the built-in catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub action: &'static str,
    pub factor: Factor,
    pub confidence: f64,
    pub priority: u32,
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        action: "replace-insecure-urls",
        factor: Factor::Security,
        confidence: 0.90,
        priority: 5,
    },
    CatalogEntry {
        action: "generate-test-stubs",
        factor: Factor::Testing,
        confidence: 0.87,
        priority: 4,
    },
    CatalogEntry {
        action: "add-doc-comments",
        factor: Factor::Documentation,
        confidence: 0.92,
        priority: 3,
    },
    CatalogEntry {
        action: "split-complex-files",
        factor: Factor::Complexity,
        confidence: 0.72,
        priority: 2,
    },
    CatalogEntry {
        action: "enable-build-cache",
        factor: Factor::Performance,
        confidence: 0.93,
        priority: 2,
    },
    CatalogEntry {
        action: "adopt-structured-concurrency",
        factor: Factor::Architecture,
        confidence: 0.78,
        priority: 1,
    },
];

/// Proposes a catalog entry for every factor below the floor
#[derive(Debug, Clone)]
pub struct CatalogRegistry {
    floor: f64,
}

impl CatalogRegistry {
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }
}

impl CandidateRegistry for CatalogRegistry {
    fn candidates(
        &self,
        report: &QualityReport,
        _snapshot: &MetricSnapshot,
    ) -> Vec<OptimizationCandidate> {
        CATALOG
            .iter()
            .filter_map(|entry| {
                let score = report.factor(entry.factor.name())?;
                (score.value < self.floor).then(|| OptimizationCandidate {
                    id: entry.action.to_string(),
                    action: entry.action.to_string(),
                    confidence: entry.confidence,
                    priority: entry.priority,
                    estimated_impact: score.weight * (1.0 - score.value),
                })
            })
            .collect()
    }
}

/// Reads candidates from a JSON array file on every call
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<OptimizationCandidate>, Error> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            Error::Collection(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Collection(format!("cannot parse {}: {}", self.path.display(), e))
        })
    }
}

impl CandidateRegistry for FileRegistry {
    fn candidates(
        &self,
        _report: &QualityReport,
        _snapshot: &MetricSnapshot,
    ) -> Vec<OptimizationCandidate> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring candidate file");
            Vec::new()
        })
    }
}

/// Concatenates the candidates of several registries in order
#[derive(Default)]
pub struct RegistryChain {
    registries: Vec<Box<dyn CandidateRegistry>>,
}

impl RegistryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, registry: impl CandidateRegistry + 'static) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl CandidateRegistry for RegistryChain {
    fn candidates(
        &self,
        report: &QualityReport,
        snapshot: &MetricSnapshot,
    ) -> Vec<OptimizationCandidate> {
        self.registries
            .iter()
            .flat_map(|r| r.candidates(report, snapshot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FactorConfig, ScoringWeights};
    use crate::scoring::QualityScorer;
    use tempfile::TempDir;

    fn scored() -> (QualityReport, MetricSnapshot) {
        let snapshot = MetricSnapshot {
            file_count: 10,
            function_count: 50,
            class_count: 5,
            line_count: 3000,
            documented_function_count: 10,
            test_function_count: 5,
            security_hit_count: 2,
            ..MetricSnapshot::default()
        };
        let scorer = QualityScorer::new(ScoringWeights::default(), FactorConfig::default()).unwrap();
        (scorer.score(&snapshot), snapshot)
    }

    #[test]
    fn catalog_proposes_lagging_factors_only() {
        let (report, snapshot) = scored();
        let candidates = CatalogRegistry::new(0.80).candidates(&report, &snapshot);
        let actions: Vec<_> = candidates.iter().map(|c| c.action.as_str()).collect();
        assert_eq!(actions, vec!["generate-test-stubs", "add-doc-comments"]);
        assert!((candidates[1].estimated_impact - 0.16).abs() < 1e-12);
    }

    #[test]
    fn file_registry_reads_camel_case_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("candidates.json");
        fs::write(
            &path,
            r#"[{"id":"c1","action":"enable-build-cache","confidence":0.9,"priority":7}]"#,
        )
        .unwrap();

        let (report, snapshot) = scored();
        let candidates = FileRegistry::new(&path).candidates(&report, &snapshot);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].priority, 7);
        assert_eq!(candidates[0].estimated_impact, 0.0);
    }

    #[test]
    fn unreadable_file_yields_no_candidates() {
        let (report, snapshot) = scored();
        let registry = FileRegistry::new("/nonexistent/candidates.json");
        assert!(registry.candidates(&report, &snapshot).is_empty());
    }

    #[test]
    fn chain_concatenates_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("candidates.json");
        fs::write(
            &path,
            r#"[{"id":"extra","action":"noop","confidence":0.5,"priority":0}]"#,
        )
        .unwrap();

        let (report, snapshot) = scored();
        let chain = RegistryChain::new()
            .with(CatalogRegistry::new(0.80))
            .with(FileRegistry::new(&path));
        let ids: Vec<_> = chain
            .candidates(&report, &snapshot)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["generate-test-stubs", "add-doc-comments", "extra"]);
    }
}
