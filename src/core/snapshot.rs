//! Raw counted inputs for one analysis run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Counts for a single source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    pub path: PathBuf,
    pub functions: u64,
    pub classes: u64,
    pub lines: u64,
}

impl FileCounts {
    /// Heuristic complexity estimate: `functions*2 + classes*3 + lines/10`
    pub fn complexity_estimate(&self) -> f64 {
        complexity_estimate(self.functions as f64, self.classes as f64, self.lines as f64)
    }
}

pub(crate) fn complexity_estimate(functions: f64, classes: f64, lines: f64) -> f64 {
    functions * 2.0 + classes * 3.0 + lines / 10.0
}

/// Immutable metric snapshot produced once per run by a collector.
///
/// Every count is non-negative and anything that could not be read is
/// represented as zero. `files` carries the per-file breakdown when the
/// collector has one; snapshots built from aggregates alone leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub file_count: u64,
    pub function_count: u64,
    pub class_count: u64,
    pub line_count: u64,
    pub documented_function_count: u64,
    pub test_function_count: u64,
    pub security_hit_count: u64,
    #[serde(default)]
    pub pattern_usage: BTreeMap<String, u64>,
    #[serde(default)]
    pub files: Vec<FileCounts>,
}

impl MetricSnapshot {
    /// Usage count of a named pattern counter, zero when absent
    pub fn pattern_count(&self, name: &str) -> u64 {
        self.pattern_usage.get(name).copied().unwrap_or(0)
    }

    pub fn builder() -> MetricSnapshotBuilder {
        MetricSnapshotBuilder::default()
    }
}

/// Accumulates per-file counts into a snapshot
#[derive(Debug, Default)]
pub struct MetricSnapshotBuilder {
    snapshot: MetricSnapshot,
}

impl MetricSnapshotBuilder {
    pub fn add_file(mut self, file: FileCounts) -> Self {
        self.push_file(file);
        self
    }

    pub fn push_file(&mut self, file: FileCounts) {
        let s = &mut self.snapshot;
        s.file_count += 1;
        s.function_count += file.functions;
        s.class_count += file.classes;
        s.line_count += file.lines;
        s.files.push(file);
    }

    pub fn add_documented_functions(&mut self, count: u64) {
        self.snapshot.documented_function_count += count;
    }

    pub fn add_test_functions(&mut self, count: u64) {
        self.snapshot.test_function_count += count;
    }

    pub fn add_security_hits(&mut self, count: u64) {
        self.snapshot.security_hit_count += count;
    }

    pub fn add_pattern_usage(&mut self, name: &str, count: u64) {
        *self
            .snapshot
            .pattern_usage
            .entry(name.to_string())
            .or_insert(0) += count;
    }

    pub fn build(self) -> MetricSnapshot {
        self.snapshot
    }
}
