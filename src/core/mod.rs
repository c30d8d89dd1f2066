//! Value types shared by scoring, decisions and history.

pub mod optimization;
pub mod report;
pub mod snapshot;

pub use optimization::{OptimizationCandidate, OptimizationDecision};
pub use report::{clamp_unit, FactorScore, QualityReport, REPORT_SCHEMA_VERSION};
pub use snapshot::{FileCounts, MetricSnapshot, MetricSnapshotBuilder};
