//! debtpilot: weighted code health scoring, confidence-gated remediation
//! and an adaptive run scheduler.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod decision;
pub mod errors;
pub mod history;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod output;
pub mod scheduler;
pub mod scoring;

pub use crate::config::DebtpilotConfig;
pub use crate::core::{
    FactorScore, MetricSnapshot, OptimizationCandidate, OptimizationDecision, QualityReport,
};
pub use crate::decision::DecisionEngine;
pub use crate::errors::{Error, Result};
pub use crate::history::{HistoryStore, RunRecord};
pub use crate::scheduler::{Autopilot, ScheduleState, StopSignal};
pub use crate::scoring::QualityScorer;
