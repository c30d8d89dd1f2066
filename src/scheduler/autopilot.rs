//! The run loop
//!
//! A cycle is: collect, score, decide, persist, reschedule. Cycles run
//! strictly one after another; the stop signal is only consulted between
//! them, so a cycle that has started always finishes.

use super::lock::RunLock;
use super::load::{LoadGauge, SystemLoad};
use super::policy::next_interval;
use super::signal::StopSignal;
use super::state::ScheduleState;
use crate::config::{DebtpilotConfig, SchedulerConfig};
use crate::decision::{
    executor_from_config, ActionExecutor, CandidateRegistry, CatalogRegistry, DecisionEngine,
};
use crate::errors::{Error, Result};
use crate::history::{HistoryStore, RunRecord};
use crate::metrics::{MetricsCollector, TextMetricsCollector};
use crate::scoring::QualityScorer;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// What one completed cycle produced
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub record: RunRecord,
    pub schedule: ScheduleState,
}

pub struct Autopilot {
    project: PathBuf,
    scorer: QualityScorer,
    engine: DecisionEngine,
    collector: Box<dyn MetricsCollector>,
    registry: Box<dyn CandidateRegistry>,
    executor: Box<dyn ActionExecutor>,
    load: Box<dyn LoadGauge>,
    history: HistoryStore,
    scheduler: SchedulerConfig,
    phase: Phase,
}

impl Autopilot {
    /// Build from a validated configuration with the default collector,
    /// catalog registry, configured executor and system load gauge.
    pub fn new(project: &Path, config: &DebtpilotConfig, history: HistoryStore) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            project: project.to_path_buf(),
            scorer: QualityScorer::new(config.scoring.clone(), config.factors.clone())?,
            engine: DecisionEngine::new(config.decision.confidence_threshold)?,
            collector: Box::new(TextMetricsCollector::new(config.collector.clone())),
            registry: Box::new(CatalogRegistry::new(config.factors.recommendation_floor)),
            executor: executor_from_config(&config.executor, project),
            load: Box::new(SystemLoad),
            history,
            scheduler: config.scheduler.clone(),
            phase: Phase::Idle,
        })
    }

    pub fn with_collector(mut self, collector: impl MetricsCollector + 'static) -> Self {
        self.collector = Box::new(collector);
        self
    }

    pub fn with_registry(mut self, registry: impl CandidateRegistry + 'static) -> Self {
        self.registry = Box::new(registry);
        self
    }

    pub fn with_executor(mut self, executor: impl ActionExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    pub fn with_load_gauge(mut self, load: impl LoadGauge + 'static) -> Self {
        self.load = Box::new(load);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Run one cycle under the run lock.
    ///
    /// Any failure once the cycle owns the lock, including one after its
    /// record was written, is persisted and reported in the
    /// `failed_cycles_before` of the next record.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        if self.phase == Phase::Running {
            return Err(Error::RunInProgress(self.history.lock_path()));
        }
        self.phase = Phase::Running;

        let result = match RunLock::open(&self.history.lock_path()) {
            Ok(mut lock) => lock.exclusive(|| {
                let result = self.cycle();
                if let Err(e) = &result {
                    self.count_failed_cycle(e);
                }
                result
            }),
            Err(e) => {
                self.count_failed_cycle(&e);
                Err(e)
            }
        };
        self.phase = Phase::Idle;

        match &result {
            Err(Error::RunInProgress(path)) => {
                tracing::warn!(lock = %path.display(), "another run holds the lock, skipping cycle");
            }
            Err(e) => tracing::error!(error = %e, "cycle failed"),
            Ok(outcome) => tracing::info!(
                sequence = outcome.record.sequence,
                overall_score = outcome.record.report.overall_score,
                tier = %outcome.record.report.tier,
                interval_secs = outcome.schedule.next_interval_seconds,
                "cycle complete"
            ),
        }
        result
    }

    fn count_failed_cycle(&self, error: &Error) {
        match self.history.record_failed_cycle() {
            Ok(pending) => tracing::debug!(error = %error, pending, "failed cycle counted"),
            Err(e) => tracing::warn!(error = %e, "could not count failed cycle"),
        }
    }

    fn cycle(&self) -> Result<CycleOutcome> {
        let snapshot = self.collector.collect(&self.project);
        let report = self.scorer.score(&snapshot);
        tracing::debug!(overall_score = report.overall_score, tier = %report.tier, "scored");

        let candidates = self.registry.candidates(&report, &snapshot);
        let decisions = self.engine.decide(candidates, self.executor.as_ref());
        let record = self.history.append(report, decisions)?;

        let rate = self
            .history
            .recent_success_rate(self.scheduler.success_window)?;
        let load = self.load.normalized_load();
        let schedule = ScheduleState {
            last_run_at: Some(Utc::now()),
            next_interval_seconds: next_interval(&self.scheduler, rate, load),
            recent_success_rate: rate,
        };
        schedule.save(&self.history.schedule_path())?;

        Ok(CycleOutcome { record, schedule })
    }

    /// Run cycles until `stop` is raised, handing each completed cycle to
    /// `on_cycle`. Returns the error of the final cycle if it failed;
    /// configuration errors end the loop at once.
    pub fn run_loop(
        &mut self,
        stop: &StopSignal,
        mut on_cycle: impl FnMut(&CycleOutcome),
    ) -> Result<()> {
        let mut last = Ok(());
        while !stop.is_raised() {
            let interval = match self.run_cycle() {
                Ok(outcome) => {
                    on_cycle(&outcome);
                    last = Ok(());
                    outcome.schedule.next_interval_seconds
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(Error::RunInProgress(_)) => {
                    last = Ok(());
                    self.scheduler.default_interval_secs
                }
                Err(e) => {
                    last = Err(e);
                    self.scheduler.default_interval_secs
                }
            };

            tracing::info!(interval_secs = interval, "sleeping until next cycle");
            if stop.wait_timeout(Duration::from_secs(interval)) {
                break;
            }
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetricSnapshot;
    use crate::decision::DryRunExecutor;
    use crate::metrics::StaticCollector;
    use crate::scheduler::FixedLoad;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    /// Unblocks `schedule.json` from the second collection on
    struct HealingCollector {
        blocked: PathBuf,
        calls: Cell<u32>,
    }

    impl MetricsCollector for HealingCollector {
        fn collect(&self, _project: &Path) -> MetricSnapshot {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() > 1 && self.blocked.is_dir() {
                fs::remove_dir(&self.blocked).unwrap();
            }
            MetricSnapshot::default()
        }
    }

    fn autopilot(temp: &TempDir) -> Autopilot {
        let history = HistoryStore::new(temp.path().join("state"));
        Autopilot::new(temp.path(), &DebtpilotConfig::default(), history)
            .unwrap()
            .with_collector(StaticCollector::new(MetricSnapshot::default()))
            .with_executor(DryRunExecutor)
            .with_load_gauge(FixedLoad(0.0))
    }

    #[test]
    fn first_cycle_uses_success_rate_of_itself() {
        let temp = TempDir::new().unwrap();
        let mut pilot = autopilot(&temp);

        let outcome = pilot.run_cycle().unwrap();
        assert_eq!(outcome.record.sequence, 1);
        assert_eq!(outcome.schedule.recent_success_rate, Some(100.0));
        assert_eq!(outcome.schedule.next_interval_seconds, 900);
        assert_eq!(pilot.phase(), Phase::Idle);

        let saved = ScheduleState::load(&pilot.history().schedule_path())
            .unwrap()
            .unwrap();
        assert_eq!(saved, outcome.schedule);
    }

    #[test]
    fn loop_does_not_start_when_already_stopped() {
        let temp = TempDir::new().unwrap();
        let mut pilot = autopilot(&temp);
        let stop = StopSignal::new();
        stop.raise();

        pilot.run_loop(&stop, |_| panic!("no cycle expected")).unwrap();
        assert!(pilot.history().latest().unwrap().is_none());
    }

    #[test]
    fn loop_stops_after_the_cycle_that_raised_the_signal() {
        let temp = TempDir::new().unwrap();
        let mut pilot = autopilot(&temp);
        let stop = StopSignal::new();

        let mut cycles = 0;
        pilot
            .run_loop(&stop, |_| {
                cycles += 1;
                stop.raise();
            })
            .unwrap();
        assert_eq!(cycles, 1);
        assert_eq!(pilot.history().load_all().unwrap().len(), 1);
    }

    #[test]
    fn lock_held_elsewhere_skips_the_cycle() {
        let temp = TempDir::new().unwrap();
        let mut pilot = autopilot(&temp);
        let mut other = RunLock::open(&pilot.history().lock_path()).unwrap();

        let result = other.exclusive(|| Ok(pilot.run_cycle()));
        assert!(matches!(result, Ok(Err(Error::RunInProgress(_)))));
        assert!(pilot.history().latest().unwrap().is_none());
    }

    #[test]
    fn failure_after_the_record_is_counted_across_restarts() {
        let temp = TempDir::new().unwrap();
        autopilot(&temp).run_cycle().unwrap();

        let mut pilot = autopilot(&temp);
        let schedule = pilot.history().schedule_path();
        fs::remove_file(&schedule).unwrap();
        fs::create_dir(&schedule).unwrap();
        let err = pilot.run_cycle().unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(pilot.history().load_all().unwrap().len(), 2);
        drop(pilot);

        fs::remove_dir(&schedule).unwrap();
        let outcome = autopilot(&temp).run_cycle().unwrap();
        assert_eq!(outcome.record.sequence, 3);
        assert_eq!(outcome.record.failed_cycles_before, 1);
        // three recorded successes over four attempts
        assert_eq!(outcome.schedule.recent_success_rate, Some(75.0));
        assert_eq!(outcome.schedule.next_interval_seconds, 3600);
    }

    #[test]
    fn loop_recovers_from_a_failed_cycle() {
        let temp = TempDir::new().unwrap();
        let mut config = DebtpilotConfig::default();
        config.scheduler.min_interval_secs = 1;
        config.scheduler.default_interval_secs = 1;
        config.scheduler.max_interval_secs = 1;
        let history = HistoryStore::new(temp.path().join("state"));
        let blocked = history.schedule_path();
        fs::create_dir_all(&blocked).unwrap();

        let mut pilot = Autopilot::new(temp.path(), &config, history)
            .unwrap()
            .with_collector(HealingCollector {
                blocked,
                calls: Cell::new(0),
            })
            .with_executor(DryRunExecutor)
            .with_load_gauge(FixedLoad(0.0));
        let stop = StopSignal::new();

        let mut completed = Vec::new();
        let result = pilot.run_loop(&stop, |outcome| {
            completed.push(outcome.clone());
            stop.raise();
        });

        assert!(result.is_ok());
        assert_eq!(completed.len(), 1);
        let second = &completed[0];
        assert_eq!(second.record.sequence, 2);
        assert_eq!(second.record.failed_cycles_before, 1);
        let rate = second.schedule.recent_success_rate.unwrap();
        assert!(rate < 100.0, "rate {}", rate);
    }
}
