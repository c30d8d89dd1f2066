//! Append-only run history on disk
//!
//! Layout under the state directory:
//!
//! ```text
//! runs/00000001.json       one RunRecord per cycle, never rewritten
//! outcomes/00000001.json   the single back-filled outcome for run 1
//! latest-report.json       report of the newest run
//! schedule.json            scheduler state
//! pending-failures.json    failed cycles owed to the next record
//! run.lock                 cross-process run lock
//! ```

use super::records::{success_rate, OutcomeRecord, PendingFailures, RunRecord};
use crate::core::{OptimizationDecision, QualityReport};
use crate::errors::{Error, Result};
use crate::io;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Default state directory name inside the project
pub const STATE_DIR_NAME: &str = ".debtpilot";

const RUNS_DIR: &str = "runs";
const OUTCOMES_DIR: &str = "outcomes";
const LATEST_REPORT_FILE: &str = "latest-report.json";
const SCHEDULE_FILE: &str = "schedule.json";
const PENDING_FAILURES_FILE: &str = "pending-failures.json";
const LOCK_FILE: &str = "run.lock";

#[derive(Debug, Clone)]
pub struct HistoryStore {
    state_dir: PathBuf,
}

fn record_file_name(sequence: u64) -> String {
    format!("{:08}.json", sequence)
}

// Pure function: sequence number encoded in a record file name
fn parse_sequence(path: &Path) -> Option<u64> {
    if path.extension()? != "json" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

impl HistoryStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    /// Store rooted at `<project>/.debtpilot`
    pub fn for_project(project: &Path) -> Self {
        Self::new(project.join(STATE_DIR_NAME))
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn record_path(&self, sequence: u64) -> PathBuf {
        self.state_dir
            .join(RUNS_DIR)
            .join(record_file_name(sequence))
    }

    pub fn outcome_path(&self, sequence: u64) -> PathBuf {
        self.state_dir
            .join(OUTCOMES_DIR)
            .join(record_file_name(sequence))
    }

    pub fn latest_report_path(&self) -> PathBuf {
        self.state_dir.join(LATEST_REPORT_FILE)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.state_dir.join(SCHEDULE_FILE)
    }

    pub fn pending_failures_path(&self) -> PathBuf {
        self.state_dir.join(PENDING_FAILURES_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join(LOCK_FILE)
    }

    /// Sequence numbers present on disk, ascending
    fn sequences(&self) -> Result<Vec<u64>> {
        let dir = self.state_dir.join(RUNS_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::persistence_io("Failed to list run history", &dir, e)),
        };

        let mut sequences: Vec<u64> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| parse_sequence(&entry.path()))
            .collect();
        sequences.sort_unstable();
        Ok(sequences)
    }

    pub fn next_sequence(&self) -> Result<u64> {
        Ok(self.sequences()?.last().map_or(1, |last| last + 1))
    }

    pub fn outcome(&self, sequence: u64) -> Result<Option<OutcomeRecord>> {
        io::read_json(&self.outcome_path(sequence))
    }

    fn load_record(&self, sequence: u64) -> Option<RunRecord> {
        let path = self.record_path(sequence);
        let record = match io::read_json::<RunRecord>(&path) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable run record");
                return None;
            }
        };

        match self.outcome(sequence) {
            Ok(Some(outcome)) => Some(record.with_outcome(outcome.outcome_score_delta)),
            Ok(None) => Some(record),
            Err(e) => {
                tracing::warn!(sequence, error = %e, "ignoring unreadable outcome");
                Some(record)
            }
        }
    }

    /// Every readable record in sequence order, with outcomes folded in.
    /// Corrupt records are logged and skipped.
    pub fn load_all(&self) -> Result<Vec<RunRecord>> {
        Ok(self
            .sequences()?
            .into_iter()
            .filter_map(|sequence| self.load_record(sequence))
            .collect())
    }

    pub fn latest(&self) -> Result<Option<RunRecord>> {
        Ok(self
            .sequences()?
            .into_iter()
            .rev()
            .find_map(|sequence| self.load_record(sequence)))
    }

    /// Readable records among the newest `window` sequences, oldest first
    pub fn recent(&self, window: usize) -> Result<Vec<RunRecord>> {
        let sequences = self.sequences()?;
        let skip = sequences.len().saturating_sub(window);
        Ok(sequences[skip..]
            .iter()
            .filter_map(|sequence| self.load_record(*sequence))
            .collect())
    }

    /// Success percentage over the newest `window` records
    pub fn recent_success_rate(&self, window: usize) -> Result<Option<f64>> {
        Ok(success_rate(&self.recent(window)?))
    }

    fn pending_failures(&self) -> PendingFailures {
        let path = self.pending_failures_path();
        match io::read_json::<PendingFailures>(&path) {
            Ok(pending) => pending.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable pending failures");
                PendingFailures::default()
            }
        }
    }

    /// Failed cycles that the next appended record will account for
    pub fn pending_failed_cycles(&self) -> Result<u32> {
        let last = self.sequences()?.last().copied().unwrap_or(0);
        Ok(self.pending_failures().owed_after(last))
    }

    /// Count one failed cycle against the next record. Survives restarts.
    pub fn record_failed_cycle(&self) -> Result<u32> {
        let last = self.sequences()?.last().copied().unwrap_or(0);
        let pending = self.pending_failures().incremented(last);
        io::write_json_atomically(&self.pending_failures_path(), &pending)?;
        Ok(pending.failed_cycles)
    }

    /// Record the score delta observed after run `sequence`. A second
    /// back-fill for the same run is a history violation.
    pub fn backfill_outcome(&self, sequence: u64, delta: f64) -> Result<()> {
        if !self.record_path(sequence).is_file() {
            return Err(Error::HistoryViolation(format!(
                "no run record {} to back-fill",
                sequence
            )));
        }

        let outcome = OutcomeRecord {
            sequence,
            outcome_score_delta: delta,
            recorded_at: Utc::now(),
        };
        io::create_json_exclusively(&self.outcome_path(sequence), &outcome).map_err(|e| match e {
            Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::AlreadyExists => {
                Error::HistoryViolation(format!("outcome for run {} already recorded", sequence))
            }
            other => other,
        })
    }

    /// Back-fill the previous run if it applied anything and has no outcome
    fn backfill_previous(&self, previous: &RunRecord, report: &QualityReport) -> Result<()> {
        if !previous.applied_any() || self.outcome(previous.sequence)?.is_some() {
            return Ok(());
        }
        let delta = report.overall_score - previous.report.overall_score;
        tracing::debug!(sequence = previous.sequence, delta, "back-filling outcome");
        match self.backfill_outcome(previous.sequence, delta) {
            Err(Error::HistoryViolation(message)) => {
                tracing::warn!(%message, "outcome already back-filled");
                Ok(())
            }
            other => other,
        }
    }

    /// Persist one cycle as a new record. The immediately preceding run's
    /// outcome is back-filled first, then the record is written with
    /// create-new semantics, then `latest-report.json` is replaced.
    ///
    /// Failed cycles counted since the preceding run are folded into the
    /// record's `failed_cycles_before`.
    pub fn append(
        &self,
        report: QualityReport,
        decisions: Vec<OptimizationDecision>,
    ) -> Result<RunRecord> {
        let last = self.sequences()?.last().copied();
        if let Some(previous) = last.and_then(|sequence| self.load_record(sequence)) {
            self.backfill_previous(&previous, &report)?;
        }

        let sequence = last.map_or(1, |last| last + 1);
        let failed_cycles_before = self.pending_failures().owed_after(last.unwrap_or(0));
        let record = RunRecord::new(sequence, report, decisions, failed_cycles_before);
        let path = self.record_path(sequence);
        io::create_json_exclusively(&path, &record).map_err(|e| match e {
            Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::AlreadyExists => {
                Error::HistoryViolation(format!("run record {} already exists", sequence))
            }
            other => other,
        })?;
        io::write_json_atomically(&self.latest_report_path(), &record.report)?;

        tracing::info!(
            sequence,
            overall_score = record.report.overall_score,
            succeeded = record.succeeded,
            "run recorded"
        );
        Ok(record)
    }

    /// Report of the newest run, as persisted in `latest-report.json`
    pub fn latest_report(&self) -> Result<Option<QualityReport>> {
        io::read_json(&self.latest_report_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FactorConfig, ScoringWeights};
    use crate::core::MetricSnapshot;
    use crate::scoring::QualityScorer;
    use tempfile::TempDir;

    fn empty_report() -> QualityReport {
        QualityScorer::new(ScoringWeights::default(), FactorConfig::default())
            .unwrap()
            .score(&MetricSnapshot::default())
    }

    #[test]
    fn parses_only_record_file_names() {
        assert_eq!(parse_sequence(Path::new("runs/00000012.json")), Some(12));
        assert_eq!(parse_sequence(Path::new("runs/.00000012.json.42.tmp")), None);
        assert_eq!(parse_sequence(Path::new("runs/notes.txt")), None);
    }

    #[test]
    fn empty_store_has_no_history() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        assert_eq!(store.next_sequence().unwrap(), 1);
        assert!(store.latest().unwrap().is_none());
        assert_eq!(store.recent_success_rate(10).unwrap(), None);
    }

    #[test]
    fn corrupt_records_are_skipped() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        fs::create_dir_all(temp.path().join(RUNS_DIR)).unwrap();
        fs::write(store.record_path(1), "{not json").unwrap();

        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.next_sequence().unwrap(), 2);
    }

    #[test]
    fn recent_loads_only_the_window() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        fs::create_dir_all(temp.path().join(RUNS_DIR)).unwrap();
        fs::write(store.record_path(1), "{not json").unwrap();
        fs::write(store.record_path(2), "{not json").unwrap();
        store.append(empty_report(), Vec::new()).unwrap();

        let recent = store.recent(1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].sequence, 3);
        assert_eq!(store.recent(2).unwrap().len(), 1);
    }

    #[test]
    fn failed_cycles_persist_until_the_next_record() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        assert_eq!(store.pending_failed_cycles().unwrap(), 0);
        assert_eq!(store.record_failed_cycle().unwrap(), 1);

        let reopened = HistoryStore::new(temp.path());
        assert_eq!(reopened.record_failed_cycle().unwrap(), 2);
        assert_eq!(reopened.pending_failed_cycles().unwrap(), 2);
    }

    #[test]
    fn corrupt_previous_record_blocks_backfill_onto_older_runs() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        let applied = || vec![OptimizationDecision::applied("add-doc-comments", Utc::now())];
        store.append(empty_report(), applied()).unwrap();
        store.append(empty_report(), applied()).unwrap();
        fs::remove_file(store.outcome_path(1)).unwrap();
        fs::write(store.record_path(2), "{not json").unwrap();

        let third = store.append(empty_report(), Vec::new()).unwrap();
        assert_eq!(third.sequence, 3);
        assert!(store.outcome(1).unwrap().is_none());
        assert!(store.outcome(2).unwrap().is_none());
    }

    #[test]
    fn backfill_requires_existing_record() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        assert!(matches!(
            store.backfill_outcome(3, 0.1),
            Err(Error::HistoryViolation(_))
        ));
    }
}
