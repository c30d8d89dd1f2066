use crate::errors::Result;
use crate::io;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted scheduler state, rewritten once per cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub last_run_at: Option<DateTime<Utc>>,
    pub next_interval_seconds: u64,
    /// Percentage over the recent window, null before the first run
    pub recent_success_rate: Option<f64>,
}

impl ScheduleState {
    pub fn load(path: &Path) -> Result<Option<Self>> {
        io::read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_json_atomically(path, self)
    }

    /// When the next cycle is due, if a run has happened
    pub fn next_run_at(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.next_interval_seconds).ok()?;
        let interval = chrono::TimeDelta::try_seconds(seconds)?;
        self.last_run_at.map(|last| last + interval)
    }
}
