use crate::history::HistoryStore;
use crate::output;
use crate::scheduler::ScheduleState;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct StatusOptions {
    pub path: PathBuf,
    pub state_dir: Option<PathBuf>,
    pub window: usize,
}

/// Render the status of a project from its state directory
pub fn project_status(options: &StatusOptions) -> Result<String> {
    let history = match &options.state_dir {
        Some(dir) => HistoryStore::new(dir),
        None => HistoryStore::for_project(&options.path),
    };

    let latest = history.latest().context("Failed to read run history")?;
    let schedule = ScheduleState::load(&history.schedule_path())
        .context("Failed to read schedule state")?;
    let rate = history
        .recent_success_rate(options.window.max(1))
        .context("Failed to read run history")?;

    Ok(output::format_status(latest.as_ref(), schedule.as_ref(), rate))
}

pub fn show_status(options: StatusOptions) -> Result<()> {
    println!("{}", project_status(&options)?);
    Ok(())
}
