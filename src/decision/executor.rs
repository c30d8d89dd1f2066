//! Action executors
//!
//! Executors perform the side effect behind a candidate. There is no
//! rollback, so every executor must tolerate being called again for an
//! action that already ran.

use crate::config::{ExecutorConfig, ExecutorMode};
use crate::core::OptimizationCandidate;
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait ActionExecutor {
    /// Apply one candidate. Failures are reported as
    /// `Error::ActionApplication` and never abort the batch.
    fn apply(&self, candidate: &OptimizationCandidate) -> Result<()>;
}

/// Logs the action and reports success without touching anything
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl ActionExecutor for DryRunExecutor {
    fn apply(&self, candidate: &OptimizationCandidate) -> Result<()> {
        tracing::info!(
            candidate = %candidate.id,
            action = %candidate.action,
            confidence = candidate.confidence,
            "dry run: would apply action"
        );
        Ok(())
    }
}

/// Runs a configured shell command per action in the project directory
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    project: PathBuf,
    commands: BTreeMap<String, String>,
}

impl CommandExecutor {
    pub fn new(project: PathBuf, commands: BTreeMap<String, String>) -> Self {
        Self { project, commands }
    }

    fn failure(candidate: &OptimizationCandidate, reason: impl Into<String>) -> Error {
        Error::ActionApplication {
            candidate: candidate.id.clone(),
            reason: reason.into(),
        }
    }
}

impl ActionExecutor for CommandExecutor {
    fn apply(&self, candidate: &OptimizationCandidate) -> Result<()> {
        let command = self
            .commands
            .get(&candidate.action)
            .ok_or_else(|| Self::failure(candidate, "no command configured"))?;

        tracing::info!(candidate = %candidate.id, command = %command, "running action command");
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.project)
            .env("DEBTPILOT_CANDIDATE_ID", &candidate.id)
            .env("DEBTPILOT_ACTION", &candidate.action)
            .status()
            .map_err(|e| Self::failure(candidate, format!("failed to spawn command: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(Self::failure(
                candidate,
                format!("command exited with {}", status),
            ))
        }
    }
}

/// Build the executor selected by configuration
pub fn executor_from_config(config: &ExecutorConfig, project: &Path) -> Box<dyn ActionExecutor> {
    match config.mode {
        ExecutorMode::DryRun => Box::new(DryRunExecutor),
        ExecutorMode::Command => Box::new(CommandExecutor::new(
            project.to_path_buf(),
            config.commands.clone(),
        )),
    }
}
