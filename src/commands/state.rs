//! Type-state pattern for validating run options before execution
//!
//! A `RunOptions<Unvalidated>` carries raw CLI input. Validation resolves
//! the configuration file, applies the CLI threshold and checks every
//! value; only a `RunOptions<Validated>` can build an autopilot.

use std::marker::PhantomData;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{load_config, DebtpilotConfig};
use crate::decision::{CatalogRegistry, FileRegistry, RegistryChain};
use crate::history::HistoryStore;
use crate::scheduler::Autopilot;

/// Marker type representing unvalidated state
#[derive(Debug, Clone, Copy)]
pub struct Unvalidated;

/// Marker type representing validated state
#[derive(Debug, Clone, Copy)]
pub struct Validated;

#[derive(Debug, Clone)]
pub struct RunOptions<State = Unvalidated> {
    pub path: PathBuf,
    pub threshold: Option<f64>,
    pub once: bool,
    pub config_file: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub candidates: Option<PathBuf>,
    config: DebtpilotConfig,
    _state: PhantomData<State>,
}

impl RunOptions<Unvalidated> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            threshold: None,
            once: false,
            config_file: None,
            state_dir: None,
            candidates: None,
            config: DebtpilotConfig::default(),
            _state: PhantomData,
        }
    }

    pub fn threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn config_file(mut self, config_file: Option<PathBuf>) -> Self {
        self.config_file = config_file;
        self
    }

    pub fn state_dir(mut self, state_dir: Option<PathBuf>) -> Self {
        self.state_dir = state_dir;
        self
    }

    pub fn candidates(mut self, candidates: Option<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Resolve and validate the configuration. Every failure here is a
    /// configuration error and no cycle runs.
    pub fn validate(self) -> Result<RunOptions<Validated>> {
        if !self.path.is_dir() {
            anyhow::bail!("Project path {} is not a directory", self.path.display());
        }

        let config = load_config(self.config_file.as_deref(), &self.path)
            .context("Failed to load configuration")?
            .with_confidence_threshold(self.threshold);
        config.validate().context("Invalid configuration")?;

        Ok(RunOptions {
            path: self.path,
            threshold: self.threshold,
            once: self.once,
            config_file: self.config_file,
            state_dir: self.state_dir,
            candidates: self.candidates,
            config,
            _state: PhantomData,
        })
    }
}

impl RunOptions<Validated> {
    pub fn config(&self) -> &DebtpilotConfig {
        &self.config
    }

    pub fn history(&self) -> HistoryStore {
        match &self.state_dir {
            Some(dir) => HistoryStore::new(dir),
            None => HistoryStore::for_project(&self.path),
        }
    }

    /// Autopilot with the catalog registry plus the optional candidate file
    pub fn autopilot(&self) -> Result<Autopilot> {
        let mut registry =
            RegistryChain::new().with(CatalogRegistry::new(self.config.factors.recommendation_floor));
        if let Some(file) = &self.candidates {
            registry = registry.with(FileRegistry::new(file));
        }
        let autopilot = Autopilot::new(&self.path, &self.config, self.history())?;
        Ok(autopilot.with_registry(registry))
    }
}
