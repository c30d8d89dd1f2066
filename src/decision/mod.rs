//! Confidence-gated decisions over remediation candidates.

pub mod engine;
pub mod executor;
pub mod registry;

pub use engine::{DecisionEngine, CONFIDENCE_OUT_OF_RANGE};
pub use executor::{executor_from_config, ActionExecutor, CommandExecutor, DryRunExecutor};
pub use registry::{CandidateRegistry, CatalogRegistry, FileRegistry, RegistryChain};
