//! CLI command implementations.
//!
//! - **run**: score a project and apply confident candidates, once or on
//!   the adaptive schedule
//! - **init**: write a default `.debtpilot.toml`
//! - **status**: show the latest report and schedule state
//!
//! Run options follow a type-state pattern so only validated
//! configurations can start a cycle.

pub mod init;
pub mod run;
pub mod state;
pub mod status;

pub use init::init_config;
pub use run::run_project;
pub use state::{RunOptions, Unvalidated, Validated};
pub use status::{show_status, StatusOptions};
