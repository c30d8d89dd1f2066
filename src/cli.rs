use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "debtpilot")]
#[command(about = "Weighted code health scoring with confidence-gated remediation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a project, apply confident remediations and keep running on
    /// an adaptive schedule
    Run {
        /// Project directory
        path: PathBuf,

        /// Minimum confidence for applying a candidate (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Run a single cycle and exit
        #[arg(long)]
        once: bool,

        /// Configuration file (defaults to the nearest .debtpilot.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for run history and schedule state
        #[arg(long = "state-dir", env = "DEBTPILOT_STATE_DIR")]
        state_dir: Option<PathBuf>,

        /// JSON file with additional candidates
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        /// -v: Show cycle progress
        /// -vv: Show scoring and decision details
        /// -vvv: Show all debug information
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show the latest report and schedule of a project
    Status {
        /// Project directory
        path: PathBuf,

        /// Directory for run history and schedule state
        #[arg(long = "state-dir", env = "DEBTPILOT_STATE_DIR")]
        state_dir: Option<PathBuf>,

        /// Number of recent runs the success rate covers
        #[arg(long, default_value = "10")]
        window: usize,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}
