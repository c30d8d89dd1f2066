use anyhow::Result;
use clap::Parser;
use debtpilot::cli::{Cli, Commands};
use debtpilot::commands::{self, RunOptions, StatusOptions};
use debtpilot::observability::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            path,
            threshold,
            once,
            config,
            state_dir,
            candidates,
            verbosity,
        } => {
            init_logging(verbosity);
            let options = RunOptions::new(path)
                .threshold(threshold)
                .once(once)
                .config_file(config)
                .state_dir(state_dir)
                .candidates(candidates)
                .validate()?;
            commands::run_project(options)
        }
        Commands::Init { force } => {
            init_logging(0);
            commands::init_config(force)
        }
        Commands::Status {
            path,
            state_dir,
            window,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::show_status(StatusOptions {
                path,
                state_dir,
                window,
            })
        }
    }
}
