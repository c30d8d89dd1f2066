use super::state::{RunOptions, Validated};
use crate::output;
use crate::scheduler::{raise_on_ctrl_c, StopSignal};
use anyhow::{Context, Result};

/// Execute `debtpilot run`. With `once` a single cycle runs; otherwise
/// cycles repeat on the adaptive schedule until interrupted.
pub fn run_project(options: RunOptions<Validated>) -> Result<()> {
    let mut autopilot = options.autopilot()?;

    if options.once {
        let outcome = autopilot.run_cycle().context("Cycle failed")?;
        output::print_cycle_summary(&outcome);
        return Ok(());
    }

    let stop = StopSignal::new();
    raise_on_ctrl_c(stop.clone()).context("Failed to install interrupt handler")?;
    autopilot
        .run_loop(&stop, output::print_cycle_summary)
        .context("Final cycle failed")
}
