use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative stop flag checked between cycles
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        let (stopped, condvar) = &*self.inner;
        *stopped.lock() = true;
        condvar.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        *self.inner.0.lock()
    }

    /// Sleep up to `timeout`, waking early when raised. Returns whether the
    /// signal is raised.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (stopped, condvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut guard = stopped.lock();
        while !*guard {
            if condvar.wait_until(&mut guard, deadline).timed_out() {
                break;
            }
        }
        *guard
    }
}

/// Raise `signal` on Ctrl-C. The listener runs on its own thread with a
/// single-threaded runtime.
pub fn raise_on_ctrl_c(signal: StopSignal) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    std::thread::Builder::new()
        .name("debtpilot-ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("interrupt received, stopping after the current cycle");
                        signal.raise();
                    }
                    Err(e) => tracing::warn!(error = %e, "cannot listen for ctrl-c"),
                }
            })
        })?;
    Ok(())
}
