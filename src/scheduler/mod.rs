//! Adaptive scheduling of cycles.

pub mod autopilot;
pub mod load;
pub mod lock;
pub mod policy;
pub mod signal;
pub mod state;

pub use autopilot::{Autopilot, CycleOutcome, Phase};
pub use load::{FixedLoad, LoadGauge, SystemLoad};
pub use lock::RunLock;
pub use policy::next_interval;
pub use signal::{raise_on_ctrl_c, StopSignal};
pub use state::ScheduleState;
