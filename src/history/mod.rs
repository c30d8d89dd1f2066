//! Run history: append-only records of every cycle plus back-filled
//! outcomes.

pub mod records;
pub mod store;

pub use records::{success_rate, OutcomeRecord, PendingFailures, RunRecord};
pub use store::{HistoryStore, STATE_DIR_NAME};
