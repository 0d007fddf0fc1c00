//! Simulated "live" statistics.
//!
//! Three counters back the on-page stats: a volume counter ("AI training"
//! searches), an anxiety counter ("will AI replace me?" searches this hour)
//! and a slowly creeping unprepared percentage. The engine owns their state,
//! applies time-of-day heuristics and the sentiment bias, and persists a
//! snapshot after every mutation.

mod engine;
mod format;
mod state;

pub use engine::{CounterEngine, RESET_HOUR_KEY, SNAPSHOT_KEY};
pub use format::format_number;
pub use state::{CounterState, PersistedSnapshot};
