use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// Hosts poll for events (the CLI prints them as JSON lines while running).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The volume counter advanced.
    VolumeUpdated {
        delta: u64,
        value: u64,
        at: DateTime<Utc>,
    },
    /// The anxiety counter advanced.
    AnxietyUpdated {
        delta: u64,
        value: u64,
        at: DateTime<Utc>,
    },
    /// The unprepared percentage crept up (or saturated at its ceiling).
    UnpreparedUpdated {
        value: f64,
        at: DateTime<Utc>,
    },
    /// The anxiety counter was re-seeded on an hour transition.
    AnxietyBaselineReset {
        hour: u32,
        value: u64,
        at: DateTime<Utc>,
    },
    /// A persisted snapshot was loaded and used verbatim.
    SnapshotRestored {
        age_ms: u64,
        at: DateTime<Utc>,
    },
    /// A persisted snapshot was too old and defaults were regenerated.
    SnapshotDiscarded {
        age_ms: u64,
        at: DateTime<Utc>,
    },
    /// Fresh sentiment multipliers were applied to the engine.
    SentimentApplied {
        anxiety_multiplier: f64,
        interest_multiplier: f64,
        context: String,
        at: DateTime<Utc>,
    },
    /// The timeline cursor moved (autoplay or manual).
    TimelineMoved {
        index: usize,
        at: DateTime<Utc>,
    },
    /// Autoplay completed a full forward cycle and disabled itself.
    AutoplayStopped {
        at: DateTime<Utc>,
    },
    /// The scheduler was switched on with the given number of tasks armed.
    SchedulerActivated {
        tasks: usize,
        at: DateTime<Utc>,
    },
    /// The scheduler was switched off; no further callbacks fire.
    SchedulerDeactivated {
        at: DateTime<Utc>,
    },
}
