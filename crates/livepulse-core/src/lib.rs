//! # Livepulse Core Library
//!
//! This library provides the core logic behind the "live statistics" widgets:
//! simulated counters that follow time-of-day traffic heuristics, a named
//! repeating-timer scheduler, an interactive history timeline, and the
//! boundary to the remote market-sentiment provider.
//!
//! ## Architecture
//!
//! - **Counter Engine**: a plain state holder; the caller drives it by
//!   invoking one update method per counter, and every mutation is written
//!   through to a key-value snapshot
//! - **Scheduler**: tick-driven repeating callbacks keyed by task name --
//!   no internal threads, the caller invokes `tick()` from its own loop
//! - **Timeline**: cursor over a fixed milestone list with autoplay
//! - **Storage**: SQLite key-value snapshots and TOML-based configuration
//!
//! All wall-clock and randomness access is injected ([`Clock`], seeded
//! [`rand_pcg`] RNG) so every heuristic is deterministically testable.
//!
//! ## Key Components
//!
//! - [`CounterEngine`]: counter state machine and persistence
//! - [`Scheduler`]: named repeating-callback manager
//! - [`StatsRunner`]: the canonical four-task wiring
//! - [`Carousel`]: interactive timeline state machine
//! - [`SentimentClient`]: sentiment provider boundary

pub mod clock;
pub mod counters;
pub mod daypart;
pub mod error;
pub mod events;
pub mod runner;
pub mod scheduler;
pub mod sentiment;
pub mod storage;
pub mod timeline;

pub use clock::{Clock, ManualClock, SystemClock};
pub use counters::{format_number, CounterEngine, CounterState, PersistedSnapshot};
pub use daypart::DayPart;
pub use error::{ConfigError, CoreError, Result, SentimentError, StorageError};
pub use events::Event;
pub use runner::StatsRunner;
pub use scheduler::Scheduler;
pub use sentiment::{SentimentBias, SentimentClient};
pub use storage::{Config, KvStore, MemoryStore, StatsDb};
pub use timeline::{Carousel, Milestone, NavKey};
