//! Counter engine implementation.
//!
//! The engine is a plain state holder: it owns no timers. The caller (in
//! practice [`crate::runner::StatsRunner`] via the scheduler) invokes one
//! update method per counter at its own cadence; every mutation is written
//! back to the key-value store immediately.
//!
//! Storage failures never propagate out of the engine -- reads fall back to
//! freshly computed defaults and writes are logged and dropped, so the
//! counters keep ticking no matter what the disk does.

use std::sync::Arc;

use chrono::Timelike;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use super::state::{CounterState, PersistedSnapshot};
use crate::clock::{Clock, SystemClock};
use crate::daypart::{self, is_business_hours, is_weekend};
use crate::events::Event;
use crate::sentiment::SentimentBias;
use crate::storage::{CountersConfig, KvStore};

/// Key under which the counter snapshot is persisted.
pub const SNAPSHOT_KEY: &str = "realistic_counters_state";
/// Key under which the last hourly-reset hour is persisted.
pub const RESET_HOUR_KEY: &str = "last_hourly_reset";

/// Engine maintaining the simulated live-statistic values.
pub struct CounterEngine {
    state: CounterState,
    sentiment: SentimentBias,
    config: CountersConfig,
    clock: Arc<dyn Clock>,
    rng: Mcg128Xsl64,
    store: Box<dyn KvStore>,
    /// Instant of the last volume update, for the elapsed-minutes rate.
    last_volume_update_ms: u64,
    /// Events produced since the last poll.
    pending: Vec<Event>,
}

impl CounterEngine {
    /// Create an engine on the system clock with an entropy-seeded RNG.
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self::with_parts(
            store,
            Arc::new(SystemClock),
            Mcg128Xsl64::from_entropy(),
            CountersConfig::default(),
        )
    }

    /// Create an engine with an explicit clock and seed (tests, simulations).
    pub fn with_seed(store: Box<dyn KvStore>, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self::with_parts(
            store,
            clock,
            Mcg128Xsl64::seed_from_u64(seed),
            CountersConfig::default(),
        )
    }

    pub fn with_parts(
        store: Box<dyn KvStore>,
        clock: Arc<dyn Clock>,
        rng: Mcg128Xsl64,
        config: CountersConfig,
    ) -> Self {
        let mut engine = Self {
            state: CounterState {
                training_searches: 0,
                anxiety_searches: 0,
                unprepared_pct: 0.0,
            },
            sentiment: SentimentBias::neutral(),
            config,
            clock,
            rng,
            store,
            last_volume_update_ms: 0,
            pending: Vec::new(),
        };
        engine.initialize();
        engine
    }

    /// Restore from a fresh snapshot, or regenerate defaults, then run the
    /// hourly-reset check once.
    fn initialize(&mut self) {
        let now = self.clock.now();
        self.last_volume_update_ms = self.clock.epoch_ms();

        match self.load_snapshot() {
            Some((counters, age_ms)) if age_ms < self.staleness_ms() => {
                tracing::debug!(age_ms, "restored counter snapshot");
                self.state = counters;
                self.push(Event::SnapshotRestored { age_ms, at: now });
            }
            Some((_, age_ms)) => {
                tracing::debug!(age_ms, "snapshot stale, regenerating defaults");
                self.state = CounterState::initial(&now, &mut self.rng);
                self.push(Event::SnapshotDiscarded { age_ms, at: now });
            }
            None => {
                self.state = CounterState::initial(&now, &mut self.rng);
            }
        }

        self.check_hourly_reset();
        self.persist();
    }

    fn staleness_ms(&self) -> u64 {
        self.config.staleness_minutes * 60 * 1000
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    pub fn sentiment(&self) -> &SentimentBias {
        &self.sentiment
    }

    pub fn ceiling(&self) -> f64 {
        self.config.ceiling
    }

    /// Drain events produced since the last poll.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply sentiment multipliers. Clamped into range on the way in.
    pub fn set_sentiment(&mut self, bias: SentimentBias) -> Event {
        let bias = bias.clamped();
        let event = Event::SentimentApplied {
            anxiety_multiplier: bias.ai_anxiety_multiplier,
            interest_multiplier: bias.training_interest_multiplier,
            context: bias.news_context.clone(),
            at: self.clock.now(),
        };
        self.sentiment = bias;
        self.push(event.clone());
        event
    }

    /// Advance the volume counter by the rate-scaled elapsed time.
    ///
    /// Expected increment = rate/min x minutes since the last call, scaled by
    /// the interest multiplier; realized increment adds +/-30% jitter and is
    /// floored at zero, so the counter never moves backward.
    pub fn update_volume(&mut self) -> Event {
        let now = self.clock.now();
        let now_ms = self.clock.epoch_ms();
        let elapsed_min =
            now_ms.saturating_sub(self.last_volume_update_ms) as f64 / 60_000.0;
        self.last_volume_update_ms = now_ms;

        let rate = daypart::volume_rate_per_min(&now)
            * self.sentiment.training_interest_multiplier;
        let expected = rate * elapsed_min;
        let increment = daypart::jittered(expected, 30.0, &mut self.rng).max(0.0);
        let delta = increment.round() as u64;

        self.state.training_searches += delta;
        self.persist();

        let event = Event::VolumeUpdated {
            delta,
            value: self.state.training_searches,
            at: now,
        };
        self.push(event.clone());
        event
    }

    /// Advance the anxiety counter by a small probabilistic draw.
    pub fn update_anxiety(&mut self) -> Event {
        let now = self.clock.now();
        let hour = now.hour();

        let mut increment = if is_business_hours(&now) {
            if self.rng.gen_bool(0.8) {
                self.rng.gen_range(1..=3) as f64
            } else {
                0.0
            }
        } else if (6..=22).contains(&hour) {
            if self.rng.gen_bool(0.4) {
                self.rng.gen_range(1..=2) as f64
            } else {
                0.0
            }
        } else if self.rng.gen_bool(0.1) {
            1.0
        } else {
            0.0
        };

        if is_weekend(&now) {
            increment *= 0.5;
        }
        let delta = (increment * self.sentiment.ai_anxiety_multiplier).round() as u64;

        self.state.anxiety_searches += delta;
        self.persist();

        let event = Event::AnxietyUpdated {
            delta,
            value: self.state.anxiety_searches,
            at: now,
        };
        self.push(event.clone());
        event
    }

    /// Nudge the unprepared percentage. Only moves during business hours,
    /// saturating at the configured ceiling.
    pub fn update_unprepared(&mut self) -> Option<Event> {
        let now = self.clock.now();
        if !is_business_hours(&now) {
            return None;
        }

        let increment = if self.rng.gen_bool(0.15) { 0.01 } else { 0.0 };
        self.state.unprepared_pct =
            (self.state.unprepared_pct + increment).min(self.config.ceiling);
        self.persist();

        let event = Event::UnpreparedUpdated {
            value: self.state.unprepared_pct,
            at: now,
        };
        self.push(event.clone());
        Some(event)
    }

    /// Re-seed the anxiety baseline once per observed hour transition.
    ///
    /// The marker is persisted, so reloads within the same hour are no-ops.
    pub fn check_hourly_reset(&mut self) -> Option<Event> {
        let now = self.clock.now();
        let current_hour = now.hour();
        let last_reset_hour = match self.store.get(RESET_HOUR_KEY) {
            Ok(value) => value.and_then(|v| v.parse::<u32>().ok()).unwrap_or(0),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read hourly-reset marker");
                0
            }
        };

        if current_hour == last_reset_hour {
            return None;
        }

        if let Err(err) = self.store.set(RESET_HOUR_KEY, &current_hour.to_string()) {
            tracing::warn!(error = %err, "failed to persist hourly-reset marker");
        }
        self.state.anxiety_searches = CounterState::anxiety_baseline(&mut self.rng);
        self.persist();

        let event = Event::AnxietyBaselineReset {
            hour: current_hour,
            value: self.state.anxiety_searches,
            at: now,
        };
        self.push(event.clone());
        Some(event)
    }

    /// Read the persisted counters without constructing an engine.
    ///
    /// Unlike construction this has no side effects: nothing is written back
    /// and the hourly-reset check does not run. Returns the counters and the
    /// snapshot age in milliseconds, or `None` when no usable snapshot
    /// exists.
    pub fn peek(store: &dyn KvStore, clock: &dyn Clock) -> Option<(CounterState, u64)> {
        let raw = match store.get(SNAPSHOT_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read counter snapshot");
                return None;
            }
        };
        let snapshot: PersistedSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "corrupt counter snapshot, ignoring");
                return None;
            }
        };
        let age_ms = clock.epoch_ms().saturating_sub(snapshot.timestamp);
        Some((snapshot.counters, age_ms))
    }

    /// Counters for display: the persisted snapshot when present, otherwise
    /// freshly generated defaults. Nothing is written back either way.
    pub fn peek_or_default(store: &dyn KvStore, clock: &dyn Clock) -> CounterState {
        match Self::peek(store, clock) {
            Some((counters, _)) => counters,
            None => CounterState::initial(&clock.now(), &mut Mcg128Xsl64::from_entropy()),
        }
    }

    /// Remove the persisted snapshot and marker.
    pub fn clear_persisted(store: &mut dyn KvStore) {
        for key in [SNAPSHOT_KEY, RESET_HOUR_KEY] {
            if let Err(err) = store.delete(key) {
                tracing::warn!(error = %err, key, "failed to delete persisted key");
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load_snapshot(&mut self) -> Option<(CounterState, u64)> {
        Self::peek(self.store.as_ref(), self.clock.as_ref())
    }

    fn persist(&mut self) {
        let snapshot = PersistedSnapshot {
            counters: self.state.clone(),
            timestamp: self.clock.epoch_ms(),
        };
        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize counter snapshot");
                return;
            }
        };
        if let Err(err) = self.store.set(SNAPSHOT_KEY, &raw) {
            tracing::warn!(error = %err, "failed to persist counter snapshot");
        }
    }

    fn push(&mut self, event: Event) {
        self.pending.push(event);
    }
}
