//! Wiring between the scheduler and the counter engine.
//!
//! Four tasks drive the display: the two search counters at heuristic,
//! traffic-scaled cadences, the percentage on a slow fixed cadence, and a
//! once-a-minute hourly-reset check. The host maps its visibility flag onto
//! [`StatsRunner::set_visible`] and calls [`StatsRunner::tick`] from its loop.

use std::sync::Arc;

use crate::clock::Clock;
use crate::counters::CounterEngine;
use crate::daypart;
use crate::events::Event;
use crate::scheduler::Scheduler;
use crate::storage::IntervalsConfig;

pub const TASK_VOLUME: &str = "training_searches";
pub const TASK_ANXIETY: &str = "anxiety_searches";
pub const TASK_UNPREPARED: &str = "unprepared_pct";
pub const TASK_HOURLY: &str = "hourly_check";

/// Owns a [`CounterEngine`] and the scheduler that drives it.
pub struct StatsRunner {
    engine: CounterEngine,
    scheduler: Scheduler<CounterEngine>,
    clock: Arc<dyn Clock>,
    pending: Vec<Event>,
}

impl StatsRunner {
    /// Register the four canonical tasks. The volume and anxiety intervals
    /// are scaled to the traffic bucket at construction time.
    pub fn new(engine: CounterEngine, clock: Arc<dyn Clock>, intervals: &IntervalsConfig) -> Self {
        let now = clock.now();
        let mut scheduler = Scheduler::new(clock.clone());

        scheduler.register(
            TASK_VOLUME,
            daypart::interval_for(intervals.volume_base_ms, &now),
            |engine: &mut CounterEngine| {
                engine.update_volume();
            },
        );
        scheduler.register(
            TASK_ANXIETY,
            daypart::interval_for(intervals.anxiety_base_ms, &now),
            |engine: &mut CounterEngine| {
                engine.update_anxiety();
            },
        );
        scheduler.register(
            TASK_UNPREPARED,
            intervals.unprepared_ms,
            |engine: &mut CounterEngine| {
                engine.update_unprepared();
            },
        );
        scheduler.register(
            TASK_HOURLY,
            intervals.hourly_check_ms,
            |engine: &mut CounterEngine| {
                engine.check_hourly_reset();
            },
        );

        Self {
            engine,
            scheduler,
            clock,
            pending: Vec::new(),
        }
    }

    /// Map the host's visibility flag onto the scheduler lifecycle.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.scheduler.is_active() {
            return;
        }
        self.scheduler.set_active(visible);
        let at = self.clock.now();
        self.pending.push(if visible {
            Event::SchedulerActivated {
                tasks: self.scheduler.len(),
                at,
            }
        } else {
            Event::SchedulerDeactivated { at }
        });
    }

    pub fn is_visible(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Fire due tasks; returns the number of callbacks invoked.
    pub fn tick(&mut self) -> usize {
        self.scheduler.tick(&mut self.engine)
    }

    pub fn engine(&self) -> &CounterEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CounterEngine {
        &mut self.engine
    }

    /// Drain events from the engine plus scheduler lifecycle notices.
    pub fn take_events(&mut self) -> Vec<Event> {
        let mut events = std::mem::take(&mut self.pending);
        events.extend(self.engine.take_events());
        events
    }

    pub fn into_engine(self) -> CounterEngine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::counters::RESET_HOUR_KEY;
    use crate::storage::{KvStore, MemoryStore};
    use chrono::{Duration, TimeZone, Utc};

    fn runner_at_hour(hour: u32) -> (StatsRunner, Arc<ManualClock>) {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let mut store = MemoryStore::new();
        store.set(RESET_HOUR_KEY, &hour.to_string()).unwrap();
        let engine = CounterEngine::with_seed(Box::new(store), clock.clone(), 7);
        let runner = StatsRunner::new(engine, clock.clone(), &IntervalsConfig::default());
        (runner, clock)
    }

    #[test]
    fn registers_all_four_tasks() {
        let (runner, _clock) = runner_at_hour(10);
        let mut names = runner.scheduler.task_names();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![TASK_ANXIETY, TASK_HOURLY, TASK_VOLUME, TASK_UNPREPARED]
        );
    }

    #[test]
    fn invisible_runner_does_not_tick() {
        let (mut runner, clock) = runner_at_hour(10);
        clock.advance(Duration::minutes(5));
        assert_eq!(runner.tick(), 0);
    }

    #[test]
    fn visible_runner_advances_counters() {
        let (mut runner, clock) = runner_at_hour(10);
        runner.set_visible(true);
        runner.engine_mut().take_events();

        let before = runner.engine().state().training_searches;
        // Peak-hour volume interval is 4s; plenty of ticks in a minute.
        for _ in 0..30 {
            clock.advance(Duration::seconds(2));
            runner.tick();
        }
        let after = runner.engine().state().training_searches;
        assert!(after >= before);
        assert!(!runner.take_events().is_empty());
    }

    #[test]
    fn hiding_freezes_counters() {
        let (mut runner, clock) = runner_at_hour(10);
        runner.set_visible(true);
        for _ in 0..10 {
            clock.advance(Duration::seconds(4));
            runner.tick();
        }

        runner.set_visible(false);
        let frozen = runner.engine().state().clone();
        clock.advance(Duration::minutes(30));
        assert_eq!(runner.tick(), 0);
        assert_eq!(runner.engine().state(), &frozen);
    }
}
