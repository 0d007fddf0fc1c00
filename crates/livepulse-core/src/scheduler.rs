//! Repeating-callback scheduler keyed by task name.
//!
//! Tick-driven, like the timer engine style of this codebase: the scheduler
//! owns no threads, the caller invokes [`Scheduler::tick`] from its own loop
//! and due callbacks fire inline. That keeps every firing deterministic under
//! a [`ManualClock`](crate::clock::ManualClock).
//!
//! ## Contract
//!
//! - At most one task per name; re-registering a name replaces the prior task.
//! - While active, each task fires whenever its deadline has passed, then
//!   re-arms one interval ahead.
//! - Deactivation disarms everything immediately: zero callbacks fire until
//!   reactivation, at which point deadlines restart from the activation
//!   instant.
//! - Dropping the scheduler cancels everything unconditionally.

use std::fmt;
use std::sync::Arc;

use crate::clock::Clock;

/// Floor applied to degenerate (zero) intervals.
pub const MIN_INTERVAL_MS: u64 = 250;

struct TimerTask<Ctx> {
    name: String,
    interval_ms: u64,
    next_due_ms: u64,
    callback: Box<dyn FnMut(&mut Ctx) + Send>,
}

/// Owned collection of named repeating timers sharing one context.
pub struct Scheduler<Ctx> {
    clock: Arc<dyn Clock>,
    tasks: Vec<TimerTask<Ctx>>,
    active: bool,
}

impl<Ctx> Scheduler<Ctx> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tasks: Vec::new(),
            active: false,
        }
    }

    /// Register a repeating task. Replaces any existing task with the same
    /// name; a zero interval falls back to [`MIN_INTERVAL_MS`].
    pub fn register(
        &mut self,
        name: impl Into<String>,
        interval_ms: u64,
        callback: impl FnMut(&mut Ctx) + Send + 'static,
    ) {
        let name = name.into();
        let interval_ms = interval_ms.max(MIN_INTERVAL_MS);
        self.tasks.retain(|t| t.name != name);
        let next_due_ms = self.clock.epoch_ms() + interval_ms;
        self.tasks.push(TimerTask {
            name,
            interval_ms,
            next_due_ms,
            callback: Box::new(callback),
        });
    }

    /// Cancel the task with the given name. Returns whether one existed.
    pub fn cancel(&mut self, name: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.name != name);
        self.tasks.len() != before
    }

    /// Switch the scheduler on or off. Activation re-arms every deadline
    /// from the current instant; deactivation stops all firing immediately.
    pub fn set_active(&mut self, active: bool) {
        if active && !self.active {
            let now = self.clock.epoch_ms();
            for task in &mut self.tasks {
                task.next_due_ms = now + task.interval_ms;
            }
        }
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fire every due task. Returns the number of callbacks invoked.
    ///
    /// Ordering between tasks due on the same tick is registration order and
    /// is not part of the contract.
    pub fn tick(&mut self, ctx: &mut Ctx) -> usize {
        if !self.active {
            return 0;
        }
        let now = self.clock.epoch_ms();
        let mut fired = 0;
        for task in &mut self.tasks {
            if now >= task.next_due_ms {
                (task.callback)(ctx);
                task.next_due_ms = now + task.interval_ms;
                fired += 1;
            }
        }
        fired
    }
}

impl<Ctx> fmt::Debug for Scheduler<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("active", &self.active)
            .field("tasks", &self.task_names())
            .finish()
    }
}
