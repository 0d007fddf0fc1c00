//! Carousel state machine.
//!
//! Tick-driven like the scheduler: the host calls [`Carousel::tick`] from its
//! loop and autoplay advances against the injected clock. Three distinct
//! pause mechanisms exist:
//! - autoplay off (toggled, or self-disabled after a full forward cycle)
//! - transient pause for 2 seconds after any manual navigation
//! - hover pause, held for as long as the pointer stays over the component

use std::sync::Arc;

use crate::clock::Clock;
use crate::events::Event;
use crate::storage::TimelineConfig;

use super::item::{default_milestones, Milestone};

/// Keyboard bindings understood by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Previous entry.
    Left,
    /// Next entry.
    Right,
    /// Toggle autoplay.
    Space,
}

/// Cursor over a fixed milestone sequence, with autoplay.
pub struct Carousel {
    milestones: Vec<Milestone>,
    active: usize,
    autoplaying: bool,
    hovered: bool,
    /// Transient pause deadline after manual navigation (epoch ms).
    manual_pause_until_ms: Option<u64>,
    next_advance_ms: u64,
    autoplay_interval_ms: u64,
    manual_pause_ms: u64,
    clock: Arc<dyn Clock>,
}

impl Carousel {
    /// Carousel over the canonical milestones, autoplay enabled.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_milestones(clock, default_milestones(), &TimelineConfig::default())
    }

    pub fn with_milestones(
        clock: Arc<dyn Clock>,
        milestones: Vec<Milestone>,
        config: &TimelineConfig,
    ) -> Self {
        assert!(!milestones.is_empty(), "carousel needs at least one entry");
        let next_advance_ms = clock.epoch_ms() + config.autoplay_interval_ms;
        Self {
            milestones,
            active: 0,
            autoplaying: true,
            hovered: false,
            manual_pause_until_ms: None,
            next_advance_ms,
            autoplay_interval_ms: config.autoplay_interval_ms,
            manual_pause_ms: config.manual_pause_ms,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> &Milestone {
        &self.milestones[self.active]
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplaying
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Manual step forward, wrapping at the end.
    pub fn next(&mut self) -> Event {
        self.active = (self.active + 1) % self.milestones.len();
        self.pause_briefly();
        Event::TimelineMoved {
            index: self.active,
            at: self.clock.now(),
        }
    }

    /// Manual step backward, wrapping at the start.
    pub fn prev(&mut self) -> Event {
        self.active = (self.active + self.milestones.len() - 1) % self.milestones.len();
        self.pause_briefly();
        Event::TimelineMoved {
            index: self.active,
            at: self.clock.now(),
        }
    }

    /// Jump to an index (slider or dot). Out-of-range clamps to the end.
    pub fn jump(&mut self, index: usize) -> Event {
        self.active = index.min(self.milestones.len() - 1);
        self.pause_briefly();
        Event::TimelineMoved {
            index: self.active,
            at: self.clock.now(),
        }
    }

    /// Toggle autoplay, clearing any transient pause.
    pub fn toggle_autoplay(&mut self) {
        self.autoplaying = !self.autoplaying;
        self.manual_pause_until_ms = None;
        if self.autoplaying {
            self.next_advance_ms = self.clock.epoch_ms() + self.autoplay_interval_ms;
        }
    }

    /// Pointer entered/left the component.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered && !hovered {
            // Cadence restarts when the pointer leaves.
            self.next_advance_ms = self.clock.epoch_ms() + self.autoplay_interval_ms;
        }
        self.hovered = hovered;
    }

    pub fn handle_key(&mut self, key: NavKey) -> Option<Event> {
        match key {
            NavKey::Left => Some(self.prev()),
            NavKey::Right => Some(self.next()),
            NavKey::Space => {
                self.toggle_autoplay();
                None
            }
        }
    }

    /// Advance autoplay if due. Returns the resulting event, if any.
    ///
    /// When the auto-advance wraps back to index 0 the carousel has shown a
    /// full forward cycle; autoplay disables itself at that point.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.autoplaying || self.hovered {
            return None;
        }

        let now_ms = self.clock.epoch_ms();
        if let Some(until) = self.manual_pause_until_ms {
            if now_ms < until {
                return None;
            }
            // Pause expired: restart the cadence from here.
            self.manual_pause_until_ms = None;
            self.next_advance_ms = now_ms + self.autoplay_interval_ms;
            return None;
        }

        if now_ms < self.next_advance_ms {
            return None;
        }

        self.active = (self.active + 1) % self.milestones.len();
        let at = self.clock.now();
        if self.active == 0 {
            self.autoplaying = false;
            return Some(Event::AutoplayStopped { at });
        }
        self.next_advance_ms = now_ms + self.autoplay_interval_ms;
        Some(Event::TimelineMoved {
            index: self.active,
            at,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn pause_briefly(&mut self) {
        self.manual_pause_until_ms = Some(self.clock.epoch_ms() + self.manual_pause_ms);
    }
}
