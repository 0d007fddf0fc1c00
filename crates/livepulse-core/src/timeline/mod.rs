//! Interactive AI-history timeline.
//!
//! A fixed ordered list of milestones with a cursor, wrap-around navigation,
//! autoplay that retires itself after one full forward cycle, and the pause
//! rules that keep autoplay from fighting the user.

mod carousel;
mod item;

pub use carousel::{Carousel, NavKey};
pub use item::{default_milestones, Milestone};
