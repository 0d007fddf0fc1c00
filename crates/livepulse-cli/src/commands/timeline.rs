use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use livepulse_core::storage::TimelineConfig;
use livepulse_core::timeline::default_milestones;
use livepulse_core::{Carousel, Event, SystemClock};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// List the milestones, or a single one
    Show {
        /// Show only the milestone at this index
        #[arg(long)]
        index: Option<usize>,
    },
    /// Step forward from an index, wrapping at the end
    Next {
        /// Index to step from
        #[arg(long, default_value = "0")]
        from: usize,
    },
    /// Step backward from an index, wrapping at the start
    Prev {
        /// Index to step from
        #[arg(long, default_value = "0")]
        from: usize,
    },
    /// Jump to an index (out of range clamps to the last entry)
    Jump { index: usize },
    /// Animate full autoplay cycles
    Play {
        /// How many full cycles to run
        #[arg(long, default_value = "1")]
        cycles: u32,
        /// Autoplay interval in milliseconds
        #[arg(long, default_value = "3000")]
        interval_ms: u64,
    },
}

pub fn run(action: TimelineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimelineAction::Show { index } => show(index),
        TimelineAction::Next { from } => step(from, true),
        TimelineAction::Prev { from } => step(from, false),
        TimelineAction::Jump { index } => jump(index),
        TimelineAction::Play {
            cycles,
            interval_ms,
        } => play(cycles, interval_ms),
    }
}

fn carousel() -> Carousel {
    Carousel::new(Arc::new(SystemClock))
}

fn print_milestone(milestone: &livepulse_core::Milestone) {
    println!("{} -- {}", milestone.year, milestone.title);
    println!("  {}", milestone.description);
    println!("  What this means for you: {}", milestone.takeaway);
}

fn print_position(carousel: &Carousel) {
    println!("[{}]", carousel.active_index());
    print_milestone(carousel.current());
}

fn show(index: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let milestones = default_milestones();
    match index {
        Some(i) => {
            let milestone = milestones
                .get(i)
                .ok_or_else(|| format!("index {i} out of range (0..{})", milestones.len() - 1))?;
            print_milestone(milestone);
        }
        None => {
            for (i, milestone) in milestones.iter().enumerate() {
                println!("[{i}] {} -- {}", milestone.year, milestone.title);
            }
        }
    }
    Ok(())
}

fn step(from: usize, forward: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut carousel = carousel();
    carousel.jump(from);
    if forward {
        carousel.next();
    } else {
        carousel.prev();
    }
    print_position(&carousel);
    Ok(())
}

fn jump(index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut carousel = carousel();
    carousel.jump(index);
    print_position(&carousel);
    Ok(())
}

fn play(cycles: u32, interval_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let config = TimelineConfig {
        autoplay_interval_ms: interval_ms,
        ..TimelineConfig::default()
    };
    let mut carousel =
        Carousel::with_milestones(Arc::new(SystemClock), default_milestones(), &config);

    print_milestone(carousel.current());
    let mut remaining = cycles;
    loop {
        std::thread::sleep(Duration::from_millis(100));
        match carousel.tick() {
            Some(Event::TimelineMoved { .. }) => {
                println!();
                print_milestone(carousel.current());
            }
            Some(Event::AutoplayStopped { .. }) => {
                println!();
                println!("(cycle complete)");
                remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    return Ok(());
                }
                // Autoplay retired itself at index 0; re-arm for the next
                // cycle.
                carousel.toggle_autoplay();
                print_milestone(carousel.current());
            }
            _ => {}
        }
    }
}
