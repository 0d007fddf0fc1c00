mod config;
pub mod store;

pub use config::{Config, CountersConfig, IntervalsConfig, SentimentConfig, TimelineConfig};
pub use store::{KvStore, MemoryStore, StatsDb};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/livepulse[-dev]/` based on LIVEPULSE_ENV.
///
/// Set LIVEPULSE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIVEPULSE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("livepulse-dev")
    } else {
        base_dir.join("livepulse")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
