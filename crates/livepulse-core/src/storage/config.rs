//! TOML-based application configuration.
//!
//! Stores the tunable knobs of the stats subsystem:
//! - Counter ceiling and snapshot staleness window
//! - Base update intervals for the scheduler tasks
//! - Sentiment endpoint
//! - Timeline autoplay cadence
//!
//! Configuration is stored at `~/.config/livepulse/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Counter-engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountersConfig {
    /// Saturation ceiling for the unprepared percentage.
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
    /// Persisted snapshots older than this are discarded.
    #[serde(default = "default_staleness_minutes")]
    pub staleness_minutes: u64,
}

/// Base intervals for the four scheduler tasks, in milliseconds.
///
/// The volume and anxiety intervals are scaled by the current traffic bucket
/// at registration time; the other two are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalsConfig {
    #[serde(default = "default_volume_base_ms")]
    pub volume_base_ms: u64,
    #[serde(default = "default_anxiety_base_ms")]
    pub anxiety_base_ms: u64,
    #[serde(default = "default_unprepared_ms")]
    pub unprepared_ms: u64,
    #[serde(default = "default_hourly_check_ms")]
    pub hourly_check_ms: u64,
}

/// Sentiment endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Full URL of the sentiment endpoint. Empty disables fetching; the
    /// engine then runs on the neutral bias.
    #[serde(default)]
    pub endpoint: String,
    /// Request timeout in seconds. A fetch that outlives this degrades to
    /// the neutral bias instead of stalling the caller.
    #[serde(default = "default_sentiment_timeout_secs")]
    pub timeout_secs: u64,
}

/// Timeline carousel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    #[serde(default = "default_manual_pause_ms")]
    pub manual_pause_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/livepulse/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub counters: CountersConfig,
    #[serde(default)]
    pub intervals: IntervalsConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

fn default_ceiling() -> f64 {
    85.0
}

fn default_staleness_minutes() -> u64 {
    10
}

fn default_volume_base_ms() -> u64 {
    8_000
}

fn default_anxiety_base_ms() -> u64 {
    3_000
}

fn default_unprepared_ms() -> u64 {
    180_000
}

fn default_hourly_check_ms() -> u64 {
    60_000
}

fn default_sentiment_timeout_secs() -> u64 {
    10
}

fn default_autoplay_interval_ms() -> u64 {
    3_000
}

fn default_manual_pause_ms() -> u64 {
    2_000
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            ceiling: default_ceiling(),
            staleness_minutes: default_staleness_minutes(),
        }
    }
}

impl Default for IntervalsConfig {
    fn default() -> Self {
        Self {
            volume_base_ms: default_volume_base_ms(),
            anxiety_base_ms: default_anxiety_base_ms(),
            unprepared_ms: default_unprepared_ms(),
            hourly_check_ms: default_hourly_check_ms(),
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_sentiment_timeout_secs(),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: default_autoplay_interval_ms(),
            manual_pause_ms: default_manual_pause_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            counters: CountersConfig::default(),
            intervals: IntervalsConfig::default(),
            sentiment: SentimentConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl Config {
    /// Path to the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/livepulse"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults if the file is
    /// missing.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical() {
        let config = Config::default();
        assert_eq!(config.counters.ceiling, 85.0);
        assert_eq!(config.counters.staleness_minutes, 10);
        assert_eq!(config.intervals.volume_base_ms, 8_000);
        assert_eq!(config.intervals.anxiety_base_ms, 3_000);
        assert_eq!(config.intervals.unprepared_ms, 180_000);
        assert_eq!(config.intervals.hourly_check_ms, 60_000);
        assert_eq!(config.sentiment.timeout_secs, 10);
        assert_eq!(config.timeline.autoplay_interval_ms, 3_000);
        assert_eq!(config.timeline.manual_pause_ms, 2_000);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [counters]
            ceiling = 99.9
            "#,
        )
        .unwrap();
        assert_eq!(config.counters.ceiling, 99.9);
        assert_eq!(config.counters.staleness_minutes, 10);
        assert_eq!(config.intervals.volume_base_ms, 8_000);
        assert_eq!(config.sentiment.timeout_secs, 10);
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.counters.ceiling, config.counters.ceiling);
        assert_eq!(back.sentiment.endpoint, config.sentiment.endpoint);
    }
}
