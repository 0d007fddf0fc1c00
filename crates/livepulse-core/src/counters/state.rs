use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::daypart::{is_business_hours, is_weekend};

/// Current values of the three displayed counters.
///
/// The two search counters only move upward between hourly re-seeds; the
/// percentage saturates at a configured ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    pub training_searches: u64,
    pub anxiety_searches: u64,
    pub unprepared_pct: f64,
}

impl CounterState {
    /// Fresh defaults derived from the current time-of-day and weekday.
    ///
    /// Baselines shrink on weekends and outside business hours so a first
    /// visit at 3am doesn't claim peak-hour traffic.
    pub fn initial<R: Rng>(at: &DateTime<Utc>, rng: &mut R) -> Self {
        let weekend_multiplier = if is_weekend(at) { 0.6 } else { 1.0 };
        let hour_multiplier = if is_business_hours(at) { 1.2 } else { 0.7 };
        let scale: f64 = weekend_multiplier * hour_multiplier;

        Self {
            training_searches: (2847.0 * scale).round() as u64,
            anxiety_searches: ((800.0 + rng.gen::<f64>() * 700.0) * scale).round() as u64,
            unprepared_pct: 73.2 + (rng.gen::<f64>() * 2.0 - 1.0),
        }
    }

    /// Re-seeded hourly baseline for the anxiety counter.
    pub fn anxiety_baseline<R: Rng>(rng: &mut R) -> u64 {
        (800.0 + rng.gen::<f64>() * 700.0).round() as u64
    }
}

/// Durable snapshot of the counters plus the instant it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub counters: CounterState,
    /// Epoch milliseconds at write time, used for the staleness check.
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn weekday_business_baseline_is_scaled_up() {
        // Monday 10:00.
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let state = CounterState::initial(&at, &mut rng);

        assert_eq!(state.training_searches, (2847.0f64 * 1.2).round() as u64);
        let anxiety = state.anxiety_searches as f64;
        assert!((800.0 * 1.2..=1500.0 * 1.2).contains(&anxiety));
        assert!((72.2..=74.2).contains(&state.unprepared_pct));
    }

    #[test]
    fn weekend_night_baseline_is_scaled_down() {
        // Saturday 03:00.
        let at = Utc.with_ymd_and_hms(2025, 3, 8, 3, 0, 0).unwrap();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let state = CounterState::initial(&at, &mut rng);

        assert_eq!(
            state.training_searches,
            (2847.0f64 * 0.6 * 0.7).round() as u64
        );
    }

    #[test]
    fn anxiety_baseline_in_range() {
        let mut rng = Mcg128Xsl64::seed_from_u64(9);
        for _ in 0..100 {
            let v = CounterState::anxiety_baseline(&mut rng);
            assert!((800..=1500).contains(&v));
        }
    }
}
