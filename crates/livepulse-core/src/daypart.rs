//! Time-of-day and weekend heuristics.
//!
//! The counters simulate "live" search traffic, so their rates and update
//! cadence follow the clock: fastest during peak hours, slowest overnight and
//! on weekends. All hour boundaries are inclusive.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Traffic bucket for an hour of the day.
///
/// Peak hours sit inside business hours; classification checks peak first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPart {
    /// 9-11, 14-16 and 19-21.
    Peak,
    /// 9-17, outside the peak windows.
    Business,
    /// 6-23, outside business hours.
    Regular,
    /// Late night / early morning.
    OffHours,
}

impl DayPart {
    pub fn of(at: &DateTime<Utc>) -> Self {
        Self::from_hour(at.hour())
    }

    pub fn from_hour(hour: u32) -> Self {
        if (9..=11).contains(&hour) || (14..=16).contains(&hour) || (19..=21).contains(&hour) {
            DayPart::Peak
        } else if (9..=17).contains(&hour) {
            DayPart::Business
        } else if (6..=23).contains(&hour) {
            DayPart::Regular
        } else {
            DayPart::OffHours
        }
    }

    /// Base rate for the volume counter, in increments per minute.
    pub fn volume_rate_per_min(self) -> f64 {
        match self {
            DayPart::Peak => 5.5,
            DayPart::Business => 2.5,
            DayPart::Regular => 1.2,
            DayPart::OffHours => 0.3,
        }
    }
}

pub fn is_weekend(at: &DateTime<Utc>) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_business_hours(at: &DateTime<Utc>) -> bool {
    (9..=17).contains(&at.hour())
}

/// Effective volume rate per minute: day-part base rate, damped on weekends.
pub fn volume_rate_per_min(at: &DateTime<Utc>) -> f64 {
    let mut rate = DayPart::of(at).volume_rate_per_min();
    if is_weekend(at) {
        rate *= 0.4;
    }
    rate
}

/// Scale a base update interval to the current traffic bucket.
///
/// Weekends slow everything down regardless of hour; off-hours are slower
/// still relative to business hours; peak hours tighten the cadence.
pub fn interval_for(base_ms: u64, at: &DateTime<Utc>) -> u64 {
    let multiplier = if is_weekend(at) {
        2.5
    } else if !is_business_hours(at) {
        3.0
    } else if DayPart::of(at) == DayPart::Peak {
        0.5
    } else {
        1.0
    };
    (base_ms as f64 * multiplier).round() as u64
}

/// Apply a uniform +/- `variation_pct` percent jitter to `base`.
pub fn jittered<R: Rng>(base: f64, variation_pct: f64, rng: &mut R) -> f64 {
    let variation = base * (variation_pct / 100.0);
    let offset = (rng.gen::<f64>() - 0.5) * 2.0 * variation;
    base + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 30, 0).unwrap()
    }

    #[test]
    fn hour_buckets() {
        assert_eq!(DayPart::from_hour(10), DayPart::Peak);
        assert_eq!(DayPart::from_hour(15), DayPart::Peak);
        assert_eq!(DayPart::from_hour(20), DayPart::Peak);
        assert_eq!(DayPart::from_hour(13), DayPart::Business);
        assert_eq!(DayPart::from_hour(17), DayPart::Business);
        assert_eq!(DayPart::from_hour(7), DayPart::Regular);
        assert_eq!(DayPart::from_hour(23), DayPart::Regular);
        assert_eq!(DayPart::from_hour(3), DayPart::OffHours);
    }

    #[test]
    fn weekend_damps_volume_rate() {
        // 2025-03-10 is a Monday, 2025-03-08 a Saturday.
        let weekday_peak = at(2025, 3, 10, 10);
        let saturday_peak = at(2025, 3, 8, 10);
        assert_eq!(volume_rate_per_min(&weekday_peak), 5.5);
        assert!((volume_rate_per_min(&saturday_peak) - 5.5 * 0.4).abs() < 1e-9);
    }

    #[test]
    fn interval_scaling() {
        let peak = at(2025, 3, 10, 10);
        let business = at(2025, 3, 10, 13);
        let night = at(2025, 3, 10, 2);
        let saturday = at(2025, 3, 8, 10);

        assert_eq!(interval_for(8000, &peak), 4000);
        assert_eq!(interval_for(8000, &business), 8000);
        assert_eq!(interval_for(8000, &night), 24000);
        assert_eq!(interval_for(8000, &saturday), 20000);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        for _ in 0..1000 {
            let v = jittered(100.0, 30.0, &mut rng);
            assert!((70.0..=130.0).contains(&v), "jittered out of range: {v}");
        }
    }
}
