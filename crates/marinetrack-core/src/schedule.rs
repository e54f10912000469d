//! Schedule model - wall-clock time to route progress for the scripted vessel.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::ConfigError;

/// Progress saturates here; the scripted vessel never signals arrival
pub const MAX_PROGRESS: f64 = 0.9999;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fixed departure and arrival instants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleModel {
    departure_at: DateTime<Utc>,
    arrival_at: DateTime<Utc>,
}

impl ScheduleModel {
    /// Fails unless `arrival_at` is strictly after `departure_at`
    pub fn new(departure_at: DateTime<Utc>, arrival_at: DateTime<Utc>) -> Result<Self, ConfigError> {
        if arrival_at <= departure_at {
            return Err(ConfigError::ScheduleInverted {
                departure: departure_at,
                arrival: arrival_at,
            });
        }
        Ok(Self {
            departure_at,
            arrival_at,
        })
    }

    /// A voyage of `total` length that is `progress` complete at `now`
    pub fn anchored_at(now: DateTime<Utc>, progress: f64, total: Duration) -> Result<Self, ConfigError> {
        let departure_at = anchored_departure(now, progress, total);
        Self::new(departure_at, departure_at + total)
    }

    pub fn departure_at(&self) -> DateTime<Utc> {
        self.departure_at
    }

    pub fn arrival_at(&self) -> DateTime<Utc> {
        self.arrival_at
    }

    pub fn total_duration(&self) -> Duration {
        self.arrival_at - self.departure_at
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_duration().num_milliseconds() as f64 / 1000.0
    }

    pub fn total_days(&self) -> f64 {
        self.total_seconds() / SECONDS_PER_DAY
    }

    /// 0 before departure, linear in transit, capped at `MAX_PROGRESS`
    pub fn progress_now(&self, now: DateTime<Utc>) -> f64 {
        if now <= self.departure_at {
            return 0.0;
        }
        if now >= self.arrival_at {
            return MAX_PROGRESS;
        }
        let elapsed = (now - self.departure_at).num_milliseconds() as f64 / 1000.0;
        (elapsed / self.total_seconds()).min(MAX_PROGRESS)
    }

    /// Whole days left on the voyage, never negative
    pub fn days_remaining(&self, progress: f64) -> u32 {
        crate::query::days_remaining(progress, self.total_days())
    }

    /// Estimated arrival date as seen from `today`
    pub fn eta(&self, progress: f64, today: DateTime<Utc>) -> DateTime<Utc> {
        crate::query::eta_date(progress, today, self.total_days())
    }

    /// Progress gained per tick so the route completes over the configured dates
    pub fn tick_increment(&self, tick_period: StdDuration) -> f64 {
        tick_period.as_secs_f64() / self.total_seconds()
    }
}

/// Departure time of a voyage of `total` length that is `progress` complete
/// at `now`. Progress is clamped to [0, 1].
pub fn anchored_departure(now: DateTime<Utc>, progress: f64, total: Duration) -> DateTime<Utc> {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let elapsed_ms = (total.num_milliseconds() as f64 * progress) as i64;
    now - Duration::milliseconds(elapsed_ms)
}
