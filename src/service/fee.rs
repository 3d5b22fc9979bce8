//! Parking fee calculation.
//!
//! Elapsed time is billed in whole proration intervals: any time into a new
//! interval bills the full interval. A session that ends on the millisecond it
//! started costs nothing.

use chrono::{DateTime, Utc};

use crate::config::BillingConfig;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Computed price of a parking session.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingFee {
    /// Elapsed time in milliseconds, clamped at zero.
    pub elapsed_ms: u64,
    /// Number of billed intervals.
    pub intervals: u64,
    /// Elapsed time as `"{hours}h {minutes}m"`.
    pub total_parked_time: String,
    /// Amount due.
    pub charge: f64,
}

/// Prices parking sessions from a fixed rate configuration.
#[derive(Debug, Clone, Copy)]
pub struct FeeCalculator {
    hourly_rate: f64,
    minimum_interval: u32,
}

impl FeeCalculator {
    /// Create a calculator from billing configuration.
    ///
    /// The configuration is expected to have passed validation; an interval of
    /// zero is treated as one minute.
    #[must_use]
    pub fn new(config: &BillingConfig) -> Self {
        Self {
            hourly_rate: config.hourly_rate,
            minimum_interval: config.minimum_interval.max(1),
        }
    }

    /// Price the session `[entry, now]`.
    ///
    /// If `now` precedes `entry` the session is treated as zero length.
    #[must_use]
    pub fn quote(&self, entry: DateTime<Utc>, now: DateTime<Utc>) -> ParkingFee {
        let elapsed_ms = elapsed_millis(entry, now);
        let intervals = self.intervals(elapsed_ms);

        ParkingFee {
            elapsed_ms,
            intervals,
            total_parked_time: format_duration(elapsed_ms),
            charge: self.charge_for_intervals(intervals),
        }
    }

    /// Billable intervals for `elapsed_ms`, rounded up.
    #[must_use]
    pub fn intervals(&self, elapsed_ms: u64) -> u64 {
        elapsed_ms.div_ceil(u64::from(self.minimum_interval) * MS_PER_MINUTE)
    }

    /// Charge for `elapsed_ms` of parking.
    #[must_use]
    pub fn charge(&self, elapsed_ms: u64) -> f64 {
        self.charge_for_intervals(self.intervals(elapsed_ms))
    }

    #[allow(clippy::cast_precision_loss)]
    fn charge_for_intervals(&self, intervals: u64) -> f64 {
        intervals as f64 * f64::from(self.minimum_interval) / 60.0 * self.hourly_rate
    }
}

/// Milliseconds from `entry` to `now`, or zero under clock skew.
#[must_use]
pub fn elapsed_millis(entry: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - entry).num_milliseconds()).unwrap_or(0)
}

/// Format a duration as whole hours and leftover whole minutes.
#[must_use]
pub fn format_duration(elapsed_ms: u64) -> String {
    let hours = elapsed_ms / MS_PER_HOUR;
    let minutes = (elapsed_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    format!("{hours}h {minutes}m")
}
