//! Rental duration in whole days.
//!
//! Two accessors on purpose: `display_days` is the raw ceiling of the elapsed
//! time (0 for same-instant, negative when end < start), `pricing_days` is
//! what fees are multiplied by and never drops below 1.

use chrono::{DateTime, Utc};

const ONE_DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Day count derived from a start/end pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RentalDuration {
    raw_days: i64,
}

impl RentalDuration {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            raw_days: days_between(start, end),
        }
    }

    /// Raw elapsed days, shown to users as-is
    pub fn display_days(&self) -> i64 {
        self.raw_days
    }

    /// Days billed for; at least 1
    pub fn pricing_days(&self) -> i64 {
        self.raw_days.max(1)
    }

    /// True when the range runs backwards (end before start)
    pub fn is_malformed(&self) -> bool {
        self.raw_days < 0
    }
}

/// `ceil((end - start) / one day)` over millisecond timestamps
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let elapsed = end.timestamp_millis() - start.timestamp_millis();
    ceil_div(elapsed, ONE_DAY_MILLIS)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
