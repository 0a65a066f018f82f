//! Effective per-day car rate.
//!
//! The engine only knows how to apply a `RateModifier`; which modifier is in
//! play (identity, a weekday table, ...) is configuration. Insurance is never
//! priced here.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Adjusts a base daily rate for a reference date
pub trait RateModifier: Send + Sync + std::fmt::Debug {
    fn adjust(&self, base_rate: Decimal, reference_date: NaiveDate) -> Decimal;
}

/// Leaves the base rate untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityModifier;

impl RateModifier for IdentityModifier {
    fn adjust(&self, base_rate: Decimal, _reference_date: NaiveDate) -> Decimal {
        base_rate
    }
}

/// Multiplier per day of week, loaded from configuration.
///
/// Days without an entry use a multiplier of 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayModifiers {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub monday: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub tuesday: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub wednesday: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub thursday: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub friday: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub saturday: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub sunday: Option<Decimal>,
}

impl WeekdayModifiers {
    pub fn multiplier_for(&self, weekday: Weekday) -> Decimal {
        let entry = match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        };
        entry.unwrap_or(Decimal::ONE)
    }
}

impl RateModifier for WeekdayModifiers {
    fn adjust(&self, base_rate: Decimal, reference_date: NaiveDate) -> Decimal {
        base_rate
            .checked_mul(self.multiplier_for(reference_date.weekday()))
            .unwrap_or(base_rate)
    }
}

/// Computes the per-day car rate from a base rate and a reference date
#[derive(Debug, Clone)]
pub struct RateTierEngine {
    modifier: Arc<dyn RateModifier>,
}

impl Default for RateTierEngine {
    fn default() -> Self {
        Self::new(Arc::new(IdentityModifier))
    }
}

impl RateTierEngine {
    pub fn new(modifier: Arc<dyn RateModifier>) -> Self {
        Self { modifier }
    }

    /// Effective daily rate for `reference_date`.
    ///
    /// `is_premium` has no effect on the car rate; it is accepted so callers
    /// can pass the whole request context. An adjustment that lands at or
    /// below zero falls back to `base_rate`.
    pub fn effective_daily_rate(
        &self,
        base_rate: Decimal,
        reference_date: NaiveDate,
        is_premium: bool,
    ) -> Decimal {
        let adjusted = self.modifier.adjust(base_rate, reference_date);
        if adjusted <= Decimal::ZERO {
            tracing::debug!(
                %base_rate,
                %adjusted,
                is_premium,
                "Rate adjustment not positive, using base rate"
            );
            return base_rate;
        }
        adjusted
    }
}
