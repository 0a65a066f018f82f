//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no clock, no shared state.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::locations::LocationCatalog;
use super::models::{DeliveryFees, Quote, RentalRequest};
use super::services::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use carrental_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Round to the nearest multiple of `step`, halves going up.
///
/// This is display rounding (`round(amount / 10) * 10` on the storefront).
/// Results must not be fed back into fee arithmetic. Amounts too close to
/// `Decimal::MAX` to round come back unchanged.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use carrental_web::pricing::round_to_step;
///
/// assert_eq!(round_to_step(dec!(1234), dec!(10)), dec!(1230));
/// assert_eq!(round_to_step(dec!(1235), dec!(10)), dec!(1240));
/// ```
pub fn round_to_step(amount: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return amount;
    }
    // Math.round semantics: halves go towards +infinity
    amount
        .checked_div(step)
        .and_then(|steps| steps.checked_add(Decimal::new(5, 1)))
        .and_then(|steps| steps.floor().checked_mul(step))
        .unwrap_or(amount)
}

/// Round to whole-number `places` with halves going up, as `Math.round` does.
///
/// Used for figures printed in booking messages.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use carrental_web::pricing::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1500.5), 0), dec!(1501));
/// assert_eq!(round_half_up(dec!(1500.4), 0), dec!(1500));
/// ```
pub fn round_half_up(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(field: &str, what: &str) -> PricingError {
    PricingError::invalid_input(field, format!("{} is too large to price", what))
}

/// Combines car rate, insurance and delivery into a `Quote`
#[derive(Debug, Clone)]
pub struct FeeComposer {
    catalog: Arc<LocationCatalog>,
    insurance_daily_rate: Decimal,
    child_seat_daily_rate: Decimal,
}

impl FeeComposer {
    pub fn new(
        catalog: Arc<LocationCatalog>,
        insurance_daily_rate: Decimal,
        child_seat_daily_rate: Decimal,
    ) -> Self {
        Self {
            catalog,
            insurance_daily_rate,
            child_seat_daily_rate,
        }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn insurance_daily_rate(&self) -> Decimal {
        self.insurance_daily_rate
    }

    /// Build a quote from an effective daily rate and a pricing-day count.
    ///
    /// Steps run in a fixed order: base fee, insurance, delivery, total.
    /// Negative rates and non-positive day counts are rejected outright.
    pub fn compose(
        &self,
        request: &RentalRequest,
        days: i64,
        daily_rate: Decimal,
    ) -> Result<Quote, PricingError> {
        if daily_rate < Decimal::ZERO {
            return Err(PricingError::invalid_input(
                "dailyRate",
                format!("daily rate must not be negative (got {})", daily_rate),
            ));
        }
        if days <= 0 {
            return Err(PricingError::invalid_input(
                "days",
                format!("pricing day count must be positive (got {})", days),
            ));
        }

        let day_count = Decimal::from(days);

        // 1. Base rental fee (child seat rides on the daily car rate)
        let per_day = if request.include_child_seat {
            daily_rate
                .checked_add(self.child_seat_daily_rate)
                .ok_or_else(|| overflow("dailyRate", "daily rate with child seat"))?
        } else {
            daily_rate
        };
        let base_rental_fee = per_day
            .checked_mul(day_count)
            .ok_or_else(|| overflow("dailyRate", "base rental fee"))?;

        // 2. Insurance
        let insurance_fee = if request.is_premium_insurance {
            self.insurance_daily_rate
                .checked_mul(day_count)
                .ok_or_else(|| overflow("days", "insurance fee"))?
        } else {
            Decimal::ZERO
        };

        // 3. Delivery
        let delivery = DeliveryFees {
            pickup: self.catalog.surcharge_for(request.pickup_location_id),
            dropoff: self.catalog.surcharge_for(request.dropoff_location_id),
        };
        let delivery_fee = delivery
            .checked_total()
            .ok_or_else(|| overflow("locations", "delivery fee"))?;

        // 4. Total
        let total_price = base_rental_fee
            .checked_add(insurance_fee)
            .and_then(|sum| sum.checked_add(delivery_fee))
            .ok_or_else(|| overflow("dailyRate", "total price"))?;

        Ok(Quote {
            base_rental_fee,
            insurance_fee,
            delivery,
            delivery_fee,
            total_price,
            daily_display_rate: per_day,
            pricing_days: days,
            display_days: days,
        })
    }
}
