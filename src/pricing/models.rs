//! Domain models for the quoting pipeline.
//!
//! Plain immutable values: a `RentalRequest` goes in, a `Quote` comes out.
//! Nothing here touches storage; car records arrive from the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Car record as supplied by the data-access layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_day: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit: Decimal,
}

impl CarRecord {
    /// "Brand Model Year" as shown in booking messages
    pub fn display_name(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if !self.brand.is_empty() {
            parts.push(self.brand.clone());
        }
        if !self.model.is_empty() {
            parts.push(self.model.clone());
        }
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        if parts.is_empty() {
            format!("Car #{}", self.id)
        } else {
            parts.join(" ")
        }
    }
}

/// A single rental request, built fresh for every quote.
///
/// Fields are public so trusted callers (and tests) can build one directly;
/// untrusted input should go through `RentalRequest::from_params`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RentalRequest {
    pub car_id: i64,
    pub daily_base_rate: Decimal,
    pub deposit_amount: Decimal,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_premium_insurance: bool,
    pub include_child_seat: bool,
    pub pickup_location_id: i64,
    pub dropoff_location_id: i64,
}

impl RentalRequest {
    /// Human label for the insurance tier
    pub fn insurance_label(&self) -> &'static str {
        if self.is_premium_insurance {
            "Full"
        } else {
            "Standard"
        }
    }
}

/// Per-location part of the delivery fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeliveryFees {
    pub pickup: Decimal,
    pub dropoff: Decimal,
}

impl DeliveryFees {
    /// Pickup plus dropoff; `None` on overflow
    pub fn checked_total(&self) -> Option<Decimal> {
        self.pickup.checked_add(self.dropoff)
    }
}

/// Fully computed price breakdown for one request.
///
/// Only `FeeComposer` builds these, which keeps
/// `total_price == base_rental_fee + insurance_fee + delivery_fee`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quote {
    pub(crate) base_rental_fee: Decimal,
    pub(crate) insurance_fee: Decimal,
    pub(crate) delivery: DeliveryFees,
    pub(crate) delivery_fee: Decimal,
    pub(crate) total_price: Decimal,
    pub(crate) daily_display_rate: Decimal,
    pub(crate) pricing_days: i64,
    pub(crate) display_days: i64,
}

impl Quote {
    pub fn base_rental_fee(&self) -> Decimal {
        self.base_rental_fee
    }

    pub fn insurance_fee(&self) -> Decimal {
        self.insurance_fee
    }

    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    pub fn delivery(&self) -> DeliveryFees {
        self.delivery
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Effective car rate per day (unrounded)
    pub fn daily_display_rate(&self) -> Decimal {
        self.daily_display_rate
    }

    /// Day count the fees were multiplied by (always >= 1)
    pub fn pricing_days(&self) -> i64 {
        self.pricing_days
    }

    /// Raw elapsed day count for display (may be 0 or negative)
    pub fn display_days(&self) -> i64 {
        self.display_days
    }
}
