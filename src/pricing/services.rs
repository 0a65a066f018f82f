//! Quote pipeline.
//!
//! `QuoteEngine::quote` is the one entry point every surface (storefront card,
//! booking form, checkout) goes through:
//! duration -> effective daily rate -> fee composition.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::calculators::FeeComposer;
use super::duration::RentalDuration;
use super::locations::LocationCatalog;
use super::models::{Quote, RentalRequest};
use super::rates::RateTierEngine;

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid quote input '{field}': {reason}")]
    InvalidQuoteInput { field: String, reason: String },

    #[error("Invalid booking contact '{field}': {reason}")]
    InvalidBookingContact { field: String, reason: String },
}

impl PricingError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidQuoteInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_contact(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidBookingContact {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable identifier used in JSON error bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidQuoteInput { .. } => "invalid_quote_input",
            PricingError::InvalidBookingContact { .. } => "invalid_booking_contact",
        }
    }

    pub fn field(&self) -> &str {
        match self {
            PricingError::InvalidQuoteInput { field, .. }
            | PricingError::InvalidBookingContact { field, .. } => field,
        }
    }
}

/// Rental quoting engine: rate engine plus fee composer
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    rates: RateTierEngine,
    fees: FeeComposer,
}

impl QuoteEngine {
    pub fn new(rates: RateTierEngine, fees: FeeComposer) -> Self {
        Self { rates, fees }
    }

    /// Engine with identity rates over the given catalog
    pub fn with_catalog(
        catalog: Arc<LocationCatalog>,
        insurance_daily_rate: Decimal,
        child_seat_daily_rate: Decimal,
    ) -> Self {
        Self::new(
            RateTierEngine::default(),
            FeeComposer::new(catalog, insurance_daily_rate, child_seat_daily_rate),
        )
    }

    pub fn catalog(&self) -> &LocationCatalog {
        self.fees.catalog()
    }

    /// Price a rental request.
    ///
    /// Deterministic in `request`: no clock reads, no shared mutable state.
    pub fn quote(&self, request: &RentalRequest) -> Result<Quote, PricingError> {
        if request.daily_base_rate < Decimal::ZERO {
            return Err(PricingError::invalid_input(
                "dailyBaseRate",
                format!("must not be negative (got {})", request.daily_base_rate),
            ));
        }
        if request.deposit_amount < Decimal::ZERO {
            return Err(PricingError::invalid_input(
                "deposit",
                format!("must not be negative (got {})", request.deposit_amount),
            ));
        }

        let duration = RentalDuration::between(request.start, request.end);
        if duration.is_malformed() {
            tracing::warn!(
                car_id = request.car_id,
                display_days = duration.display_days(),
                "Rental ends before it starts, billing the minimum of one day"
            );
        }

        let reference_date = request.start.date_naive();
        let daily_rate = self.rates.effective_daily_rate(
            request.daily_base_rate,
            reference_date,
            request.is_premium_insurance,
        );

        let mut quote = self
            .fees
            .compose(request, duration.pricing_days(), daily_rate)?;
        quote.display_days = duration.display_days();

        tracing::debug!(
            car_id = request.car_id,
            days = quote.pricing_days,
            total = %quote.total_price,
            "Quote computed"
        );

        Ok(quote)
    }
}
