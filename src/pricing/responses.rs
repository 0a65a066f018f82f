//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::formatting::StorefrontPrice;
use super::locations::Area;
use super::models::Quote;
use super::services::PricingError;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for a quote: raw amounts plus storefront labels
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub car_id: i64,
    pub base_rental_fee: MoneyResponse,
    pub insurance_fee: MoneyResponse,
    pub pickup_fee: MoneyResponse,
    pub dropoff_fee: MoneyResponse,
    pub delivery_fee: MoneyResponse,
    pub total_price: MoneyResponse,
    pub daily_display_rate: MoneyResponse,
    pub deposit: MoneyResponse,
    pub pricing_days: i64,
    pub display_days: i64,
    pub insurance: String,
    pub display: StorefrontPrice,
}

impl QuoteResponse {
    pub fn new(
        car_id: i64,
        quote: &Quote,
        deposit: Decimal,
        insurance: &str,
        display: StorefrontPrice,
        currency: &str,
    ) -> Self {
        let delivery = quote.delivery();
        Self {
            car_id,
            base_rental_fee: MoneyResponse::new(quote.base_rental_fee(), currency),
            insurance_fee: MoneyResponse::new(quote.insurance_fee(), currency),
            pickup_fee: MoneyResponse::new(delivery.pickup, currency),
            dropoff_fee: MoneyResponse::new(delivery.dropoff, currency),
            delivery_fee: MoneyResponse::new(quote.delivery_fee(), currency),
            total_price: MoneyResponse::new(quote.total_price(), currency),
            daily_display_rate: MoneyResponse::new(quote.daily_display_rate(), currency),
            deposit: MoneyResponse::new(deposit, currency),
            pricing_days: quote.pricing_days(),
            display_days: quote.display_days(),
            insurance: insurance.to_string(),
            display,
        }
    }
}

/// Response for the booking summary
#[derive(Debug, Serialize)]
pub struct BookingSummaryResponse {
    pub text: String,
    pub quote: QuoteResponse,
}

/// One area in the area listing
#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub id: i64,
    pub name: String,
    pub delivery_fee: MoneyResponse,
}

impl AreaResponse {
    pub fn new(area: &Area, currency: &str) -> Self {
        Self {
            id: area.id,
            name: area.name.clone(),
            delivery_fee: MoneyResponse::new(area.delivery_surcharge, currency),
        }
    }
}

/// Delivery fee for a single area
#[derive(Debug, Serialize)]
pub struct AreaFeeResponse {
    pub area_id: i64,
    pub known: bool,
    pub delivery_fee: MoneyResponse,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        Self {
            error_type: err.error_type().to_string(),
            message: err.to_string(),
            details: Some(serde_json::json!({ "field": err.field() })),
        }
    }
}
