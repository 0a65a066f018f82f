//! Booking confirmation text.
//!
//! Every number in the summary comes from an already computed `Quote`.
//! Nothing here recomputes fees.

use chrono::{DateTime, Utc};

use super::calculators::round_half_up;
use super::models::{CarRecord, Quote, RentalRequest};
use super::requests::BookingContact;

const NOT_MENTIONED: &str = "Not mentioned";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Pickup/dropoff display names, resolved by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationNames {
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
}

/// Times of day the customer picked ("10:00")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTimes {
    pub start: String,
    pub end: String,
}

/// Everything besides the request and quote that the summary shows
#[derive(Debug, Clone)]
pub struct SummaryContext<'a> {
    pub car: &'a CarRecord,
    pub locations: LocationNames,
    pub times: BookingTimes,
    pub contact: Option<&'a BookingContact>,
}

/// Builds the plain-text booking summary
#[derive(Debug, Clone)]
pub struct BookingSummaryBuilder {
    currency_symbol: String,
}

impl Default for BookingSummaryBuilder {
    fn default() -> Self {
        Self::new("฿")
    }
}

impl BookingSummaryBuilder {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn build_summary(
        &self,
        request: &RentalRequest,
        quote: &Quote,
        context: &SummaryContext<'_>,
    ) -> String {
        let sym = &self.currency_symbol;
        let delivery = quote.delivery();
        let pickup = context.locations.pickup.as_deref().unwrap_or(NOT_MENTIONED);
        let dropoff = context.locations.dropoff.as_deref().unwrap_or(NOT_MENTIONED);

        let mut lines = vec![
            "Car Booking".to_string(),
            String::new(),
            context.car.display_name(),
            format!("Pick-up Location: {} + {}{}", pickup, whole(delivery.pickup), sym),
            format!("Drop-off Location: {} + {}{}", dropoff, whole(delivery.dropoff), sym),
            format!("Start: {} {}", date(request.start), context.times.start),
            format!("Finish: {} {}", date(request.end), context.times.end),
            format!("Days: {}", quote.display_days()),
            format!("Total: {} {}", whole(quote.total_price()), sym),
            format!("Deposit: {} {}", whole(request.deposit_amount), sym),
            format!("Insurance: {}", request.insurance_label()),
        ];

        if let Some(contact) = context.contact {
            lines.push(format!("{} {}", contact.full_name, contact.phone));
            lines.push(contact.comment.clone());
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn whole(amount: rust_decimal::Decimal) -> String {
    round_half_up(amount, 0).normalize().to_string()
}

fn date(instant: DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::locations::{Area, LocationCatalog};
    use crate::pricing::services::QuoteEngine;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn car() -> CarRecord {
        CarRecord {
            id: 5,
            brand: "Toyota".to_string(),
            model: "Yaris".to_string(),
            year: Some(2022),
            price_per_day: dec!(1000),
            deposit: dec!(5000),
        }
    }

    fn request(premium: bool) -> RentalRequest {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        RentalRequest {
            car_id: 5,
            daily_base_rate: dec!(1000),
            deposit_amount: dec!(5000),
            start,
            end: start + Duration::days(3),
            is_premium_insurance: premium,
            include_child_seat: false,
            pickup_location_id: 1,
            dropoff_location_id: 2,
        }
    }

    fn engine() -> QuoteEngine {
        let catalog = LocationCatalog::new(vec![
            Area::new(1, "Airport", dec!(250)),
            Area::new(2, "Patong", dec!(300)),
        ]);
        QuoteEngine::with_catalog(Arc::new(catalog), dec!(400), dec!(100))
    }

    fn context<'a>(car: &'a CarRecord, contact: Option<&'a BookingContact>) -> SummaryContext<'a> {
        SummaryContext {
            car,
            locations: LocationNames {
                pickup: Some("Airport".to_string()),
                dropoff: Some("Patong".to_string()),
            },
            times: BookingTimes {
                start: "10:00".to_string(),
                end: "18:30".to_string(),
            },
            contact,
        }
    }

    #[test]
    fn test_summary_full_text() {
        let car = car();
        let contact = BookingContact::new("Jane Doe", "+66812345678", Some("Flight TG201")).unwrap();
        let req = request(true);
        let quote = engine().quote(&req).unwrap();

        let text = BookingSummaryBuilder::default().build_summary(&req, &quote, &context(&car, Some(&contact)));

        let expected = "Car Booking\n\
            \n\
            Toyota Yaris 2022\n\
            Pick-up Location: Airport + 250฿\n\
            Drop-off Location: Patong + 300฿\n\
            Start: 01/03/2024 10:00\n\
            Finish: 04/03/2024 18:30\n\
            Days: 3\n\
            Total: 4750 ฿\n\
            Deposit: 5000 ฿\n\
            Insurance: Full\n\
            Jane Doe +66812345678\n\
            Flight TG201\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_summary_total_matches_quote() {
        let car = car();
        let req = request(false);
        let quote = engine().quote(&req).unwrap();
        let text = BookingSummaryBuilder::default().build_summary(&req, &quote, &context(&car, None));

        assert!(text.contains(&format!("Total: {} ฿", quote.total_price())));
        assert!(text.contains("Insurance: Standard"));
        assert!(!text.contains("+66"));
    }

    #[test]
    fn test_summary_unknown_locations() {
        let car = car();
        let mut req = request(false);
        req.pickup_location_id = 999999;
        req.dropoff_location_id = 999998;
        let quote = engine().quote(&req).unwrap();

        let mut ctx = context(&car, None);
        ctx.locations = LocationNames::default();
        let text = BookingSummaryBuilder::default().build_summary(&req, &quote, &ctx);

        assert!(text.contains("Pick-up Location: Not mentioned + 0฿"));
        assert!(text.contains("Drop-off Location: Not mentioned + 0฿"));
    }

    #[test]
    fn test_whole_rounds_for_display_only() {
        assert_eq!(whole(dec!(3500.40)), "3500");
        assert_eq!(whole(dec!(250.00)), "250");
        assert_eq!(whole(dec!(0)), "0");
    }

    #[test]
    fn test_whole_rounds_halves_up() {
        assert_eq!(whole(dec!(1500.5)), "1501");
        assert_eq!(whole(dec!(2.5)), "3");
        assert_eq!(whole(dec!(1500.49)), "1500");
    }

    #[test]
    fn test_summary_half_unit_total_rounds_up() {
        let car = car();
        let mut req = request(false);
        req.daily_base_rate = dec!(1000.5);
        req.end = req.start + Duration::days(1);
        let quote = engine().quote(&req).unwrap();
        assert_eq!(quote.total_price(), dec!(1550.5));

        let text = BookingSummaryBuilder::default().build_summary(&req, &quote, &context(&car, None));
        assert!(text.contains("Total: 1551 ฿"), "{}", text);
    }
}
