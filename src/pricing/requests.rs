//! Request DTOs for pricing API endpoints.
//!
//! Storefront links carry every value as a string (`?startDate=...&isPremium=true`),
//! so the DTOs keep them as raw strings and `RentalRequest::from_params` does
//! all parsing and validation in one place.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{CarRecord, RentalRequest};
use super::services::PricingError;

/// Area used when the storefront link omits a location
pub const DEFAULT_AREA_ID: i64 = 1;

/// Rental length assumed when the storefront link omits an end date
pub const DEFAULT_RENTAL_DAYS: i64 = 3;

/// Time of day shown when the link omits one
pub const DEFAULT_TIME_OF_DAY: &str = "10:00";

/// Raw quote parameters, as sent by the storefront
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    #[serde(default, deserialize_with = "lenient_string")]
    pub car_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub daily_base_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub deposit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub is_premium: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub include_child_seat: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_to: Option<String>,
}

/// Accept strings, numbers and booleans alike; JSON bodies send numbers
/// where query strings send text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a scalar value, got {}",
                other
            )))
        }
    })
}

impl RentalRequest {
    /// Parse and validate raw parameters.
    ///
    /// Absent values take the storefront defaults (start = `now`,
    /// end = start + 3 days, area 1). Present but malformed values are errors.
    pub fn from_params(params: &QuoteParams, now: DateTime<Utc>) -> Result<Self, PricingError> {
        let car_id = required(&params.car_id, "carId")?;
        let car_id = parse_i64(car_id, "carId")?;

        let daily_base_rate = parse_money(required(&params.daily_base_rate, "dailyBaseRate")?, "dailyBaseRate")?;
        let deposit_amount = match present(&params.deposit) {
            Some(raw) => parse_money(raw, "deposit")?,
            None => Decimal::ZERO,
        };

        let start = match present(&params.start_date) {
            Some(raw) => parse_instant(raw, "startDate")?,
            None => now,
        };
        let end = match present(&params.end_date) {
            Some(raw) => parse_instant(raw, "endDate")?,
            None => start
                .checked_add_signed(Duration::days(DEFAULT_RENTAL_DAYS))
                .ok_or_else(|| {
                    PricingError::invalid_input("endDate", "default end date is out of range")
                })?,
        };

        let is_premium_insurance = parse_flag(&params.is_premium, "isPremium")?;
        let include_child_seat = parse_flag(&params.include_child_seat, "includeChildSeat")?;

        let pickup_location_id = parse_area(&params.location_from, "locationFrom")?;
        let dropoff_location_id = parse_area(&params.location_to, "locationTo")?;

        Ok(RentalRequest {
            car_id,
            daily_base_rate,
            deposit_amount,
            start,
            end,
            is_premium_insurance,
            include_child_seat,
            pickup_location_id,
            dropoff_location_id,
        })
    }

    /// Request for a known car record; rate and deposit come from the record
    pub fn for_car(car: &CarRecord, params: &QuoteParams, now: DateTime<Utc>) -> Result<Self, PricingError> {
        let params = QuoteParams {
            car_id: Some(car.id.to_string()),
            daily_base_rate: Some(car.price_per_day.to_string()),
            deposit: Some(car.deposit.to_string()),
            ..params.clone()
        };
        Self::from_params(&params, now)
    }
}

/// Customer contact details attached to a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingContact {
    pub full_name: String,
    pub phone: String,
    pub comment: String,
}

impl BookingContact {
    /// Validate name and phone the way the booking form does
    pub fn new(full_name: &str, phone: &str, comment: Option<&str>) -> Result<Self, PricingError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(PricingError::invalid_contact("fullName", "must not be empty"));
        }
        let phone = phone.trim();
        if !phone.starts_with('+') {
            return Err(PricingError::invalid_contact("phone", "must start with '+'"));
        }
        if phone.chars().count() < 9 {
            return Err(PricingError::invalid_contact("phone", "must be at least 9 characters"));
        }
        Ok(Self {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            comment: comment.map(str::trim).unwrap_or_default().to_string(),
        })
    }
}

/// Request to build a booking confirmation summary
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummaryRequest {
    pub car: CarRecord,
    #[serde(flatten)]
    pub params: QuoteParams,
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl BookingSummaryRequest {
    pub fn contact(&self) -> Result<BookingContact, PricingError> {
        BookingContact::new(&self.full_name, &self.phone, self.comment.as_deref())
    }

    /// Pick-up time as `HH:MM`
    pub fn time_start(&self) -> Result<String, PricingError> {
        parse_time_of_day(&self.time_start, "timeStart")
    }

    /// Return time as `HH:MM`
    pub fn time_end(&self) -> Result<String, PricingError> {
        parse_time_of_day(&self.time_end, "timeEnd")
    }
}

fn parse_time_of_day(value: &Option<String>, field: &str) -> Result<String, PricingError> {
    let raw = match present(value) {
        Some(raw) => raw,
        None => return Ok(DEFAULT_TIME_OF_DAY.to_string()),
    };
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| PricingError::invalid_input(field, format!("'{}' is not a HH:MM time", raw)))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, PricingError> {
    present(value).ok_or_else(|| PricingError::invalid_input(field, "is required"))
}

fn parse_i64(raw: &str, field: &str) -> Result<i64, PricingError> {
    raw.parse::<i64>()
        .map_err(|_| PricingError::invalid_input(field, format!("'{}' is not an integer", raw)))
}

fn parse_money(raw: &str, field: &str) -> Result<Decimal, PricingError> {
    // Decimal has no NaN/inf, so "NaN" and "Infinity" fail here
    let amount = raw
        .parse::<Decimal>()
        .map_err(|_| PricingError::invalid_input(field, format!("'{}' is not a valid amount", raw)))?;
    if amount < Decimal::ZERO {
        return Err(PricingError::invalid_input(
            field,
            format!("must not be negative (got {})", amount),
        ));
    }
    Ok(amount)
}

fn parse_instant(raw: &str, field: &str) -> Result<DateTime<Utc>, PricingError> {
    let millis = parse_i64(raw, field)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| PricingError::invalid_input(field, format!("{} is out of range", millis)))
}

fn parse_flag(value: &Option<String>, field: &str) -> Result<bool, PricingError> {
    match present(value) {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(PricingError::invalid_input(
            field,
            format!("'{}' is not a boolean", other),
        )),
    }
}

fn parse_area(value: &Option<String>, field: &str) -> Result<i64, PricingError> {
    match present(value) {
        None => Ok(DEFAULT_AREA_ID),
        Some(raw) => parse_i64(raw, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn params() -> QuoteParams {
        let start = now().timestamp_millis();
        QuoteParams {
            car_id: Some("12".to_string()),
            daily_base_rate: Some("1000".to_string()),
            deposit: Some("5000".to_string()),
            start_date: Some(start.to_string()),
            end_date: Some((start + 3 * 86_400_000).to_string()),
            is_premium: Some("true".to_string()),
            include_child_seat: None,
            location_from: Some("2".to_string()),
            location_to: Some("3".to_string()),
        }
    }

    #[test]
    fn test_from_params_full() {
        let req = RentalRequest::from_params(&params(), now()).unwrap();
        assert_eq!(req.car_id, 12);
        assert_eq!(req.daily_base_rate, dec!(1000));
        assert_eq!(req.deposit_amount, dec!(5000));
        assert_eq!(req.start, now());
        assert_eq!(req.end, now() + Duration::days(3));
        assert!(req.is_premium_insurance);
        assert!(!req.include_child_seat);
        assert_eq!(req.pickup_location_id, 2);
        assert_eq!(req.dropoff_location_id, 3);
    }

    #[test]
    fn test_from_params_defaults() {
        let p = QuoteParams {
            car_id: Some("1".to_string()),
            daily_base_rate: Some("800".to_string()),
            ..Default::default()
        };
        let req = RentalRequest::from_params(&p, now()).unwrap();
        assert_eq!(req.start, now());
        assert_eq!(req.end, now() + Duration::days(DEFAULT_RENTAL_DAYS));
        assert_eq!(req.pickup_location_id, DEFAULT_AREA_ID);
        assert_eq!(req.dropoff_location_id, DEFAULT_AREA_ID);
        assert_eq!(req.deposit_amount, Decimal::ZERO);
        assert!(!req.is_premium_insurance);
    }

    #[test]
    fn test_from_params_default_end_out_of_range() {
        // start sits just inside chrono's range, start + 3 days does not
        let p = QuoteParams {
            start_date: Some("8210266876799999".to_string()),
            end_date: None,
            ..params()
        };
        let err = RentalRequest::from_params(&p, now()).unwrap_err();
        assert_eq!(err.field(), "endDate");
        assert!(matches!(err, PricingError::InvalidQuoteInput { .. }));
    }

    #[test]
    fn test_from_params_rejects_nan_rate() {
        for bad in ["NaN", "Infinity", "abc", "1.2.3"] {
            let p = QuoteParams {
                daily_base_rate: Some(bad.to_string()),
                ..params()
            };
            let err = RentalRequest::from_params(&p, now()).unwrap_err();
            assert_eq!(err.field(), "dailyBaseRate", "input {}", bad);
        }
    }

    #[test]
    fn test_from_params_rejects_negative_rate() {
        let p = QuoteParams {
            daily_base_rate: Some("-1000".to_string()),
            ..params()
        };
        let err = RentalRequest::from_params(&p, now()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidQuoteInput { .. }));
    }

    #[test]
    fn test_from_params_requires_car_and_rate() {
        let p = QuoteParams {
            car_id: None,
            ..params()
        };
        assert_eq!(RentalRequest::from_params(&p, now()).unwrap_err().field(), "carId");

        let p = QuoteParams {
            daily_base_rate: Some("  ".to_string()),
            ..params()
        };
        assert_eq!(
            RentalRequest::from_params(&p, now()).unwrap_err().field(),
            "dailyBaseRate"
        );
    }

    #[test]
    fn test_from_params_rejects_malformed_dates_and_flags() {
        let p = QuoteParams {
            start_date: Some("yesterday".to_string()),
            ..params()
        };
        assert_eq!(RentalRequest::from_params(&p, now()).unwrap_err().field(), "startDate");

        let p = QuoteParams {
            is_premium: Some("maybe".to_string()),
            ..params()
        };
        assert_eq!(RentalRequest::from_params(&p, now()).unwrap_err().field(), "isPremium");

        let p = QuoteParams {
            location_to: Some("north".to_string()),
            ..params()
        };
        assert_eq!(RentalRequest::from_params(&p, now()).unwrap_err().field(), "locationTo");
    }

    #[test]
    fn test_for_car_uses_record_rate() {
        let car = CarRecord {
            id: 44,
            brand: "Mazda".to_string(),
            model: "2".to_string(),
            year: Some(2021),
            price_per_day: dec!(900),
            deposit: dec!(3000),
        };
        let p = QuoteParams {
            car_id: None,
            daily_base_rate: Some("1".to_string()),
            ..params()
        };
        let req = RentalRequest::for_car(&car, &p, now()).unwrap();
        assert_eq!(req.car_id, 44);
        assert_eq!(req.daily_base_rate, dec!(900));
        assert_eq!(req.deposit_amount, dec!(3000));
    }

    #[test]
    fn test_booking_contact_validation() {
        let contact = BookingContact::new(" Jane Doe ", "+66812345678", Some(" late arrival ")).unwrap();
        assert_eq!(contact.full_name, "Jane Doe");
        assert_eq!(contact.comment, "late arrival");

        assert!(BookingContact::new("", "+66812345678", None).is_err());
        assert_eq!(BookingContact::new("Jane", "0812345678", None).unwrap_err().field(), "phone");
        assert_eq!(BookingContact::new("Jane", "+6681", None).unwrap_err().field(), "phone");
    }

    #[test]
    fn test_summary_request_deserializes_flat_params() {
        let body = serde_json::json!({
            "car": {"id": 3, "brand": "Honda", "model": "Jazz", "year": 2020,
                    "price_per_day": "1000", "deposit": "4000"},
            "startDate": 1709287200000_i64,
            "endDate": "1709546400000",
            "isPremium": false,
            "locationFrom": "1",
            "locationTo": "2",
            "fullName": "Jane Doe",
            "phone": "+66812345678"
        });
        let req: BookingSummaryRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.params.location_to.as_deref(), Some("2"));
        assert_eq!(req.params.start_date.as_deref(), Some("1709287200000"));
        assert_eq!(req.params.is_premium.as_deref(), Some("false"));
        assert_eq!(req.time_start().unwrap(), DEFAULT_TIME_OF_DAY);
        assert!(req.contact().is_ok());
    }

    fn summary_request(time_start: Option<&str>, time_end: Option<&str>) -> BookingSummaryRequest {
        BookingSummaryRequest {
            car: CarRecord {
                id: 3,
                brand: "Honda".to_string(),
                model: "Jazz".to_string(),
                year: None,
                price_per_day: dec!(1000),
                deposit: dec!(4000),
            },
            params: params(),
            time_start: time_start.map(str::to_string),
            time_end: time_end.map(str::to_string),
            full_name: "Jane Doe".to_string(),
            phone: "+66812345678".to_string(),
            comment: None,
        }
    }

    #[test]
    fn test_summary_times_are_trimmed() {
        let req = summary_request(Some(" 09:30 "), Some("18:45"));
        assert_eq!(req.time_start().unwrap(), "09:30");
        assert_eq!(req.time_end().unwrap(), "18:45");

        let req = summary_request(Some("   "), None);
        assert_eq!(req.time_start().unwrap(), DEFAULT_TIME_OF_DAY);
        assert_eq!(req.time_end().unwrap(), DEFAULT_TIME_OF_DAY);
    }

    #[test]
    fn test_summary_times_reject_garbage() {
        let req = summary_request(Some("25:00"), None);
        assert_eq!(req.time_start().unwrap_err().field(), "timeStart");

        let req = summary_request(None, Some("Total: 1 ฿"));
        let err = req.time_end().unwrap_err();
        assert_eq!(err.field(), "timeEnd");
        assert!(matches!(err, PricingError::InvalidQuoteInput { .. }));

        let req = summary_request(Some("10:00\nDeposit: 0 ฿"), None);
        assert!(req.time_start().is_err());
    }
}
