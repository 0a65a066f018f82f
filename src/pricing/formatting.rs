//! Display formatting for quotes.
//!
//! Amounts are rounded to the nearest 10 and printed without fractions
//! ("฿3,500"). Rounding here is presentation only; the unrounded `Quote`
//! stays the source of truth.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::round_to_step;
use super::models::Quote;

const DISPLAY_STEP: Decimal = Decimal::TEN;

/// Renders amounts for the storefront
#[derive(Debug, Clone)]
pub struct QuoteFormatter {
    currency_symbol: String,
}

impl Default for QuoteFormatter {
    fn default() -> Self {
        Self::new("฿")
    }
}

impl QuoteFormatter {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// "฿1,230" for a per-day figure
    pub fn format_daily(&self, amount: Decimal) -> String {
        self.format_amount(round_to_step(amount, DISPLAY_STEP))
    }

    /// "฿3,500 for 3 days"
    pub fn format_total(&self, amount: Decimal, days: i64) -> String {
        let unit = if days == 1 { "day" } else { "days" };
        format!(
            "{} for {} {}",
            self.format_amount(round_to_step(amount, DISPLAY_STEP)),
            days,
            unit
        )
    }

    /// Both storefront figures, taken from one quote
    pub fn storefront(&self, quote: &Quote) -> StorefrontPrice {
        StorefrontPrice {
            per_day: self.format_daily(quote.daily_display_rate()),
            total: self.format_total(quote.total_price(), quote.pricing_days()),
        }
    }

    fn format_amount(&self, amount: Decimal) -> String {
        let whole = amount.trunc().normalize();
        let digits = whole.abs().to_string();
        let sign = if whole.is_sign_negative() && !whole.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, self.currency_symbol, group_thousands(&digits))
    }
}

/// Per-day and total labels for a storefront card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontPrice {
    pub per_day: String,
    pub total: String,
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
