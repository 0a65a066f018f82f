//! Pricing and quoting engine for car rentals.
//!
//! A rental request flows through duration -> daily rate -> fee composition
//! and comes out as an immutable `Quote`. Formatting and booking summaries
//! only ever read that quote.

pub mod calculators;
pub mod duration;
pub mod formatting;
pub mod locations;
pub mod models;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod summary;

// Re-export commonly used items
pub use calculators::{round_half_up, round_money, round_to_step, FeeComposer};
pub use formatting::{QuoteFormatter, StorefrontPrice};
pub use locations::{Area, LocationCatalog};
pub use models::{CarRecord, Quote, RentalRequest};
pub use routes::router;
pub use services::{PricingError, QuoteEngine};
pub use summary::BookingSummaryBuilder;
