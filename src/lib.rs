//! Car rental storefront backend: pricing and quoting over HTTP.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::{AppCache, CacheStats};
use crate::config::{AppConfig, ConfigError, PricingConfig};
use crate::pricing::calculators::FeeComposer;
use crate::pricing::rates::RateTierEngine;
use crate::pricing::responses::QuoteResponse;
use crate::pricing::{BookingSummaryBuilder, Quote, QuoteEngine, QuoteFormatter, RentalRequest};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PricingConfig>,
    pub engine: Arc<QuoteEngine>,
    pub cache: AppCache,
    pub formatter: Arc<QuoteFormatter>,
    pub summaries: Arc<BookingSummaryBuilder>,
}

impl AppState {
    /// Wire the engine from configuration (areas and rate modifiers included)
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let catalog = Arc::new(config.load_catalog()?);
        let rates = RateTierEngine::new(config.load_rate_modifier()?);
        let fees = FeeComposer::new(
            catalog,
            config.pricing.insurance_daily_rate,
            config.pricing.child_seat_daily_rate,
        );

        Ok(Self {
            config: Arc::new(config.pricing.clone()),
            engine: Arc::new(QuoteEngine::new(rates, fees)),
            cache: AppCache::new(config.quote_cache_ttl),
            formatter: Arc::new(QuoteFormatter::new(config.pricing.currency_symbol.clone())),
            summaries: Arc::new(BookingSummaryBuilder::new(config.pricing.currency_symbol.clone())),
        })
    }

    /// JSON view of a quote with the storefront labels attached
    pub fn quote_response(&self, request: &RentalRequest, quote: &Quote) -> QuoteResponse {
        QuoteResponse::new(
            request.car_id,
            quote,
            request.deposit_amount,
            request.insurance_label(),
            self.formatter.storefront(quote),
            &self.config.currency,
        )
    }
}

/// Health check payload
#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

/// Full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/pricing", pricing::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}

async fn not_found() -> error::AppError {
    error::AppError::NotFound
}
