//! HTTP routes for the pricing engine.
//!
//! Handlers are thin: parse, quote through the shared engine, render.
//! The request clock is read here, never inside the engine.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use crate::error::Result;
use crate::AppState;

use super::models::RentalRequest;
use super::requests::{BookingSummaryRequest, QuoteParams};
use super::responses::{AreaFeeResponse, AreaResponse, BookingSummaryResponse, MoneyResponse, QuoteResponse};
use super::summary::{BookingTimes, LocationNames, SummaryContext};

/// Pricing API router, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", get(quote_from_query).post(quote_from_json))
        .route("/summary", post(booking_summary))
        .route("/areas", get(list_areas))
        .route("/areas/:id/fee", get(area_fee))
}

/// Storefront card / booking page quote from link parameters
async fn quote_from_query(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResponse>> {
    quote_params(&state, &params).await.map(Json)
}

async fn quote_from_json(
    State(state): State<AppState>,
    Json(params): Json<QuoteParams>,
) -> Result<Json<QuoteResponse>> {
    quote_params(&state, &params).await.map(Json)
}

async fn quote_params(state: &AppState, params: &QuoteParams) -> Result<QuoteResponse> {
    let request = RentalRequest::from_params(params, Utc::now())?;
    let quote = state.cache.get_or_quote(&state.engine, &request).await?;
    Ok(state.quote_response(&request, &quote))
}

/// Confirmation text for a submitted booking, plus the quote it was built from
async fn booking_summary(
    State(state): State<AppState>,
    Json(body): Json<BookingSummaryRequest>,
) -> Result<Json<BookingSummaryResponse>> {
    let contact = body.contact()?;
    let times = BookingTimes {
        start: body.time_start()?,
        end: body.time_end()?,
    };
    let request = RentalRequest::for_car(&body.car, &body.params, Utc::now())?;
    let quote = state.cache.get_or_quote(&state.engine, &request).await?;

    let catalog = state.engine.catalog();
    let context = SummaryContext {
        car: &body.car,
        locations: LocationNames {
            pickup: catalog.name_of(request.pickup_location_id).map(str::to_string),
            dropoff: catalog.name_of(request.dropoff_location_id).map(str::to_string),
        },
        times,
        contact: Some(&contact),
    };
    let text = state.summaries.build_summary(&request, &quote, &context);

    tracing::info!(car_id = request.car_id, total = %quote.total_price(), "Booking summary built");

    Ok(Json(BookingSummaryResponse {
        text,
        quote: state.quote_response(&request, &quote),
    }))
}

async fn list_areas(State(state): State<AppState>) -> Json<Vec<AreaResponse>> {
    let currency = &state.config.currency;
    Json(
        state
            .engine
            .catalog()
            .areas()
            .iter()
            .map(|area| AreaResponse::new(area, currency))
            .collect(),
    )
}

/// Delivery fee for one area; unknown ids cost nothing
async fn area_fee(State(state): State<AppState>, Path(id): Path<i64>) -> Json<AreaFeeResponse> {
    let catalog = state.engine.catalog();
    Json(AreaFeeResponse {
        area_id: id,
        known: catalog.get(id).is_some(),
        delivery_fee: MoneyResponse::new(catalog.surcharge_for(id), &state.config.currency),
    })
}
