//! Configured area and rate-modifier files flowing through the whole app.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;

use carrental_web::config::{AppConfig, ConfigError};
use carrental_web::{app, AppState};

const SATURDAY_MS: i64 = 1_709_373_600_000; // 2024-03-02T10:00:00Z
const DAY_MS: i64 = 86_400_000;

fn amount(body: &Value, key: &str) -> Decimal {
    body[key]["amount"].as_str().unwrap().parse().unwrap()
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("carrental-it-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_configured_files_drive_quotes() {
    let areas = write_temp(
        "areas.json",
        r#"[{"id": 1, "name": "Airport", "deliveryPrice": "100"},
            {"id": 2, "name": "Kata", "deliveryPrice": "200"}]"#,
    );
    let rates = write_temp("rates.json", r#"{"saturday": "1.5"}"#);
    let config = AppConfig::from_lookup(|key| match key {
        "AREAS_FILE" => Some(areas.display().to_string()),
        "RATE_MODIFIERS_FILE" => Some(rates.display().to_string()),
        _ => None,
    })
    .unwrap();

    let state = AppState::from_config(&config).unwrap();
    std::fs::remove_file(&areas).ok();
    std::fs::remove_file(&rates).ok();

    let uri = format!(
        "/api/pricing/quote?carId=5&dailyBaseRate=1000&startDate={}&endDate={}&locationFrom=1&locationTo=2",
        SATURDAY_MS,
        SATURDAY_MS + 2 * DAY_MS
    );
    let response = app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    // Saturday start: 1000 * 1.5 per day, over 2 days
    assert_eq!(amount(&body, "base_rental_fee"), dec!(3000));
    assert_eq!(amount(&body, "delivery_fee"), dec!(300));
    assert_eq!(amount(&body, "total_price"), dec!(3300));
}

#[test]
fn test_negative_area_file_fails_startup() {
    let areas = write_temp(
        "areas-negative.json",
        r#"[{"id": 1, "name": "Airport", "deliveryPrice": "-1"}]"#,
    );
    let config = AppConfig {
        areas_file: Some(areas.clone()),
        ..AppConfig::default()
    };
    let result = AppState::from_config(&config);
    std::fs::remove_file(&areas).ok();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
