//! Tests for `MempoolPriceFeed` against a local axum server.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use payment_gateway::price::{MempoolPriceFeed, PriceError, PriceFeed, PriceQuote};
use serde_json::{json, Number};

async fn spawn_feed(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/v1/prices", addr)
}

fn feed_for(url: &str) -> MempoolPriceFeed {
    MempoolPriceFeed::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_parses_rates() {
    let url = spawn_feed(Router::new().route(
        "/api/v1/prices",
        get(|| async {
            Json(json!({ "time": 1700000000, "USD": 97000, "EUR": 88000, "GBP": 75000, "JPY": 1 }))
        }),
    ))
    .await;

    let prices = feed_for(&url).fetch().await.unwrap();
    let quote = PriceQuote::from_feed(prices).unwrap();
    assert_eq!(quote.usd, Number::from(97_000u64));
    assert_eq!(quote.eur, Some(Number::from(88_000u64)));
    assert_eq!(quote.gbp, Some(Number::from(75_000u64)));
}

#[tokio::test]
async fn test_non_success_status_reports_reason() {
    let url = spawn_feed(Router::new().route(
        "/api/v1/prices",
        get(|| async { StatusCode::TOO_MANY_REQUESTS.into_response() }),
    ))
    .await;

    let err = feed_for(&url).fetch().await.unwrap_err();
    match &err {
        PriceError::Status(reason) => assert_eq!(reason, "Too Many Requests"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.client_message(), "Too Many Requests");
}

#[tokio::test]
async fn test_invalid_body_is_http_error() {
    let url = spawn_feed(Router::new().route(
        "/api/v1/prices",
        get(|| async { "not json" }),
    ))
    .await;

    let err = feed_for(&url).fetch().await.unwrap_err();
    assert!(matches!(err, PriceError::Http(_)));
    assert_eq!(err.client_message(), "Failed to get price");
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = feed_for(&format!("http://{}/api/v1/prices", addr))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, PriceError::Http(_)));
    assert_eq!(err.client_message(), "Failed to get price");
}
