mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::{get, post},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use goldsmith_backend::AppState;
use goldsmith_backend::handlers::{currency, metal};

use crate::common::setup_test_db;

// Helper to build test router over a fresh in-memory database
async fn build_test_router() -> Router {
    let db = setup_test_db().await.expect("Failed to connect to test DB");
    let state = AppState { db };

    Router::new()
        .route(
            "/api/currencies",
            get(currency::list_currencies).post(currency::create_currency),
        )
        .route("/api/currencies/{id}/base", post(currency::set_base_currency))
        .route(
            "/api/currencies/{id}/rates",
            get(currency::get_currency_rates).post(currency::add_currency_rate),
        )
        .route("/api/metals", get(metal::list_metals).post(metal::create_metal))
        .with_state(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// Decimals serialize as JSON strings; compare numerically
fn as_decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

/// Creating the first currency makes it base; listing reports it with the
/// implicit rate of 1.
#[tokio::test]
async fn test_create_and_list_currencies() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "ars", "name": "Peso Argentino", "symbol": "$"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["code"], "ARS");
    assert_eq!(created["is_base"], true);
    assert_eq!(as_decimal(&created["current_rate"]), Decimal::ONE);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "USD", "name": "US Dollar", "symbol": "US$"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let usd = response_json(response).await;
    assert_eq!(usd["is_base"], false);
    assert!(usd["current_rate"].is_null());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/currencies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = response_json(response).await;
    let currencies = listed["currencies"].as_array().unwrap();
    assert_eq!(currencies.len(), 2);
    let base_codes: Vec<&str> = currencies
        .iter()
        .filter(|c| c["is_base"] == true)
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(base_codes, vec!["ARS"]);
}

#[tokio::test]
async fn test_duplicate_code_conflict() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "USD", "name": "US Dollar", "symbol": "US$"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "usd", "name": "Dollar again", "symbol": "$"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["code"], "DUPLICATE_CODE");
    assert!(body["error"].as_str().unwrap().contains("USD"));
}

/// Full base switch over HTTP: record a rate for USD, switch base to it and
/// verify each metal's reference value was divided by that rate.
#[tokio::test]
async fn test_base_switch_over_http() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "ARS", "name": "Peso Argentino", "symbol": "$"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "USD", "name": "US Dollar", "symbol": "US$"}),
        ))
        .await
        .unwrap();
    let usd = response_json(response).await;
    let usd_id = usd["id"].as_i64().unwrap();

    for (name, value) in [("Oro", "100000"), ("Plata", "1250")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/metals",
                json!({"name": name, "reference_value": value}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/currencies/{usd_id}/rates"),
            json!({"rate": "1000"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/currencies/{usd_id}/base"),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = response_json(response).await;
    assert_eq!(outcome["changed"], true);
    assert_eq!(as_decimal(&outcome["rate_applied"]), dec!(1000));
    assert_eq!(outcome["metals_recomputed"], 2);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/metals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listed = response_json(response).await;
    let metals = listed["metals"].as_array().unwrap();
    let value_of = |name: &str| {
        metals
            .iter()
            .find(|m| m["name"] == name)
            .map(|m| as_decimal(&m["reference_value"]))
            .unwrap()
    };
    assert_eq!(value_of("Oro"), dec!(100));
    assert_eq!(value_of("Plata"), dec!(1.25));
}

/// The base currency never accepts manual rates over the API either.
#[tokio::test]
async fn test_rate_on_base_currency_conflict() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "ARS", "name": "Peso Argentino", "symbol": "$"}),
        ))
        .await
        .unwrap();
    let ars = response_json(response).await;
    let ars_id = ars["id"].as_i64().unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/currencies/{ars_id}/rates"),
            json!({"rate": "1.5"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["code"], "BASE_CURRENCY_IMMUTABLE");
}

/// Future-dated rates are rejected up front.
#[tokio::test]
async fn test_future_dated_rate_rejected() {
    let app = build_test_router().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "ARS", "name": "Peso Argentino", "symbol": "$"}),
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/currencies",
            json!({"code": "USD", "name": "US Dollar", "symbol": "US$"}),
        ))
        .await
        .unwrap();
    let usd = response_json(response).await;
    let usd_id = usd["id"].as_i64().unwrap();

    let tomorrow = chrono::Utc::now() + chrono::Duration::days(1);
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/currencies/{usd_id}/rates"),
            json!({"rate": "900", "effective_at": tomorrow.to_rfc3339()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "INVALID_TIMESTAMP");

    // Nothing was recorded
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/currencies/{usd_id}/rates"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let history = response_json(response).await;
    assert!(history["rates"].as_array().unwrap().is_empty());
}
