//! Billing API tests, driven in-process through the router

use axum::body::{Body, to_bytes};
use billing_server::{Config, InputPolicy, ServerState};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};

fn state(policy: InputPolicy) -> ServerState {
    ServerState::new(Config::with_overrides(0, policy))
}

async fn send(
    state: &ServerState,
    method: Method,
    path: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(path).method(method);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };

    let response = state.oneshot(request.body(body).unwrap()).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(state: &ServerState, path: &str, body: Value) -> (StatusCode, Value) {
    send(state, Method::POST, path, Some(body.to_string())).await
}

fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|v| (v - expected).abs() < 1e-9)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&state(InputPolicy::Strict), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["inputPolicy"], "strict");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_quote_end_to_end() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/quote",
        json!({
            "lineItems": [{"quantity": 10, "sellingPriceinQty": 118, "gstRate": 18}],
            "transportation": 50
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    let totals = &body["data"];
    assert!(approx(&totals["grossBase"], 1180.0));
    assert!(approx(&totals["perLine"][0]["baseExclGst"], 1000.0));
    assert!(approx(&totals["perLine"][0]["gstAmount"], 180.0));
    assert!(approx(&totals["runningSubtotalInclGst"], 1180.0));
    assert!(approx(&totals["grandTotal"], 1230.0));
}

#[tokio::test]
async fn test_quote_accepts_numeric_strings() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/quote",
        json!({
            "lineItems": [
                {"quantity": "1", "sellingPriceinQty": "118", "gstRate": "18"},
                {"quantity": "1", "sellingPriceinQty": "59.00", "gstRate": "18"}
            ],
            "discount": "17.7"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let totals = &body["data"];
    assert!(approx(&totals["discountRatio"], 0.1));
    assert!(approx(&totals["perLine"][0]["itemDiscount"], 11.8));
    assert!(approx(&totals["perLine"][1]["itemDiscount"], 5.9));
}

#[tokio::test]
async fn test_empty_document_is_charges_only() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/quote",
        json!({"transportation": 40, "roundOff": 0.5, "roundOffMode": "sub"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["data"]["grandTotal"], 39.5));
    assert!(approx(&body["data"]["totalGst"], 0.0));
}

#[tokio::test]
async fn test_strict_rejects_unreadable_quantity() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/quote",
        json!({
            "lineItems": [
                {"quantity": 1, "sellingPriceinQty": 10, "gstRate": 5},
                {"quantity": "abc", "sellingPriceinQty": 10, "gstRate": 5}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4001);
    assert_eq!(body["details"]["field"], "quantity");
    assert_eq!(body["details"]["line"], 1);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_strict_rejects_negative_charge() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/quote",
        json!({"lineItems": [], "unloading": -5}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);
    assert_eq!(body["details"]["field"], "unloading");
    assert!(body["details"].get("line").is_none());
}

#[tokio::test]
async fn test_lenient_zeroes_unreadable_values() {
    let (status, body) = post(
        &state(InputPolicy::Lenient),
        "/api/billing/quote",
        json!({
            "lineItems": [
                {"quantity": 2, "sellingPriceinQty": 50, "gstRate": ""},
                {"quantity": "abc", "sellingPriceinQty": 10, "gstRate": 5}
            ],
            "transportation": null
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let totals = &body["data"];
    assert!(approx(&totals["totalGst"], 0.0));
    assert!(approx(&totals["perLine"][1]["itemGross"], 0.0));
    assert!(approx(&totals["grandTotal"], 100.0));
}

#[tokio::test]
async fn test_too_many_lines() {
    let lines: Vec<Value> = (0..1001)
        .map(|_| json!({"quantity": 1, "sellingPriceinQty": 1, "gstRate": 0}))
        .collect();
    let (status, body) = post(
        &state(InputPolicy::Lenient),
        "/api/billing/quote",
        json!({"lineItems": lines}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4006);
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, body) = send(
        &state(InputPolicy::Strict),
        Method::POST,
        "/api/billing/quote",
        Some("{\"lineItems\": [".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

#[tokio::test]
async fn test_payload_is_rounded() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/payload",
        json!({
            "documentNumber": "INV-7",
            "lineItems": [
                {"quantity": 1, "sellingPriceinQty": 118, "gstRate": 18, "productName": "Tile A"},
                {"quantity": 1, "sellingPriceinQty": 59, "gstRate": 18}
            ],
            "discount": 17.7,
            "transportation": 50,
            "roundOff": 0.3,
            "roundOffMode": "sub"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let payload = &body["data"];
    assert_eq!(payload["documentNumber"], "INV-7");
    assert_eq!(payload["lineItems"][0]["productName"], "Tile A");
    assert_eq!(payload["lineItems"][0]["sellingPriceinQty"], 118.0);
    assert_eq!(payload["lineItems"][0]["gstAmount"], 15.88);
    assert_eq!(payload["subtotal"], 132.3);
    assert_eq!(payload["totalGst"], 23.81);
    assert_eq!(payload["grandTotal"], 205.81);
    assert_eq!(payload["roundOffMode"], "sub");
}

#[tokio::test]
async fn test_lenient_payload_keeps_huge_totals() {
    let (status, body) = post(
        &state(InputPolicy::Lenient),
        "/api/billing/payload",
        json!({
            "lineItems": [{"quantity": 1e15, "sellingPriceinQty": 1e15, "gstRate": 18}],
            "transportation": 50
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let payload = &body["data"];
    let figure = |value: &Value| value.as_f64().unwrap_or_default();
    assert!(figure(&payload["lineItems"][0]["baseExclGst"]) > 8e29);
    assert!(figure(&payload["lineItems"][0]["netTotal"]) > 9.9e29);
    assert!(figure(&payload["subtotal"]) > 8e29);
    assert!(figure(&payload["totalGst"]) > 1e29);
    assert!(figure(&payload["grandTotal"]) > 9.9e29);
}

#[tokio::test]
async fn test_print_inter_state() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/print",
        json!({
            "kind": "invoice",
            "supply": "interState",
            "lineItems": [
                {"quantity": 10, "sellingPriceinQty": 118, "gstRate": 18, "hsnCode": "6907"}
            ],
            "transportation": 50
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let print = &body["data"];
    assert_eq!(print["title"], "Tax Invoice");
    assert_eq!(print["lines"][0]["hsnCode"], "6907");
    assert_eq!(print["lines"][0]["igst"], "180.00");
    assert_eq!(print["lines"][0]["cgst"], "0.00");
    assert_eq!(print["lines"][0]["netTotal"], "1180.00");

    let summary = print["summary"].as_array().unwrap();
    let last = summary.last().unwrap();
    assert_eq!(last["label"], "Grand Total");
    assert_eq!(last["amount"], "1230.00");
    assert_eq!(print["taxSummary"][0]["gstRate"], "18%");
}

#[tokio::test]
async fn test_normalize_sqft_and_box() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/normalize",
        json!({
            "lines": [
                {"quantity": 12, "price": 100, "gstRate": 18, "unitMode": "SQFT", "length": 2, "breadth": 3},
                {"quantity": 3, "price": 40, "gstRate": 12, "unitMode": "BOX", "length": 2, "breadth": 2, "psRatio": 8}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["quantity"], 2.0);
    assert_eq!(items[0]["sellingPriceinQty"], 600.0);
    assert_eq!(items[0]["gstRate"], 18.0);
    assert_eq!(items[1]["quantity"], 24.0);
    assert_eq!(items[1]["sellingPriceinQty"], 160.0);
}

#[tokio::test]
async fn test_normalize_rejects_bad_dimension() {
    let (status, body) = post(
        &state(InputPolicy::Strict),
        "/api/billing/normalize",
        json!({
            "lines": [
                {"quantity": 12, "price": 100, "gstRate": 18, "unitMode": "SQFT", "length": 0, "breadth": 3}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4005);
    assert_eq!(body["details"]["field"], "length");
    assert_eq!(body["details"]["line"], 0);
}
