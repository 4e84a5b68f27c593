//! Integration tests for the API server.

use std::sync::Arc;
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use notifier::InMemoryNotifier;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, InMemoryNotifier) {
    let notifier = InMemoryNotifier::new();
    let state = api::create_default_state(Arc::new(notifier.clone()), &api::Config::default());
    let app = api::create_app(state, get_metrics_handle());
    (app, notifier)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn sample_address() -> serde_json::Value {
    serde_json::json!({
        "street": "1 Main St",
        "city": "Springfield",
        "state": "OR",
        "country": "USA",
        "zip": "97477"
    })
}

/// Seeds one catalog item and one basket, returning the basket id.
async fn seed_widget_basket(app: &axum::Router) -> i32 {
    let response = app
        .clone()
        .oneshot(post_json(
            "/catalog/items",
            serde_json::json!({"id": 5, "name": "Widget", "picture_uri": "widget.png"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/baskets",
            serde_json::json!({
                "buyer_id": "b1",
                "items": [{"catalog_item_id": 5, "unit_price_cents": 350, "quantity": 4}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    response_json(response).await["basket_id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn checkout_places_an_order() {
    let (app, notifier) = setup();
    let basket_id = seed_widget_basket(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/checkout",
            serde_json::json!({"basket_id": basket_id, "ship_to_address": sample_address()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["notification"], "delivered");
    assert_eq!(notifier.delivered_count().await, 1);

    // The order is readable afterwards, with the captured snapshot and total.
    let order_id = json["order_id"].as_str().unwrap().to_string();
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/orders/{order_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let order = response_json(response).await;
    assert_eq!(order["buyer_id"], "b1");
    assert_eq!(order["total_cents"], 1400);
    assert_eq!(order["items"][0]["name"], "Widget");
}

#[tokio::test]
async fn unknown_basket_is_404() {
    let (app, _) = setup();

    let response = app
        .oneshot(post_json(
            "/checkout",
            serde_json::json!({"basket_id": 999, "ship_to_address": sample_address()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_basket_is_400() {
    let (app, _) = setup();

    let response = app
        .clone()
        .oneshot(post_json(
            "/baskets",
            serde_json::json!({"buyer_id": "b1", "items": []}),
        ))
        .await
        .unwrap();
    let basket_id = response_json(response).await["basket_id"].as_i64().unwrap();

    let response = app
        .oneshot(post_json(
            "/checkout",
            serde_json::json!({"basket_id": basket_id, "ship_to_address": sample_address()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vanished_catalog_item_is_409() {
    let (app, _) = setup();

    let response = app
        .clone()
        .oneshot(post_json(
            "/baskets",
            serde_json::json!({
                "buyer_id": "b1",
                "items": [{"catalog_item_id": 42, "unit_price_cents": 100, "quantity": 1}]
            }),
        ))
        .await
        .unwrap();
    let basket_id = response_json(response).await["basket_id"].as_i64().unwrap();

    let response = app
        .oneshot(post_json(
            "/checkout",
            serde_json::json!({"basket_id": basket_id, "ship_to_address": sample_address()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn zero_quantity_basket_item_is_400() {
    let (app, _) = setup();

    let response = app
        .oneshot(post_json(
            "/baskets",
            serde_json::json!({
                "buyer_id": "b1",
                "items": [{"catalog_item_id": 5, "unit_price_cents": 100, "quantity": 0}]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failed_notification_still_places_the_order() {
    let (app, notifier) = setup();
    let basket_id = seed_widget_basket(&app).await;
    notifier.set_fail_on_notify(true).await;

    let response = app
        .oneshot(post_json(
            "/checkout",
            serde_json::json!({"basket_id": basket_id, "ship_to_address": sample_address()}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["notification"], "failed");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
