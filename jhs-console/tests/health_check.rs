mod common;

use axum::{body::Body, http::Request};
use common::TestApp;
use http_body_util::BodyExt;
use tower::util::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let (status, body) = app.send("GET", "/health", None).await;

    assert!(status.is_success());
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn index_lists_resource_segments() {
    let app = TestApp::spawn().await;

    let (status, body) = app.json("GET", "/", None).await;

    assert!(status.is_success());
    assert_eq!(body["service"], "jhs-console");
    let resources = body["resources"].as_array().unwrap();
    assert!(resources.iter().any(|r| r == "pagos-facturas"));
    assert!(resources.iter().any(|r| r == "barrios"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::spawn().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
}

#[tokio::test]
async fn api_routes_require_a_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/resources/clientes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());

    // Nothing was forwarded without credentials
    assert!(app.backend.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn preflight_from_a_configured_origin_is_allowed() {
    let app = TestApp::spawn().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/resources/clientes")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}
