#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use jhs_console::config::{
    BackendSettings, CacheSettings, ReceiptSettings, ServerSettings, Settings, TelemetrySettings,
};
use jhs_console::startup::build_router;
use jhs_console::AppState;
use serde_json::Value;
use tower::util::ServiceExt;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Router wired to a wiremock server standing in for the shop backend.
pub struct TestApp {
    pub backend: MockServer,
    pub router: Router,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            backend: BackendSettings {
                url: backend.uri(),
                timeout_secs: 5,
            },
            cache: CacheSettings {
                stale_after_secs: 300,
            },
            telemetry: TelemetrySettings::default(),
            receipt: ReceiptSettings::default(),
        };

        let state = AppState::from_settings(&settings).expect("Failed to build app state");

        Self {
            backend,
            router: build_router(state, &settings.server.allowed_origins),
        }
    }

    /// Sends a request with the test bearer token; returns status and raw body.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        self.send_as(TOKEN, method, uri, body).await
    }

    pub async fn send_as(
        &self,
        token: &str,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", token));

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Like [`send`](Self::send) but decodes the body as JSON (`null` when empty).
    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.json_as(TOKEN, method, uri, body).await
    }

    pub async fn json_as(
        &self,
        token: &str,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send_as(token, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is not JSON")
        };
        (status, value)
    }

    /// Bodies of the requests the backend received for `method` + `path`.
    pub async fn received_bodies(&self, method: &str, path: &str) -> Vec<Value> {
        self.backend
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.to_string() == method && r.url.path() == path)
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }
}
