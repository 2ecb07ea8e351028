use crate::models::Resource;
use axum::Json;
use serde_json::{json, Value};

/// Service banner plus the resource segments `/api/resources/:resource` accepts.
pub async fn index() -> Json<Value> {
    let resources: Vec<&str> = Resource::ALL.iter().map(|r| r.as_str()).collect();
    Json(json!({
        "service": "jhs-console",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": resources,
    }))
}

pub async fn health_check() -> &'static str {
    "OK"
}
