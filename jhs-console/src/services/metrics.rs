use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;
use std::time::Instant;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub backend_requests_total: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;

        let backend_requests_total = IntCounterVec::new(
            Opts::new(
                "backend_requests_total",
                "Calls made to the shop backend, by resource and outcome",
            ),
            &["method", "resource", "outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(backend_requests_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            backend_requests_total,
        })
    }
}

/// Registers the console's collectors. Safe to call more than once.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_none() {
        let _ = METRICS.set(Metrics::new()?);
    }
    Ok(())
}

pub fn metrics() -> Option<&'static Metrics> {
    METRICS.get()
}

/// Counts one backend call. `path` is the backend path; its first segment
/// is the resource label.
pub fn record_backend_call(method: &str, path: &str, outcome: &str) {
    if let Some(m) = metrics() {
        let resource = path.trim_start_matches('/').split('/').next().unwrap_or("");
        m.backend_requests_total
            .with_label_values(&[method, resource, outcome])
            .inc();
    }
}

pub async fn http_metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    // Route template, so ids do not become label values
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    if let Some(m) = metrics() {
        let status = response.status().as_u16().to_string();
        let labels = [method.as_str(), path.as_str(), status.as_str()];
        m.http_requests_total.with_label_values(&labels).inc();
        m.http_request_duration_seconds
            .with_label_values(&labels)
            .observe(start.elapsed().as_secs_f64());
    }

    response
}

/// Text exposition of every registered collector; empty before `init_metrics`.
pub fn get_metrics() -> String {
    let Some(m) = metrics() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&m.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_calls_show_up_in_exposition() {
        init_metrics().unwrap();
        record_backend_call("GET", "provincias", "ok");
        record_backend_call("GET", "/pagos-facturas/factura/7", "ok");

        let text = get_metrics();
        assert!(text.contains("backend_requests_total"));
        assert!(text.contains("resource=\"provincias\""));
        assert!(text.contains("resource=\"pagos-facturas\""));
    }
}
