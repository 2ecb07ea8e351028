//! W3C Trace Context (https://www.w3.org/TR/trace-context/) on the console's
//! outgoing backend calls, so a request can be followed from the browser
//! through the console into the backend.

use opentelemetry::trace::TraceContextExt;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Headers describing the current span, or an empty map when there is no
/// sampled OpenTelemetry span (e.g. OTLP export is off).
pub fn trace_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();
    if !span_context.is_valid() {
        return headers;
    }

    // version-trace_id-span_id-trace_flags
    let traceparent = format!(
        "00-{}-{}-{:02x}",
        span_context.trace_id(),
        span_context.span_id(),
        span_context.trace_flags().to_u8()
    );
    if let Ok(value) = HeaderValue::from_str(&traceparent) {
        headers.insert(TRACEPARENT_HEADER, value);
    }

    let tracestate = span_context.trace_state().header();
    if let Ok(value) = HeaderValue::from_str(&tracestate) {
        if !value.is_empty() {
            headers.insert(TRACESTATE_HEADER, value);
        }
    }

    headers
}

/// A request whose trace headers are taken from the span active when it is
/// sent, not when it is built.
pub struct TracedRequest(RequestBuilder);

impl TracedRequest {
    pub fn json<T: serde::Serialize + ?Sized>(self, body: &T) -> Self {
        Self(self.0.json(body))
    }

    pub fn bearer_auth<T: std::fmt::Display>(self, token: T) -> Self {
        Self(self.0.bearer_auth(token))
    }

    pub async fn send(self) -> Result<Response, reqwest::Error> {
        self.0.headers(trace_headers()).send().await
    }
}

pub trait TracedClientExt {
    fn traced(&self, method: Method, url: &str) -> TracedRequest;
}

impl TracedClientExt for Client {
    fn traced(&self, method: Method, url: &str) -> TracedRequest {
        TracedRequest(self.request(method, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_headers_outside_an_exported_span() {
        let _span = tracing::info_span!("backend_call").entered();
        assert!(trace_headers().is_empty());
    }

    #[tokio::test]
    async fn request_carries_method_and_url() {
        let client = Client::new();
        let TracedRequest(builder) = client
            .traced(Method::PUT, "http://backend.local/api/colores/5")
            .bearer_auth("abc");

        let request = builder.build().unwrap();
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().path(), "/api/colores/5");
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }
}
